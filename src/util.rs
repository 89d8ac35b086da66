use crate::config::Error;
use std::fs::File;
use std::path::Path;

pub fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|err| Error::Open {
        path: path.to_owned(),
        err,
    })
}
