//! Defines [`PluginPath`], the search path for generator plugins.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The `PLUGIN_PATH` setting. The generator accepts either a single directory
/// or a list of directories, so both shapes are preserved as written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginPath {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

impl PluginPath {
    /// The search directories in the order they are searched.
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            PluginPath::One(path) => std::slice::from_ref(path),
            PluginPath::Many(paths) => paths,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths().is_empty()
    }
}

impl Default for PluginPath {
    fn default() -> Self {
        PluginPath::Many(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_path() -> Result<(), serde_yaml::Error> {
        let plugin_path: PluginPath = serde_yaml::from_str("./plugins")?;
        assert_eq!(plugin_path.paths(), &[PathBuf::from("./plugins")]);
        Ok(())
    }

    #[test]
    fn test_path_list() -> Result<(), serde_yaml::Error> {
        let plugin_path: PluginPath = serde_yaml::from_str("[./plugins, ../shared]")?;
        assert_eq!(
            plugin_path.paths(),
            &[PathBuf::from("./plugins"), PathBuf::from("../shared")]
        );
        Ok(())
    }

    #[test]
    fn test_default_is_empty() {
        assert!(PluginPath::default().is_empty());
    }
}
