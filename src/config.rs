//! Defines [`SiteConfiguration`], the settings record handed to the site
//! generator, and the logic for loading it from a `siteconf.yaml` project
//! file. The record is built once and never mutated afterwards; every setting
//! is exposed through its own accessor.

use crate::feed::{self, FeedSetting, Feeds};
use crate::link::Link;
use crate::plugin::PluginPath;
use crate::util::open;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file searched for by
/// [`SiteConfiguration::from_directory`].
pub const PROJECT_FILE: &str = "siteconf.yaml";

/// The environment variable which, when set, overrides the `THEME` setting.
pub const THEME_ENV: &str = "SITECONF_THEME";

/// The number of articles per index page. Zero is rejected when parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// The site's settings, keyed in the project file by the generator's setting
/// names (`AUTHOR`, `SITENAME`, `DEFAULT_PAGINATION`, etc.). Settings that are
/// absent or commented out take the defaults documented on each accessor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct SiteConfiguration {
    author: String,

    #[serde(rename = "SITENAME")]
    site_name: String,

    #[serde(rename = "SITEURL", serialize_with = "serialize_site_url")]
    site_url: Url,

    #[serde(default = "default_path")]
    path: PathBuf,

    #[serde(default = "default_theme")]
    theme: PathBuf,

    #[serde(default = "default_timezone")]
    timezone: String,

    #[serde(default = "default_lang")]
    default_lang: String,

    #[serde(default)]
    feed_all_atom: Option<FeedSetting>,

    #[serde(default)]
    category_feed_atom: Option<FeedSetting>,

    #[serde(default)]
    translation_feed_atom: Option<FeedSetting>,

    #[serde(default)]
    author_feed_atom: Option<FeedSetting>,

    #[serde(default)]
    author_feed_rss: Option<FeedSetting>,

    #[serde(default)]
    links: Vec<Link>,

    #[serde(default)]
    social: Vec<Link>,

    #[serde(default)]
    default_pagination: Option<PageSize>,

    #[serde(default)]
    relative_urls: bool,

    #[serde(default = "default_markup")]
    markup: BTreeSet<String>,

    #[serde(default)]
    plugin_path: PluginPath,

    #[serde(default)]
    plugins: Vec<String>,

    /// The directory containing the project file. Unset when parsed from a
    /// string.
    #[serde(skip)]
    project_root: Option<PathBuf>,
}

fn default_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_theme() -> PathBuf {
    PathBuf::from("notmyidea")
}

fn default_timezone() -> String {
    "UTC".to_owned()
}

fn default_lang() -> String {
    "en".to_owned()
}

fn default_markup() -> BTreeSet<String> {
    let mut markup = BTreeSet::new();
    markup.insert("md".to_owned());
    markup
}

// Themes build URLs as `{{ SITEURL }}/path`, so the generator expects the site
// URL without the trailing slash that `Url` always adds to bare hosts.
fn serialize_site_url<S: Serializer>(
    url: &Url,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(url.as_str().trim_end_matches('/'))
}

impl std::str::FromStr for SiteConfiguration {
    type Err = Error;

    /// Parses a configuration from YAML text. The result has no project root,
    /// so relative paths resolve against the current directory.
    fn from_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).map_err(|err| Error::Parse { path: None, err })
    }
}

impl SiteConfiguration {
    /// Looks for [`PROJECT_FILE`] in `dir` and then in each of its ancestors,
    /// loading the first one found.
    pub fn from_directory(dir: &Path) -> Result<SiteConfiguration> {
        let start = dir.canonicalize().map_err(|err| Error::Open {
            path: dir.to_owned(),
            err,
        })?;
        for ancestor in start.ancestors() {
            let path = ancestor.join(PROJECT_FILE);
            if path.is_file() {
                return SiteConfiguration::from_project_file(&path);
            }
            log::trace!("No {} in '{}'", PROJECT_FILE, ancestor.display());
        }
        Err(Error::NotFound { start })
    }

    /// Loads the configuration at `path`. The file's parent directory becomes
    /// the project root.
    pub fn from_project_file(path: &Path) -> Result<SiteConfiguration> {
        log::debug!("Loading configuration from '{}'", path.display());
        let mut config: SiteConfiguration =
            serde_yaml::from_reader(open(path)?).map_err(|err| Error::Parse {
                path: Some(path.to_owned()),
                err,
            })?;
        config.project_root = Some(match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_owned(),
            _ => PathBuf::from("."),
        });
        Ok(config)
    }

    /// Returns a copy of the configuration using `theme` as the `THEME`
    /// setting.
    pub fn with_theme(self, theme: impl Into<PathBuf>) -> SiteConfiguration {
        SiteConfiguration {
            theme: theme.into(),
            ..self
        }
    }

    /// Applies the value of [`THEME_ENV`], if any. Empty values are ignored so
    /// that `SITECONF_THEME=` leaves the project file's theme in place.
    pub fn with_theme_override(self, theme: Option<String>) -> SiteConfiguration {
        match theme {
            Some(theme) if !theme.trim().is_empty() => {
                log::info!("Using theme '{}' from ${}", theme, THEME_ENV);
                self.with_theme(theme)
            }
            _ => self,
        }
    }

    /// `AUTHOR`: the default author for articles and feeds.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// `SITENAME`
    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// `SITEURL`: the absolute URL the site is published at.
    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    /// `PATH`: the content directory as written. Defaults to `.`.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `THEME`: the theme directory or built-in theme name as written.
    /// Defaults to `notmyidea`.
    pub fn theme(&self) -> &Path {
        &self.theme
    }

    /// `TIMEZONE`: an IANA timezone name. Defaults to `UTC`. The generator
    /// rejects unknown names; no check happens here.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// `DEFAULT_LANG`. Defaults to `en`.
    pub fn default_lang(&self) -> &str {
        &self.default_lang
    }

    /// The feed settings. Every feed is disabled unless configured.
    pub fn feeds(&self) -> Feeds<'_> {
        fn pattern<'a>(
            setting: &'a Option<FeedSetting>,
            default: &'static str,
        ) -> Option<&'a str> {
            setting.as_ref().and_then(|setting| setting.pattern(default))
        }

        Feeds {
            all_atom: pattern(&self.feed_all_atom, feed::DEFAULT_ALL_ATOM),
            category_atom: pattern(&self.category_feed_atom, feed::DEFAULT_CATEGORY_ATOM),
            translation_atom: pattern(
                &self.translation_feed_atom,
                feed::DEFAULT_TRANSLATION_ATOM,
            ),
            author_atom: pattern(&self.author_feed_atom, feed::DEFAULT_AUTHOR_ATOM),
            author_rss: pattern(&self.author_feed_rss, feed::DEFAULT_AUTHOR_RSS),
        }
    }

    /// `LINKS`: the blogroll, in order. Defaults to empty.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// `SOCIAL`: the social widget links, in order. Defaults to empty.
    pub fn social(&self) -> &[Link] {
        &self.social
    }

    /// `DEFAULT_PAGINATION`: articles per index page, or `None` when
    /// pagination is disabled.
    pub fn pagination(&self) -> Option<usize> {
        self.default_pagination.map(PageSize::get)
    }

    /// `RELATIVE_URLS`. Defaults to `false`.
    pub fn relative_urls(&self) -> bool {
        self.relative_urls
    }

    /// `MARKUP`: the file formats the generator reads content from. Defaults
    /// to `md` only.
    pub fn markup(&self) -> &BTreeSet<String> {
        &self.markup
    }

    /// `PLUGIN_PATH` as written.
    pub fn plugin_path(&self) -> &PluginPath {
        &self.plugin_path
    }

    /// `PLUGINS`: plugin identifiers in load order.
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    /// The directory relative settings are resolved against.
    pub fn project_root(&self) -> &Path {
        self.project_root
            .as_deref()
            .unwrap_or_else(|| Path::new("."))
    }

    /// `PATH` resolved against the project root.
    pub fn content_directory(&self) -> PathBuf {
        self.project_root().join(&self.path)
    }

    /// `THEME` resolved against the project root.
    pub fn theme_directory(&self) -> PathBuf {
        self.project_root().join(&self.theme)
    }

    /// `PLUGIN_PATH` entries resolved against the project root.
    pub fn plugin_directories(&self) -> Vec<PathBuf> {
        self.plugin_path
            .paths()
            .iter()
            .map(|path| self.project_root().join(path))
            .collect()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem loading or rendering a [`SiteConfiguration`].
#[derive(Debug)]
pub enum Error {
    /// Returned when the project file (or the directory to search from)
    /// can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned for malformed YAML and for values of the wrong shape,
    /// including duplicate or unknown settings.
    Parse {
        path: Option<PathBuf>,
        err: serde_yaml::Error,
    },

    /// Returned when no ancestor of `start` contains a project file.
    NotFound { start: PathBuf },

    /// Returned when the settings can't be rendered as YAML.
    Serialize(serde_yaml::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => write!(f, "Opening '{}': {}", path.display(), err),
            Error::Parse {
                path: Some(path),
                err,
            } => write!(f, "Parsing configuration '{}': {}", path.display(), err),
            Error::Parse { path: None, err } => write!(f, "Parsing configuration: {}", err),
            Error::NotFound { start } => write!(
                f,
                "Could not find `{}` in '{}' or any parent directory",
                PROJECT_FILE,
                start.display()
            ),
            Error::Serialize(err) => write!(f, "Rendering settings: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::Parse { path: _, err } => Some(err),
            Error::NotFound { start: _ } => None,
            Error::Serialize(err) => Some(err),
        }
    }
}
