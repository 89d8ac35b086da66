//! Feed settings. Each feed setting is either a flag or the output path
//! pattern the generator writes that feed to. A feed is disabled when its
//! setting is absent, `null`, `false` or empty; `true` enables it at the
//! generator's default path.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ALL_ATOM: &str = "feeds/all.atom.xml";
pub const DEFAULT_CATEGORY_ATOM: &str = "feeds/{slug}.atom.xml";
pub const DEFAULT_TRANSLATION_ATOM: &str = "feeds/all-{lang}.atom.xml";
pub const DEFAULT_AUTHOR_ATOM: &str = "feeds/{slug}.atom.xml";
pub const DEFAULT_AUTHOR_RSS: &str = "feeds/{slug}.rss.xml";

/// A single feed setting as written in the project file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedSetting {
    /// `true` or `false`.
    Toggle(bool),

    /// An output path pattern such as `feeds/{slug}.atom.xml`.
    Pattern(String),
}

impl FeedSetting {
    /// The path pattern the feed is written to, or `None` if the feed is
    /// disabled. `default` is used when the feed is simply switched on.
    pub fn pattern<'a>(&'a self, default: &'static str) -> Option<&'a str> {
        match self {
            FeedSetting::Toggle(false) => None,
            FeedSetting::Toggle(true) => Some(default),
            FeedSetting::Pattern(pattern) if pattern.trim().is_empty() => None,
            FeedSetting::Pattern(pattern) => Some(pattern),
        }
    }
}

/// The five feed toggles as they appear in a [`crate::config::SiteConfiguration`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Feeds<'a> {
    pub all_atom: Option<&'a str>,
    pub category_atom: Option<&'a str>,
    pub translation_atom: Option<&'a str>,
    pub author_atom: Option<&'a str>,
    pub author_rss: Option<&'a str>,
}

impl<'a> Feeds<'a> {
    /// Returns every feed setting paired with its setting name, in the order
    /// the settings are declared.
    pub fn settings(&self) -> [(&'static str, Option<&'a str>); 5] {
        [
            ("FEED_ALL_ATOM", self.all_atom),
            ("CATEGORY_FEED_ATOM", self.category_atom),
            ("TRANSLATION_FEED_ATOM", self.translation_atom),
            ("AUTHOR_FEED_ATOM", self.author_atom),
            ("AUTHOR_FEED_RSS", self.author_rss),
        ]
    }

    /// Returns the enabled feeds as `(setting name, path pattern)` pairs.
    pub fn enabled(&self) -> Vec<(&'static str, &'a str)> {
        self.settings()
            .iter()
            .filter_map(|(name, pattern)| match pattern {
                Some(pattern) if !pattern.trim().is_empty() => Some((*name, *pattern)),
                _ => None,
            })
            .collect()
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_patterns() -> Result<(), serde_yaml::Error> {
        let off: FeedSetting = serde_yaml::from_str("false")?;
        let on: FeedSetting = serde_yaml::from_str("true")?;
        let quoted: FeedSetting = serde_yaml::from_str("'false'")?;
        let custom: FeedSetting = serde_yaml::from_str("feeds/everything.xml")?;
        assert_eq!(off, FeedSetting::Toggle(false));
        assert_eq!(off.pattern(DEFAULT_ALL_ATOM), None);
        assert_eq!(on.pattern(DEFAULT_ALL_ATOM), Some(DEFAULT_ALL_ATOM));
        assert_eq!(quoted.pattern(DEFAULT_ALL_ATOM), Some("false"));
        assert_eq!(custom.pattern(DEFAULT_ALL_ATOM), Some("feeds/everything.xml"));
        assert_eq!(
            FeedSetting::Pattern(" ".to_owned()).pattern(DEFAULT_ALL_ATOM),
            None
        );
        Ok(())
    }

    #[test]
    fn test_default_is_disabled() {
        let feeds = Feeds::default();
        assert!(!feeds.any_enabled());
        assert!(feeds.settings().iter().all(|(_, p)| p.is_none()));
    }

    #[test]
    fn test_empty_pattern_is_disabled() {
        let feeds = Feeds {
            all_atom: Some(""),
            author_rss: Some("feeds/{slug}.rss.xml"),
            ..Feeds::default()
        };
        assert_eq!(
            feeds.enabled(),
            vec![("AUTHOR_FEED_RSS", "feeds/{slug}.rss.xml")]
        );
    }

    #[test]
    fn test_enabled_keeps_declaration_order() {
        let feeds = Feeds {
            all_atom: Some("feeds/all.atom.xml"),
            category_atom: Some("feeds/{slug}.atom.xml"),
            translation_atom: None,
            author_atom: Some("feeds/{slug}.atom.xml"),
            author_rss: None,
        };
        let names: Vec<&str> = feeds.enabled().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["FEED_ALL_ATOM", "CATEGORY_FEED_ATOM", "AUTHOR_FEED_ATOM"]
        );
    }
}
