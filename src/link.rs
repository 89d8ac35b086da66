//! Defines the [`Link`] type, an entry in the `LINKS` (blogroll) or `SOCIAL`
//! settings.

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// A labeled link. In the project file a link is written as a two-element
/// sequence, `[label, url]`, which matches the pair shape the generator's
/// themes iterate over. Neither element may be empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(String, String)", into = "(String, String)")]
pub struct Link {
    label: String,
    url: String,
}

impl Link {
    /// Constructs a new link, failing if either component is empty.
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Result<Link, EmptyLinkField> {
        Link::try_from((label.into(), url.into()))
    }

    /// The text shown for the link.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The link target. This is kept as written; blogroll entries are often
    /// placeholders like `#` rather than absolute URLs.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TryFrom<(String, String)> for Link {
    type Error = EmptyLinkField;

    fn try_from((label, url): (String, String)) -> Result<Link, EmptyLinkField> {
        if label.trim().is_empty() {
            return Err(EmptyLinkField::Label);
        }
        if url.trim().is_empty() {
            return Err(EmptyLinkField::Url { label });
        }
        Ok(Link { label, url })
    }
}

impl From<Link> for (String, String) {
    fn from(link: Link) -> (String, String) {
        (link.label, link.url)
    }
}

impl PartialEq<(&str, &str)> for Link {
    fn eq(&self, (label, url): &(&str, &str)) -> bool {
        self.label == *label && self.url == *url
    }
}

/// Returned when a link is missing its label or its URL.
#[derive(Debug, PartialEq, Eq)]
pub enum EmptyLinkField {
    /// The label was empty or only whitespace.
    Label,

    /// The URL was empty or only whitespace.
    Url { label: String },
}

impl fmt::Display for EmptyLinkField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EmptyLinkField::Label => write!(f, "link label must not be empty"),
            EmptyLinkField::Url { label } => {
                write!(f, "link '{}' must have a non-empty URL", label)
            }
        }
    }
}

impl std::error::Error for EmptyLinkField {}
