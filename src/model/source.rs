use serde::Deserialize;
use std::fmt;

/// Kind of a source, which selects the fetcher used for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SourceType {
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "RSS")]
    Rss,
}

impl SourceType {
    /// Converts the source type to its database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Rss => "RSS",
        }
    }

    /// Parses a source type from its database string representation
    ///
    /// Returns None if the string doesn't match any known type.
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "HTML" => Some(Self::Html),
            "RSS" => Some(Self::Rss),
            _ => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}

/// A configured news source
///
/// `code_name` selects the parser and `source_type` selects the fetcher.
/// The pipeline never mutates a source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    /// Human-readable name
    pub name: String,

    /// Unique key binding the source to a parser layout (e.g. "rt::html")
    #[serde(rename = "code-name")]
    pub code_name: String,

    #[serde(rename = "type")]
    pub source_type: SourceType,

    /// Listing page to crawl
    pub url: String,
}

impl Source {
    pub fn new(
        name: impl Into<String>,
        code_name: impl Into<String>,
        source_type: SourceType,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code_name: code_name.into(),
            source_type,
            url: url.into(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code_name)
    }
}
