//! Error types for fetching, parsing and crawling
//!
//! Each kind maps to a handling policy: invalid input and permanent HTTP
//! failures are returned immediately, transient failures are retried by the
//! fetcher, content and structure problems skip a single item, and
//! configuration errors abort the whole run.

use crate::model::{IncompleteDraft, Source};
use std::time::Duration;
use thiserror::Error;

/// HTTP status codes worth another attempt
pub const TRANSIENT_STATUSES: [u16; 6] = [429, 500, 501, 502, 503, 504];

/// Errors raised while fetching a URL
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid source URL '{url}': {issue}")]
    InvalidSource { url: String, issue: String },

    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout {
        url: String,
        timeout: Duration,
        #[source]
        source: reqwest::Error,
    },

    #[error("Connection to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Http {
        url: String,
        status: u16,
        /// Server-provided delay from a `Retry-After` header
        retry_after: Option<Duration>,
    },

    #[error("Source not found: {url}")]
    NotFound { url: String },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Fetcher is closed")]
    Closed,
}

impl FetchError {
    /// Returns true if the failure may go away on another attempt
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } => true,
            Self::Http { status, .. } => TRANSIENT_STATUSES.contains(status),
            _ => false,
        }
    }

    /// Delay requested by the server, if any
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Http { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Errors raised while extracting drafts from a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The payload itself is empty or unusable
    #[error("Content error for {url}: {issue}")]
    Content { url: String, issue: String },

    /// An element the layout requires is missing
    #[error("Structure error for {url}: {issue}")]
    Structure { url: String, issue: String },

    #[error("Parse error for {url}: {issue}")]
    Other { url: String, issue: String },
}

impl ParseError {
    /// Returns true if the page layout no longer matches the parser
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structure { .. })
    }
}

/// Errors raised by the crawler for one source
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Missing fetcher or parser, or an unusable layout
    #[error("Configuration error in {stage}: {issue}")]
    Configuration { stage: &'static str, issue: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Incomplete(#[from] IncompleteDraft),

    /// A source-level failure, tagged with the source it happened on
    #[error("Crawl of {origin} failed: {cause}")]
    Source {
        origin: Box<Source>,
        #[source]
        cause: Box<CrawlError>,
    },
}

impl CrawlError {
    /// Wraps an error with the source it originated from
    pub fn for_source(source: &Source, cause: CrawlError) -> Self {
        Self::Source {
            origin: Box::new(source.clone()),
            cause: Box::new(cause),
        }
    }

    /// Returns true if the error stems from a setup problem
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Configuration { .. } => true,
            Self::Source { cause, .. } => cause.is_configuration(),
            _ => false,
        }
    }
}
