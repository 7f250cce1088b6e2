//! Briefex: a news crawl-and-ingest pipeline
//!
//! This crate turns configured web sources into deduplicated posts: it fetches
//! listing pages, parses article cards, follows each card to its detail page,
//! merges the two partial drafts and persists the finished posts for a
//! downstream summarization stage.

pub mod config;
pub mod container;
pub mod crawler;
pub mod model;
pub mod output;
pub mod storage;
pub mod url;
pub mod workflow;

use thiserror::Error;

/// Main error type for Briefex operations
#[derive(Debug, Error)]
pub enum BriefexError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Crawl error: {0}")]
    Crawl(#[from] crawler::CrawlError),

    #[error("Run exceeded time limit of {limit_secs}s")]
    Timeout { limit_secs: u64 },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

// Re-export commonly used types
pub use config::Config;
pub use model::{Post, PostDraft, PostStatus, Source, SourceType};
pub use url::{canonicalize_url, validate_url};
