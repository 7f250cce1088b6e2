//! Crawler module for fetching and extracting articles
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry and backoff
//! - Layout-driven HTML parsing into drafts
//! - Registries selecting fetchers and parsers per source
//! - Per-source crawl coordination

mod coordinator;
mod error;
mod fetcher;
mod layout;
mod parser;
mod registry;

pub use coordinator::{Crawl, Crawler};
pub use error::{CrawlError, FetchError, ParseError, TRANSIENT_STATUSES};
pub use fetcher::{
    backoff_delay, build_http_client, parse_retry_after, Fetcher, HtmlFetcher,
    DEFAULT_USER_AGENTS,
};
pub use layout::{builtin_layouts, HtmlLayout};
pub use parser::{clean_text, parse_datetime, HtmlParser, Parser};
pub use registry::{FetcherFactory, FetcherRegistry, ParserFactory, ParserRegistry};
