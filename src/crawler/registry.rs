//! Registries mapping sources to fetcher and parser implementations
//!
//! Both registries are built once at startup and never mutated afterwards.
//! Looking up an unregistered key is a configuration error.

use crate::config::CrawlerConfig;
use crate::crawler::error::CrawlError;
use crate::crawler::fetcher::{Fetcher, HtmlFetcher};
use crate::crawler::layout::{builtin_layouts, HtmlLayout};
use crate::crawler::parser::{HtmlParser, Parser};
use crate::model::{Source, SourceType};
use std::collections::HashMap;
use std::sync::Arc;

/// Builds a fresh fetcher for one crawl
pub type FetcherFactory =
    Arc<dyn Fn(&CrawlerConfig) -> Result<Box<dyn Fetcher>, CrawlError> + Send + Sync>;

/// Builds a parser bound to one source
pub type ParserFactory = Arc<dyn Fn(&Source) -> Result<Box<dyn Parser>, CrawlError> + Send + Sync>;

/// Fetcher factories keyed by source type
pub struct FetcherRegistry {
    config: CrawlerConfig,
    factories: HashMap<SourceType, FetcherFactory>,
}

impl FetcherRegistry {
    /// Creates an empty registry
    pub fn new(config: CrawlerConfig) -> Self {
        Self {
            config,
            factories: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in HTML fetcher
    ///
    /// RSS sources have no fetcher and fail with a configuration error.
    pub fn with_defaults(config: CrawlerConfig) -> Self {
        Self::new(config).register(
            SourceType::Html,
            Arc::new(|config: &CrawlerConfig| -> Result<Box<dyn Fetcher>, CrawlError> {
                let fetcher = HtmlFetcher::new(config).map_err(|e| CrawlError::Configuration {
                    stage: "fetcher",
                    issue: format!("failed to build HTTP client: {}", e),
                })?;
                Ok(Box::new(fetcher) as Box<dyn Fetcher>)
            }),
        )
    }

    /// Registers a factory for `source_type`, replacing any previous one
    pub fn register(mut self, source_type: SourceType, factory: FetcherFactory) -> Self {
        self.factories.insert(source_type, factory);
        self
    }

    /// Builds a fetcher for `source_type`
    pub fn create(&self, source_type: SourceType) -> Result<Box<dyn Fetcher>, CrawlError> {
        let factory = self
            .factories
            .get(&source_type)
            .ok_or_else(|| CrawlError::Configuration {
                stage: "fetcher",
                issue: format!("no fetcher registered for source type {}", source_type),
            })?;
        factory(&self.config)
    }

    pub fn contains(&self, source_type: SourceType) -> bool {
        self.factories.contains_key(&source_type)
    }
}

/// Parser factories keyed by source code name
#[derive(Default)]
pub struct ParserRegistry {
    factories: HashMap<String, ParserFactory>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in layout
    pub fn with_builtin_layouts() -> Self {
        builtin_layouts()
            .into_iter()
            .fold(Self::new(), |registry, layout| registry.register_layout(layout))
    }

    /// Registers a parser factory under `code_name`, replacing any previous one
    pub fn register(mut self, code_name: impl Into<String>, factory: ParserFactory) -> Self {
        self.factories.insert(code_name.into(), factory);
        self
    }

    /// Registers an HTML parser driven by `layout`
    pub fn register_layout(self, layout: HtmlLayout) -> Self {
        let code_name = layout.code_name.clone();
        self.register(
            code_name,
            Arc::new(move |source: &Source| -> Result<Box<dyn Parser>, CrawlError> {
                Ok(Box::new(HtmlParser::new(source, &layout)?) as Box<dyn Parser>)
            }),
        )
    }

    /// Builds the parser bound to `source`
    pub fn create(&self, source: &Source) -> Result<Box<dyn Parser>, CrawlError> {
        let factory =
            self.factories
                .get(&source.code_name)
                .ok_or_else(|| CrawlError::Configuration {
                    stage: "parser",
                    issue: format!("no parser registered for code name '{}'", source.code_name),
                })?;
        factory(source)
    }

    /// Registered code names, sorted
    pub fn code_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
