//! Composition root
//!
//! `Container` is built once from a validated `Config` and hands out the
//! shared storage, registries and workflows. Nothing here is global.

use crate::config::Config;
use crate::crawler::{Crawler, FetcherRegistry, ParserRegistry};
use crate::storage::{SourceStorage, SqliteStorage};
use crate::workflow::{CleanWorkflow, IngestWorkflow, SummarizeWorkflow, Summarizer};
use crate::BriefexError;
use std::path::Path;
use std::sync::Arc;

pub struct Container {
    pub config: Config,
    pub storage: Arc<SqliteStorage>,
    pub parsers: Arc<ParserRegistry>,
    pub crawler: Arc<Crawler>,
}

impl Container {
    /// Opens the configured database and wires up the crawler
    ///
    /// # Arguments
    ///
    /// * `config` - A validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Container)` - Ready to run workflows
    /// * `Err(BriefexError)` - The database could not be opened
    pub fn from_config(config: Config) -> Result<Self, BriefexError> {
        let storage = SqliteStorage::new(Path::new(&config.database.path))?;
        Ok(Self::with_storage(config, Arc::new(storage)))
    }

    /// Wires up the crawler around an already opened store
    pub fn with_storage(config: Config, storage: Arc<SqliteStorage>) -> Self {
        let fetchers = Arc::new(FetcherRegistry::with_defaults(config.crawler.clone()));

        let parsers = config
            .layouts
            .iter()
            .cloned()
            .fold(ParserRegistry::with_builtin_layouts(), |registry, layout| {
                registry.register_layout(layout)
            });
        let parsers = Arc::new(parsers);

        let crawler = Arc::new(Crawler::new(fetchers, Arc::clone(&parsers)));

        Self {
            config,
            storage,
            parsers,
            crawler,
        }
    }

    /// Inserts every configured source that is not stored yet
    ///
    /// Returns the number of newly inserted sources.
    pub fn seed_sources(&self) -> Result<usize, BriefexError> {
        let mut inserted = 0;

        for source in &self.config.sources {
            match self.storage.add_source(source) {
                Ok(record) => {
                    tracing::info!("Registered source {} ({})", source, record.id);
                    inserted += 1;
                }
                Err(e) if e.is_duplicate() => {
                    tracing::debug!("Source {} already registered", source);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(inserted)
    }

    pub fn ingest_workflow(&self) -> IngestWorkflow {
        IngestWorkflow::new(
            self.crawler.clone(),
            self.storage.clone(),
            self.config.crawler.lookback_days,
        )
    }

    pub fn summarize_workflow(&self, summarizer: Arc<dyn Summarizer>) -> SummarizeWorkflow {
        SummarizeWorkflow::new(self.storage.clone(), summarizer)
    }

    pub fn clean_workflow(&self) -> CleanWorkflow {
        CleanWorkflow::new(self.storage.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::storage::SourceFilter;

    const CONFIG: &str = r#"
[database]
path = ":memory:"

[[source]]
name = "RT"
code-name = "rt::html"
type = "HTML"
url = "https://russian.rt.com/news"

[[source]]
name = "Example"
code-name = "example::html"
type = "HTML"
url = "https://example.com/news"

[[layout]]
code-name = "example::html"
card = "div.card"
card-link = "a"
article = "article"
datetime-format = "%Y-%m-%d"
"#;

    fn container() -> Container {
        let config = parse_config(CONFIG).unwrap();
        Container::with_storage(config, Arc::new(SqliteStorage::new_in_memory().unwrap()))
    }

    #[test]
    fn test_seed_sources_is_idempotent() {
        let container = container();

        assert_eq!(container.seed_sources().unwrap(), 2);
        assert_eq!(container.seed_sources().unwrap(), 0);

        let stored = container
            .storage
            .get_sources(&SourceFilter::default())
            .unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn test_config_layouts_are_registered() {
        let container = container();
        let code_names = container.parsers.code_names();

        assert!(code_names.contains(&"rt::html"));
        assert!(code_names.contains(&"example::html"));
    }
}
