//! Ingest workflow - crawl, deduplicate and persist
//!
//! The workflow builds a dedupe fence from recently stored posts, crawls every
//! stored source one after another, filters the crawled posts and only then
//! writes the survivors as `PendingSummary`.

use crate::crawler::Crawl;
use crate::model::Post;
use crate::storage::{NewPost, SourceFilter, SourceRecord, Storage};
use crate::workflow::Workflow;
use crate::BriefexError;
use async_trait::async_trait;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Counters collected during one ingest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Sources enumerated from storage
    pub sources: usize,

    /// Sources whose crawl failed and were skipped
    pub failed_sources: usize,

    /// Posts returned by the crawler across all sources
    pub crawled: usize,

    /// Posts dropped because their content was blank
    pub empty: usize,

    /// Posts dropped as repeats within one source's batch
    pub batch_duplicates: usize,

    /// Posts dropped because they were stored within the lookback window
    pub already_known: usize,

    /// Posts written to storage
    pub persisted: usize,

    /// Posts rejected by a uniqueness constraint at write time
    pub duplicates: usize,

    /// Posts that failed to persist for any other reason
    pub persist_failures: usize,
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Sources: {} crawled, {} failed",
            self.sources - self.failed_sources,
            self.failed_sources
        )?;
        writeln!(f, "Posts crawled: {}", self.crawled)?;
        writeln!(
            f,
            "Dropped: {} empty, {} repeated in batch, {} already known",
            self.empty, self.batch_duplicates, self.already_known
        )?;
        write!(
            f,
            "Persisted: {} ({} duplicates, {} failures)",
            self.persisted, self.duplicates, self.persist_failures
        )
    }
}

/// Crawls all stored sources and persists posts not seen recently
pub struct IngestWorkflow {
    crawler: Arc<dyn Crawl>,
    storage: Arc<dyn Storage>,
    lookback_days: u32,
}

impl IngestWorkflow {
    pub fn new(crawler: Arc<dyn Crawl>, storage: Arc<dyn Storage>, lookback_days: u32) -> Self {
        Self {
            crawler,
            storage,
            lookback_days,
        }
    }

    /// Canonical URLs of posts created within the lookback window
    fn load_fence(&self) -> Result<HashSet<String>, BriefexError> {
        let fence: HashSet<String> = self
            .storage
            .get_recent_posts(self.lookback_days)?
            .into_iter()
            .map(|post| post.canonical_url)
            .collect();

        tracing::info!(
            "Dedupe fence holds {} URLs from the last {} days",
            fence.len(),
            self.lookback_days
        );
        Ok(fence)
    }

    /// Filters one source's batch, appending survivors to `pending`
    fn filter_batch(
        &self,
        record: &SourceRecord,
        posts: Vec<Post>,
        fence: &HashSet<String>,
        pending: &mut Vec<NewPost>,
        report: &mut IngestReport,
    ) {
        let mut batch_urls = HashSet::new();

        for post in posts {
            if post.content.trim().is_empty() {
                tracing::debug!("Dropping post with empty content: {}", post.canonical_url);
                report.empty += 1;
                continue;
            }

            if !batch_urls.insert(post.canonical_url.clone()) {
                tracing::info!(
                    "Dropping repeated post in batch of {}: {}",
                    record.source,
                    post.canonical_url
                );
                report.batch_duplicates += 1;
                continue;
            }

            if fence.contains(&post.canonical_url) {
                tracing::debug!("Already known: {}", post.canonical_url);
                report.already_known += 1;
                continue;
            }

            pending.push(NewPost::from_post(&post, record.id));
        }
    }

    fn persist(&self, pending: &[NewPost], report: &mut IngestReport) {
        for post in pending {
            match self.storage.add_post(post) {
                Ok(_) => report.persisted += 1,
                Err(e) if e.is_duplicate() => {
                    tracing::warn!("Skipping duplicate post {}: {}", post.canonical_url, e);
                    report.duplicates += 1;
                }
                Err(e) => {
                    tracing::error!("Failed to persist post {}: {}", post.canonical_url, e);
                    report.persist_failures += 1;
                }
            }
        }
    }
}

#[async_trait]
impl Workflow for IngestWorkflow {
    type Report = IngestReport;

    async fn run(&self) -> Result<IngestReport, BriefexError> {
        let fence = self.load_fence()?;
        let sources = self.storage.get_sources(&SourceFilter::default())?;

        let mut report = IngestReport {
            sources: sources.len(),
            ..Default::default()
        };
        tracing::info!("Ingesting from {} sources", sources.len());

        let mut pending = Vec::new();
        for record in &sources {
            let posts = match self.crawler.crawl(&record.source).await {
                Ok(posts) => posts,
                Err(e) if e.is_configuration() => {
                    tracing::error!("Aborting ingest: {}", e);
                    return Err(e.into());
                }
                Err(e) => {
                    tracing::error!("Skipping source {}: {}", record.source, e);
                    report.failed_sources += 1;
                    continue;
                }
            };

            report.crawled += posts.len();
            self.filter_batch(record, posts, &fence, &mut pending, &mut report);
        }

        tracing::info!("Persisting {} new posts", pending.len());
        self.persist(&pending, &mut report);

        tracing::info!(
            "Ingest finished: {} persisted, {} sources failed",
            report.persisted,
            report.failed_sources
        );
        Ok(report)
    }
}
