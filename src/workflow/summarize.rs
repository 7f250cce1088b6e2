//! Summarize workflow - attach summaries to waiting posts

use crate::model::PostStatus;
use crate::storage::{PostFilter, PostRecord, PostUpdate, Storage};
use crate::workflow::Workflow;
use crate::BriefexError;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors a summarizer can report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummarizeError {
    /// The summarizer refused the content; the post will not be retried
    #[error("Summary refused: {0}")]
    Censored(String),

    #[error("Summary failed: {0}")]
    Failed(String),
}

/// Produces a short summary of article text
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}

/// Counters collected during one summarize run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummarizeReport {
    pub ready: usize,
    pub censored: usize,
    pub retry: usize,

    /// Posts whose status update could not be stored
    pub update_failures: usize,
}

pub struct SummarizeWorkflow {
    storage: Arc<dyn Storage>,
    summarizer: Arc<dyn Summarizer>,
}

impl SummarizeWorkflow {
    pub fn new(storage: Arc<dyn Storage>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            storage,
            summarizer,
        }
    }

    fn waiting_posts(&self) -> Vec<PostRecord> {
        let mut posts = Vec::new();
        for status in [PostStatus::PendingSummary, PostStatus::SummaryRetry] {
            match self.storage.get_posts(&PostFilter::with_status(status)) {
                Ok(found) => posts.extend(found),
                Err(e) => tracing::warn!("Failed to load {} posts: {}", status, e),
            }
        }
        posts
    }
}

#[async_trait]
impl Workflow for SummarizeWorkflow {
    type Report = SummarizeReport;

    async fn run(&self) -> Result<SummarizeReport, BriefexError> {
        let posts = self.waiting_posts();
        let total = posts.len();
        let mut report = SummarizeReport::default();
        tracing::info!("Summarizing {} posts", total);

        for (idx, post) in posts.iter().enumerate() {
            let update = match self.summarizer.summarize(&post.content).await {
                Ok(summary) => {
                    report.ready += 1;
                    PostUpdate {
                        summary: Some(summary),
                        status: Some(PostStatus::SummaryReady),
                        ..Default::default()
                    }
                }
                Err(SummarizeError::Censored(reason)) => {
                    tracing::info!("Post {} censored: {}", post.canonical_url, reason);
                    report.censored += 1;
                    PostUpdate::status(PostStatus::SummaryCensored)
                }
                Err(e) => {
                    tracing::warn!(
                        "Summary {}/{} failed ({}): {}",
                        idx + 1,
                        total,
                        post.canonical_url,
                        e
                    );
                    report.retry += 1;
                    PostUpdate::status(PostStatus::SummaryRetry)
                }
            };

            if let Err(e) = self.storage.update_post(post.id, &update) {
                tracing::error!("Failed to update post {}: {}", post.canonical_url, e);
                report.update_failures += 1;
            }
        }

        tracing::info!(
            "Summarize finished: {} ready, {} censored, {} to retry",
            report.ready,
            report.censored,
            report.retry
        );
        Ok(report)
    }
}
