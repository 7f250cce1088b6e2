//! Clean workflow - delete censored posts

use crate::model::PostStatus;
use crate::storage::{PostFilter, Storage};
use crate::workflow::Workflow;
use crate::BriefexError;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub deleted: usize,
    pub failures: usize,
}

/// Removes every post in `SummaryCensored`
pub struct CleanWorkflow {
    storage: Arc<dyn Storage>,
}

impl CleanWorkflow {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl Workflow for CleanWorkflow {
    type Report = CleanReport;

    async fn run(&self) -> Result<CleanReport, BriefexError> {
        let censored = self
            .storage
            .get_posts(&PostFilter::with_status(PostStatus::SummaryCensored))?;
        let mut report = CleanReport::default();

        for post in &censored {
            match self.storage.delete_post(post.id) {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    tracing::warn!("Failed to delete post {}: {}", post.canonical_url, e);
                    report.failures += 1;
                }
            }
        }

        tracing::info!("Clean finished: {} censored posts deleted", report.deleted);
        Ok(report)
    }
}
