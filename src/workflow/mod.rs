//! Workflows driving posts through their lifecycle
//!
//! Each workflow is one pass over storage:
//! - `IngestWorkflow` crawls every stored source and persists new posts
//! - `SummarizeWorkflow` attaches summaries to posts waiting for one
//! - `CleanWorkflow` removes posts the summarizer refused

mod clean;
mod ingest;
mod summarize;

pub use clean::{CleanReport, CleanWorkflow};
pub use ingest::{IngestReport, IngestWorkflow};
pub use summarize::{SummarizeError, SummarizeReport, SummarizeWorkflow, Summarizer};

use crate::BriefexError;
use async_trait::async_trait;
use std::time::Duration;

/// A single pass of work over storage
#[async_trait]
pub trait Workflow: Send + Sync {
    /// Counters describing what the pass did
    type Report: Send;

    async fn run(&self) -> Result<Self::Report, BriefexError>;
}

/// Runs `workflow` once, failing with `BriefexError::Timeout` after `limit`
pub async fn run_with_limit<W: Workflow + ?Sized>(
    workflow: &W,
    limit: Duration,
) -> Result<W::Report, BriefexError> {
    match tokio::time::timeout(limit, workflow.run()).await {
        Ok(result) => result,
        Err(_) => Err(BriefexError::Timeout {
            limit_secs: limit.as_secs(),
        }),
    }
}
