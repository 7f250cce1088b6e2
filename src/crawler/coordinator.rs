//! Crawler coordinator - per-source crawl orchestration
//!
//! A crawl fetches the listing page of a source, parses it into drafts, then
//! completes every draft from its detail page. Failures of a single draft
//! are logged and the draft is dropped; failures before the per-draft stage
//! fail the whole source.

use crate::crawler::error::CrawlError;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::Parser;
use crate::crawler::registry::{FetcherRegistry, ParserRegistry};
use crate::model::{IncompleteDraft, Post, PostDraft, Source};
use async_trait::async_trait;
use std::sync::Arc;

/// Turns one source into finished posts
#[async_trait]
pub trait Crawl: Send + Sync {
    async fn crawl(&self, source: &Source) -> Result<Vec<Post>, CrawlError>;
}

/// Registry-backed crawler
///
/// A fresh fetcher and parser are built for every crawl, and the fetcher is
/// closed on every exit path.
pub struct Crawler {
    fetchers: Arc<FetcherRegistry>,
    parsers: Arc<ParserRegistry>,
}

impl Crawler {
    pub fn new(fetchers: Arc<FetcherRegistry>, parsers: Arc<ParserRegistry>) -> Self {
        Self { fetchers, parsers }
    }

    async fn crawl_with(
        &self,
        source: &Source,
        fetcher: &dyn Fetcher,
        parser: &dyn Parser,
    ) -> Result<Vec<Post>, CrawlError> {
        let listing = fetcher.fetch(&source.url).await?;
        let drafts = parser.parse_many(&listing)?;

        let total = drafts.len();
        let mut posts = Vec::with_capacity(total);

        for (idx, draft) in drafts.into_iter().enumerate() {
            let url = draft.url.clone().unwrap_or_default();
            tracing::debug!("Processing draft {}/{}: {}", idx + 1, total, url);

            match complete_draft(fetcher, parser, draft).await {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Dropping draft {}/{} ({}): {}", idx + 1, total, url, e)
                }
            }
        }

        tracing::info!(
            "Crawl of {} finished: {} drafts, {} succeeded, {} failed",
            source,
            total,
            posts.len(),
            total - posts.len()
        );
        Ok(posts)
    }
}

/// Fetches the detail page of a draft, merges it in and finalizes the post
async fn complete_draft(
    fetcher: &dyn Fetcher,
    parser: &dyn Parser,
    mut draft: PostDraft,
) -> Result<Post, CrawlError> {
    let url = draft.url.clone().ok_or_else(|| IncompleteDraft {
        missing: vec!["url"],
    })?;

    let detail = fetcher.fetch(&url).await?;
    draft.merge(parser.parse_one(&detail)?);
    Ok(draft.into_post()?)
}

#[async_trait]
impl Crawl for Crawler {
    async fn crawl(&self, source: &Source) -> Result<Vec<Post>, CrawlError> {
        tracing::info!("Crawling {} from {}", source, source.url);

        let mut fetcher = self
            .fetchers
            .create(source.source_type)
            .map_err(|e| CrawlError::for_source(source, e))?;

        let result = match self.parsers.create(source) {
            Ok(parser) => {
                self.crawl_with(source, fetcher.as_ref(), parser.as_ref())
                    .await
            }
            Err(e) => Err(e),
        };

        fetcher.close();
        result.map_err(|e| CrawlError::for_source(source, e))
    }
}
