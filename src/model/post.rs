use crate::model::Source;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Publication time used when a page carries no parseable date
pub const EPOCH: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

/// Derives the stable identifier of an item from its source and raw id
///
/// The same `(code_name, raw_id)` pair always yields the same UUID, so an
/// article keeps its identity across crawl runs.
pub fn draft_id(code_name: &str, raw_id: &str) -> Uuid {
    Uuid::new_v5(
        &Uuid::NAMESPACE_URL,
        format!("{}/{}", code_name, raw_id).as_bytes(),
    )
}

/// Partially populated article gathered from one crawl stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub id: Option<Uuid>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub source: Option<Source>,
}

/// Returned when a draft is finalized before every field is known
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Draft is missing required fields: {}", .missing.join(", "))]
pub struct IncompleteDraft {
    pub missing: Vec<&'static str>,
}

impl PostDraft {
    /// Overwrites fields of `self` with every field `other` has set
    ///
    /// Fields `other` leaves empty keep their current value, so merging a
    /// detail-page draft into a listing draft lets the detail data win.
    pub fn merge(&mut self, other: PostDraft) {
        if other.id.is_some() {
            self.id = other.id;
        }
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.content.is_some() {
            self.content = other.content;
        }
        if other.url.is_some() {
            self.url = other.url;
        }
        if other.published_at.is_some() {
            self.published_at = other.published_at;
        }
        if other.source.is_some() {
            self.source = other.source;
        }
    }

    /// Names of the fields that are still unset, in declaration order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.id.is_none() {
            missing.push("id");
        }
        if self.title.is_none() {
            missing.push("title");
        }
        if self.content.is_none() {
            missing.push("content");
        }
        if self.url.is_none() {
            missing.push("url");
        }
        if self.published_at.is_none() {
            missing.push("published_at");
        }
        if self.source.is_none() {
            missing.push("source");
        }
        missing
    }

    /// Finalizes the draft into a post
    ///
    /// # Returns
    ///
    /// * `Ok(Post)` - Every field was present
    /// * `Err(IncompleteDraft)` - Lists exactly the fields that were unset
    pub fn into_post(self) -> Result<Post, IncompleteDraft> {
        match self {
            PostDraft {
                id: Some(id),
                title: Some(title),
                content: Some(content),
                url: Some(canonical_url),
                published_at: Some(published_at),
                source: Some(source),
            } => Ok(Post {
                id,
                title,
                content,
                canonical_url,
                published_at,
                source,
            }),
            draft => Err(IncompleteDraft {
                missing: draft.missing_fields(),
            }),
        }
    }
}

/// Fully populated article ready for persistence
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub canonical_url: String,
    pub published_at: DateTime<Utc>,
    pub source: Source,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.title, self.canonical_url)
    }
}
