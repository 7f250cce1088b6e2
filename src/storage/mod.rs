//! Storage module for persisting sources and posts
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Source and post persistence with uniqueness enforcement
//! - Status transitions of posts
//! - Time-window queries used for deduplication

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{PostStorage, SourceStorage, Storage, StorageError, StorageResult};

use crate::model::{Post, PostStatus, Source, SourceType};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Represents a source in the database
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    pub id: Uuid,
    pub source: Source,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Represents a post in the database
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub canonical_url: String,
    pub status: PostStatus,
    pub source_id: Uuid,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub canonical_url: String,
    pub status: PostStatus,
    pub source_id: Uuid,
    pub published_at: DateTime<Utc>,
}

impl NewPost {
    /// Prepares a freshly crawled post, waiting for its summary
    pub fn from_post(post: &Post, source_id: Uuid) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            canonical_url: post.canonical_url.clone(),
            status: PostStatus::PendingSummary,
            source_id,
            published_at: post.published_at,
        }
    }
}

/// Criteria for listing sources; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct SourceFilter {
    pub source_type: Option<SourceType>,
    pub code_name: Option<String>,
}

/// Criteria for listing posts; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub source_id: Option<Uuid>,
    pub canonical_url: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl PostFilter {
    pub fn with_status(status: PostStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Partial update of a source
#[derive(Debug, Clone, Default)]
pub struct SourceUpdate {
    pub name: Option<String>,
    pub source_type: Option<SourceType>,
    pub url: Option<String>,
}

/// Partial update of a post
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub status: Option<PostStatus>,
}

impl PostUpdate {
    pub fn status(status: PostStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
