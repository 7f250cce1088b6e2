//! Storage traits and error types
//!
//! This module defines the repository interfaces for sources and posts and
//! the associated error types. Every call is its own unit of work: it either
//! commits completely or leaves the store untouched.

use crate::model::{PostStatus, Source};
use crate::storage::{
    NewPost, PostFilter, PostRecord, PostUpdate, SourceFilter, SourceRecord, SourceUpdate,
};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A unique constraint rejected the write
    #[error("Duplicate {entity}: {detail}")]
    Duplicate { entity: &'static str, detail: String },

    #[error("Invalid status transition for post {id}: {from} -> {to}")]
    InvalidTransition {
        id: Uuid,
        from: PostStatus,
        to: PostStatus,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StorageError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Repository of configured sources
pub trait SourceStorage: Send + Sync {
    /// Inserts a source; fails with `Duplicate` if its code name or URL exists
    fn add_source(&self, source: &Source) -> StorageResult<SourceRecord>;

    /// Inserts several sources atomically
    fn add_sources(&self, sources: &[Source]) -> StorageResult<Vec<SourceRecord>>;

    fn get_source(&self, id: Uuid) -> StorageResult<SourceRecord>;

    /// Lists sources matching `filter`, ordered by name
    fn get_sources(&self, filter: &SourceFilter) -> StorageResult<Vec<SourceRecord>>;

    fn update_source(&self, id: Uuid, update: &SourceUpdate) -> StorageResult<SourceRecord>;

    /// Deletes a source together with its posts
    fn delete_source(&self, id: Uuid) -> StorageResult<()>;
}

/// Repository of ingested posts
pub trait PostStorage: Send + Sync {
    /// Inserts a post; fails with `Duplicate` if its id or canonical URL exists
    fn add_post(&self, post: &NewPost) -> StorageResult<PostRecord>;

    /// Inserts several posts atomically
    fn add_posts(&self, posts: &[NewPost]) -> StorageResult<Vec<PostRecord>>;

    fn get_post(&self, id: Uuid) -> StorageResult<PostRecord>;

    /// Lists posts matching `filter`, oldest first
    fn get_posts(&self, filter: &PostFilter) -> StorageResult<Vec<PostRecord>>;

    /// Lists posts created within the last `days` days
    fn get_recent_posts(&self, days: u32) -> StorageResult<Vec<PostRecord>>;

    /// Applies a partial update
    ///
    /// A status change must be allowed by `PostStatus::can_transition_to`,
    /// otherwise `InvalidTransition` is returned and nothing is written.
    fn update_post(&self, id: Uuid, update: &PostUpdate) -> StorageResult<PostRecord>;

    fn delete_post(&self, id: Uuid) -> StorageResult<()>;

    fn count_posts_by_status(&self, status: PostStatus) -> StorageResult<u64>;

    fn count_posts(&self) -> StorageResult<u64>;
}

/// Combined repository used by the workflows
pub trait Storage: SourceStorage + PostStorage {}

impl<T: SourceStorage + PostStorage> Storage for T {}
