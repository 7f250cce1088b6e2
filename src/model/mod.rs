//! Domain model for the ingest pipeline
//!
//! Sources are read-only configuration, drafts accumulate partial article
//! data across the listing and detail stages, and posts are the finalized
//! records handed to storage together with a processing status.

mod post;
mod source;
mod status;

pub use post::{draft_id, IncompleteDraft, Post, PostDraft, EPOCH};
pub use source::{Source, SourceType};
pub use status::PostStatus;
