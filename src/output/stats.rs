//! Statistics generation from the post database
//!
//! This module provides functionality for extracting and displaying
//! ingest statistics from the storage layer.

use crate::model::PostStatus;
use crate::storage::{SourceFilter, Storage};
use crate::BriefexError;

/// Post statistics summary
#[derive(Debug, Clone)]
pub struct PostStatistics {
    /// Number of registered sources
    pub total_sources: usize,

    /// Total number of stored posts
    pub total_posts: u64,

    /// Count of posts by status, in lifecycle order, zero counts omitted
    pub posts_by_status: Vec<(PostStatus, u64)>,

    /// Posts created within the last day
    pub posts_last_day: usize,
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
///
/// # Returns
///
/// * `Ok(PostStatistics)` - Successfully loaded statistics
/// * `Err(BriefexError)` - Failed to query statistics
pub fn load_statistics(storage: &dyn Storage) -> Result<PostStatistics, BriefexError> {
    let total_sources = storage.get_sources(&SourceFilter::default())?.len();
    let total_posts = storage.count_posts()?;

    let mut posts_by_status = Vec::new();
    for status in PostStatus::all_statuses() {
        let count = storage.count_posts_by_status(status)?;
        if count > 0 {
            posts_by_status.push((status, count));
        }
    }

    let posts_last_day = storage.get_recent_posts(1)?.len();

    Ok(PostStatistics {
        total_sources,
        total_posts,
        posts_by_status,
        posts_last_day,
    })
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &PostStatistics) {
    println!("=== Post Statistics ===\n");

    println!("Overview:");
    println!("  Sources: {}", stats.total_sources);
    println!("  Total posts: {}", stats.total_posts);
    println!("  Ingested in the last day: {}", stats.posts_last_day);
    println!();

    println!("Posts by Status:");
    for (status, count) in &stats.posts_by_status {
        let percentage = if stats.total_posts > 0 {
            (*count as f64 / stats.total_posts as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", status, count, percentage);
    }
}
