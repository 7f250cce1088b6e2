//! Output module for reporting on stored posts
//!
//! This module handles loading and printing post statistics for `--stats`.

pub mod stats;

pub use stats::{load_statistics, print_statistics, PostStatistics};
