//! Configuration module for Briefex
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use briefex::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("briefex.toml")).unwrap();
//! println!("Looking back {} days for duplicates", config.crawler.lookback_days);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, DatabaseConfig, ScheduleConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
