use crate::crawler::HtmlLayout;
use crate::model::Source;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Briefex
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,

    pub database: DatabaseConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Sources seeded into storage at startup
    #[serde(default, rename = "source")]
    pub sources: Vec<Source>,

    /// Parser layouts in addition to the built-in ones
    #[serde(default, rename = "layout")]
    pub layouts: Vec<HtmlLayout>,
}

/// HTTP and ingest behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Total request timeout (milliseconds)
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,

    /// Connection establishment timeout (milliseconds)
    #[serde(rename = "connect-timeout-ms")]
    pub connect_timeout_ms: u64,

    /// Idle connections kept per host in the pool
    #[serde(rename = "pool-max-idle-per-host")]
    pub pool_max_idle_per_host: usize,

    /// How long an idle pooled connection is kept (milliseconds)
    #[serde(rename = "pool-idle-timeout-ms")]
    pub pool_idle_timeout_ms: u64,

    /// Total number of attempts per fetch, including the first one
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base delay of the exponential backoff (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Upper bound of the exponential backoff (milliseconds)
    #[serde(rename = "max-retry-delay-ms")]
    pub max_retry_delay_ms: u64,

    /// Window of already-ingested posts used for deduplication (days)
    #[serde(rename = "lookback-days")]
    pub lookback_days: u32,

    /// User agents to rotate through; the built-in pool is used when empty
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 10_000,
            connect_timeout_ms: 5_000,
            pool_max_idle_per_host: 10,
            pool_idle_timeout_ms: 90_000,
            max_retries: 3,
            retry_delay_ms: 1_000,
            max_retry_delay_ms: 30_000,
            lookback_days: 3,
            user_agents: Vec::new(),
        }
    }
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn pool_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.pool_idle_timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn max_retry_delay(&self) -> Duration {
        Duration::from_millis(self.max_retry_delay_ms)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
}

/// Periodic execution configuration for `--watch`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Seconds between two ingest runs
    #[serde(rename = "interval-secs")]
    pub interval_secs: u64,

    /// Hard wall-clock limit of a single run (seconds)
    #[serde(rename = "time-limit-secs")]
    pub time_limit_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: 600,
            time_limit_secs: 360,
        }
    }
}
