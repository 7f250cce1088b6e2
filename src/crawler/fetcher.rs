//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building a pooled HTTP client with browser-like default headers
//! - Rotating user agents per request
//! - Retry with exponential backoff and `Retry-After` support
//! - Error classification into transient and permanent failures

use crate::config::CrawlerConfig;
use crate::crawler::error::FetchError;
use crate::url::validate_url;
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION, RETRY_AFTER, USER_AGENT};
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Browser signatures used when no user agents are configured
pub const DEFAULT_USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
];

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Maximum redirect hops followed per request
const MAX_REDIRECTS: usize = 10;

/// Retrieves raw page bytes for a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the body of `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// Releases the connection pool; later fetches fail with `FetchError::Closed`
    fn close(&mut self);
}

/// Builds an HTTP client with proper configuration
///
/// `Accept-Encoding` is filled in by reqwest for the enabled decoders.
///
/// # Arguments
///
/// * `config` - The crawler configuration (timeouts and pool settings)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

    Client::builder()
        .default_headers(headers)
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(config.pool_idle_timeout())
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Computes the delay before the next attempt
///
/// A server-provided `retry_after` is honored exactly. Otherwise the delay is
/// `base * 2^attempt`, capped at `max`, where `attempt` is the 0-based index
/// of the attempt that just failed.
pub fn backoff_delay(
    retry_after: Option<Duration>,
    attempt: u32,
    base: Duration,
    max: Duration,
) -> Duration {
    if let Some(delay) = retry_after {
        return delay;
    }

    2u32.checked_pow(attempt)
        .and_then(|factor| base.checked_mul(factor))
        .map_or(max, |delay| delay.min(max))
}

/// Parses an integer `Retry-After` header (delta-seconds form)
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Fetcher for HTML sources backed by one pooled reqwest client
pub struct HtmlFetcher {
    client: Option<Client>,
    user_agents: Vec<String>,
    max_attempts: u32,
    retry_delay: Duration,
    max_retry_delay: Duration,
    request_timeout: Duration,
}

impl HtmlFetcher {
    /// Creates a fetcher with its own connection pool
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        let user_agents = if config.user_agents.is_empty() {
            DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect()
        } else {
            config.user_agents.clone()
        };

        Ok(Self {
            client: Some(build_http_client(config)?),
            user_agents,
            max_attempts: config.max_retries.max(1),
            retry_delay: config.retry_delay(),
            max_retry_delay: config.max_retry_delay(),
            request_timeout: config.request_timeout(),
        })
    }

    fn pick_user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::rng())
            .map_or(DEFAULT_USER_AGENTS[0], String::as_str)
    }

    /// Performs a single GET request
    async fn attempt(&self, client: &Client, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = client
            .get(url.clone())
            .header(USER_AGENT, self.pick_user_agent())
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            let retry_after = match status {
                StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => {
                    parse_retry_after(response.headers())
                }
                _ => None,
            };
            return Err(FetchError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                retry_after,
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(url, e))?;
        Ok(body.to_vec())
    }

    /// Maps a reqwest error onto the fetch error taxonomy
    fn classify(&self, url: &Url, source: reqwest::Error) -> FetchError {
        let url = url.to_string();
        if source.is_timeout() {
            FetchError::Timeout {
                url,
                timeout: self.request_timeout,
                source,
            }
        } else if source.is_connect() || source.is_body() {
            FetchError::Connection { url, source }
        } else {
            FetchError::Request { url, source }
        }
    }
}

#[async_trait]
impl Fetcher for HtmlFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = validate_url(url).map_err(|e| FetchError::InvalidSource {
            url: url.to_string(),
            issue: e.to_string(),
        })?;
        let client = self.client.as_ref().ok_or(FetchError::Closed)?;

        let mut attempt = 0;
        loop {
            match self.attempt(client, &parsed).await {
                Ok(body) => {
                    tracing::debug!("Fetched {} ({} bytes)", parsed, body.len());
                    return Ok(body);
                }
                Err(e) if e.is_transient() && attempt + 1 < self.max_attempts => {
                    let delay = backoff_delay(
                        e.retry_after(),
                        attempt,
                        self.retry_delay,
                        self.max_retry_delay,
                    );
                    tracing::warn!(
                        "Attempt {}/{} for {} failed: {}; retrying in {:?}",
                        attempt + 1,
                        self.max_attempts,
                        parsed,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    if e.is_transient() {
                        tracing::warn!(
                            "Giving up on {} after {} attempts: {}",
                            parsed,
                            self.max_attempts,
                            e
                        );
                    }
                    return Err(e);
                }
            }
        }
    }

    fn close(&mut self) {
        if self.client.take().is_some() {
            tracing::debug!("HTTP client closed");
        } else {
            tracing::debug!("HTTP client already closed");
        }
    }
}
