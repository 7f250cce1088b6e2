use crate::config::types::{Config, CrawlerConfig, DatabaseConfig, ScheduleConfig};
use crate::crawler::HtmlLayout;
use crate::model::Source;
use crate::url::validate_url;
use crate::ConfigError;
use std::collections::HashSet;

/// Upper bound for attempts per fetch
const MAX_ATTEMPTS: u32 = 10;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_database_config(&config.database)?;
    validate_schedule_config(&config.schedule)?;
    validate_sources(&config.sources)?;
    validate_layouts(&config.layouts)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_timeout_ms == 0 || config.connect_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-ms and connect-timeout-ms must be > 0".to_string(),
        ));
    }

    if config.max_retries < 1 || config.max_retries > MAX_ATTEMPTS {
        return Err(ConfigError::Validation(format!(
            "max-retries must be between 1 and {}, got {}",
            MAX_ATTEMPTS, config.max_retries
        )));
    }

    if config.retry_delay_ms > config.max_retry_delay_ms {
        return Err(ConfigError::Validation(format!(
            "retry-delay-ms ({}) cannot exceed max-retry-delay-ms ({})",
            config.retry_delay_ms, config.max_retry_delay_ms
        )));
    }

    if config.lookback_days < 1 {
        return Err(ConfigError::Validation(
            "lookback-days must be >= 1".to_string(),
        ));
    }

    if config.user_agents.iter().any(|ua| ua.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "user-agents cannot contain empty entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates database configuration
fn validate_database_config(config: &DatabaseConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "database path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates schedule configuration
fn validate_schedule_config(config: &ScheduleConfig) -> Result<(), ConfigError> {
    if config.interval_secs == 0 {
        return Err(ConfigError::Validation(
            "interval-secs must be > 0".to_string(),
        ));
    }

    if config.time_limit_secs == 0 || config.time_limit_secs > config.interval_secs {
        return Err(ConfigError::Validation(format!(
            "time-limit-secs must be between 1 and interval-secs ({}), got {}",
            config.interval_secs, config.time_limit_secs
        )));
    }

    Ok(())
}

/// Validates source entries
fn validate_sources(sources: &[Source]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for source in sources {
        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source name cannot be empty".to_string(),
            ));
        }

        if source.code_name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{}' has an empty code-name",
                source.name
            )));
        }

        if !seen.insert(source.code_name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source code-name '{}'",
                source.code_name
            )));
        }

        validate_url(&source.url).map_err(|e| {
            ConfigError::InvalidUrl(format!("source '{}' url '{}': {}", source.name, source.url, e))
        })?;
    }

    Ok(())
}

/// Validates layout entries
///
/// Selector syntax is checked later, when the parser is built.
fn validate_layouts(layouts: &[HtmlLayout]) -> Result<(), ConfigError> {
    for layout in layouts {
        if layout.code_name.trim().is_empty() {
            return Err(ConfigError::InvalidLayout(
                "layout code-name cannot be empty".to_string(),
            ));
        }

        let required = [
            ("card", &layout.card),
            ("card-link", &layout.card_link),
            ("article", &layout.article),
            ("datetime-format", &layout.datetime_format),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidLayout(format!(
                    "layout '{}' has an empty {}",
                    layout.code_name, key
                )));
            }
        }
    }

    Ok(())
}
