//! Runtime Configuration Settings
//!
//! Configuration for the bot runtime binary, loaded from environment
//! variables.

use std::time::Duration;

use crate::application::services::RuntimeConfig;

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    /// Unique identifier of the bot instance.
    pub bot_id: String,
    /// Account the bot trades under.
    pub account_id: String,
    /// Symbol the demo feed quotes.
    pub symbol: String,
    /// Loop tunables handed to the runtime.
    pub runtime: RuntimeConfig,
}

impl RuntimeSettings {
    /// Create configuration from environment variables.
    ///
    /// `BOT_ID` and `BOT_ACCOUNT_ID` are required; everything else
    /// falls back to the runtime defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a required environment variable is missing
    /// or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_id = std::env::var("BOT_ID")
            .map_err(|_| ConfigError::MissingEnvVar("BOT_ID".to_string()))?;

        let account_id = std::env::var("BOT_ACCOUNT_ID")
            .map_err(|_| ConfigError::MissingEnvVar("BOT_ACCOUNT_ID".to_string()))?;

        if bot_id.is_empty() {
            return Err(ConfigError::EmptyValue("BOT_ID".to_string()));
        }

        if account_id.is_empty() {
            return Err(ConfigError::EmptyValue("BOT_ACCOUNT_ID".to_string()));
        }

        let symbol = std::env::var("BOT_SYMBOL").unwrap_or_else(|_| "VN30".to_string());

        let defaults = RuntimeConfig::default();
        let runtime = RuntimeConfig {
            poll_interval: parse_env_duration_millis(
                "BOT_POLL_INTERVAL_MS",
                defaults.poll_interval,
            ),
            heartbeat_interval: parse_env_duration_millis(
                "BOT_HEARTBEAT_INTERVAL_MS",
                defaults.heartbeat_interval,
            ),
            max_consecutive_errors: parse_env_u32(
                "BOT_MAX_CONSECUTIVE_ERRORS",
                defaults.max_consecutive_errors,
            ),
            graceful_shutdown_timeout: parse_env_duration_secs(
                "BOT_SHUTDOWN_TIMEOUT_SECS",
                defaults.graceful_shutdown_timeout,
            ),
        };

        Ok(Self {
            bot_id,
            account_id,
            symbol,
            runtime,
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
}

fn parse_env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_duration_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_secs)
}

fn parse_env_duration_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_millis)
}
