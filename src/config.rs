use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Duration;
use thiserror::Error;
use tracing::info;

use crate::chat::DEFAULT_REPLY_DELAY_MS;
use crate::grading::DEFAULT_STAGE_INTERVAL_MS;

pub const DEFAULT_BIND: &str = "127.0.0.1:9002";

/// Upper bound for any timing value: one day.
pub const MAX_MILLIS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address {value:?}: {source}")]
    BadAddress {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("{key} must be between 0 and {MAX_MILLIS} milliseconds, got {value:?}")]
    BadMillis { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub responses_path: Option<PathBuf>,
    pub stage_interval: Duration,
    pub chat_reply_delay: Duration,
}

impl ServerConfig {
    /// Read configuration from the process environment (after `.env`, if
    /// the caller loaded one).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] but with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("DASHBOARD_BIND")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_raw.parse().map_err(|source| ConfigError::BadAddress {
            value: bind_raw.clone(),
            source,
        })?;

        let responses_path = lookup("DASHBOARD_RESPONSES")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let stage_interval = millis(&lookup, "DASHBOARD_STAGE_INTERVAL_MS", DEFAULT_STAGE_INTERVAL_MS)?;
        let chat_reply_delay = millis(&lookup, "DASHBOARD_CHAT_DELAY_MS", DEFAULT_REPLY_DELAY_MS)?;

        let config = Self {
            bind,
            responses_path,
            stage_interval,
            chat_reply_delay,
        };
        info!("Configuration loaded: bind={}", config.bind);
        Ok(config)
    }
}

fn millis<F>(lookup: &F, key: &'static str, default: i64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.is_empty()) {
        None => Ok(Duration::milliseconds(default)),
        Some(value) => match value.trim().parse::<i64>() {
            Ok(ms) if (0..=MAX_MILLIS).contains(&ms) => Ok(Duration::milliseconds(ms)),
            _ => Err(ConfigError::BadMillis { key, value }),
        },
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 9002)),
            responses_path: None,
            stage_interval: Duration::milliseconds(DEFAULT_STAGE_INTERVAL_MS),
            chat_reply_delay: Duration::milliseconds(DEFAULT_REPLY_DELAY_MS),
        }
    }
}
