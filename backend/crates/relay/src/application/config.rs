//! Application Configuration
//!
//! Configuration for the relay and the mini-app server.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use platform::query::{Url, parse_http_url};
use thiserror::Error;

use crate::domain::value_objects::ApiKey;

/// Path of the verification endpoint on the verifier host
pub const VERIFY_PATH: &str = "/api/onWebhook";

/// Path of the stats endpoint on the mini-app server
pub const STATS_PATH: &str = "/api/stats";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Base URL of the verification service
    pub verifier_url: String,
    /// Shared secret sent as `X-API-KEY`
    pub api_key: ApiKey,
    /// Hard deadline for the verification call
    pub verify_deadline: Duration,
    /// Delay between the completion signal and host close
    pub close_grace: Duration,
    /// Stats poll interval
    pub stats_interval: Duration,
    /// Username used when the host reports none
    pub username_sentinel: String,
    /// Page query parameter carrying the webhook destination
    pub destination_param: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            verifier_url: "https://premium-security.onrender.com".to_string(),
            api_key: ApiKey::new(""),
            verify_deadline: Duration::from_secs(8),
            close_grace: Duration::from_millis(1200),
            stats_interval: Duration::from_secs(30),
            username_sentinel: "no_username".to_string(),
            destination_param: "webhook".to_string(),
        }
    }
}

impl RelayConfig {
    /// Create config for development (well-known local API key)
    pub fn development() -> Self {
        Self {
            api_key: ApiKey::new("papa"),
            ..Default::default()
        }
    }

    /// Load from environment
    ///
    /// `VERIFIER_API_KEY` is required unless `base` already carries a key.
    pub fn from_env_with(base: Self) -> Result<Self, ConfigError> {
        let mut config = base;

        if let Ok(url) = env::var("VERIFIER_URL") {
            config.verifier_url = url;
        }
        if let Ok(key) = env::var("VERIFIER_API_KEY") {
            config.api_key = ApiKey::new(key);
        }
        if config.api_key.expose().is_empty() {
            return Err(ConfigError::Missing("VERIFIER_API_KEY"));
        }
        if let Some(ms) = read_u64("VERIFY_DEADLINE_MS")? {
            config.verify_deadline = Duration::from_millis(ms);
        }
        if let Some(secs) = read_u64("STATS_INTERVAL_SECS")? {
            config.stats_interval = Duration::from_secs(secs);
        }

        config.verification_endpoint()?;
        Ok(config)
    }

    /// Full URL of the verification endpoint
    pub fn verification_endpoint(&self) -> Result<Url, ConfigError> {
        let raw = format!("{}{}", self.verifier_url.trim_end_matches('/'), VERIFY_PATH);
        parse_http_url(&raw).ok_or(ConfigError::Invalid {
            name: "VERIFIER_URL",
            value: self.verifier_url.clone(),
        })
    }
}

/// Mini-app server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory with index.html and the other static assets
    pub static_dir: PathBuf,
    /// Optional JSON file maintained by the stats store
    pub stats_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_dir: PathBuf::from("public"),
            stats_file: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = env::var("PORT") {
            config.port = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?;
        }
        if let Ok(dir) = env::var("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        config.stats_file = env::var("STATS_FILE").ok().map(PathBuf::from);
        Ok(config)
    }
}

fn read_u64(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(None),
    }
}
