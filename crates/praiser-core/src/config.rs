//! Application configuration.
//!
//! Configuration is loaded from `config.toml` in the platform config
//! directory (resolved by the infrastructure layer). Every section has
//! working defaults so a missing or partial file never blocks startup.

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Remote settings endpoint configuration
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Persistence scheduling configuration
    #[serde(default)]
    pub sync: SyncConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote settings endpoint configuration.
///
/// When no endpoint is configured the application runs against the local
/// cache only.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Settings endpoint URL (e.g. `https://praiser.example.com/api/settings`)
    pub endpoint: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_remote_timeout")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_remote_timeout(),
        }
    }
}

impl RemoteConfig {
    /// Check if a remote endpoint is configured.
    pub fn is_configured(&self) -> bool {
        self.endpoint.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// Persistence scheduling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Quiet period before a burst of edits is flushed, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_remote_timeout() -> u64 {
    10
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Loads configuration from a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
