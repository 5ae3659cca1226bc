//! Configuration types for the background workers.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{KindredError, Result};

/// Top-level configuration for the kindred agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KindredConfig {
    /// Records API settings.
    pub api: ApiConfig,
    /// Partner activity watcher settings.
    pub watcher: WatcherConfig,
    /// Daily self-logging reminder settings.
    pub reminder: ReminderConfig,
    /// Retry backoff applied when a run reports a retry outcome.
    pub retry: RetryConfig,
    /// Connectivity precondition settings.
    pub network: NetworkConfig,
}

/// Records API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST API (e.g. `https://api.example.com/v1`).
    pub base_url: String,
    /// Records requested per page.
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_owned(),
            page_size: 50,
        }
    }
}

/// Partner activity watcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Seconds between polls.
    pub interval_secs: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self { interval_secs: 900 }
    }
}

impl WatcherConfig {
    /// Poll period as a [`Duration`].
    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// Daily reminder configuration (local wall-clock time).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Hour of day (0-23, local time).
    pub hour: u8,
    /// Minute of hour (0-59).
    pub min: u8,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self { hour: 20, min: 0 }
    }
}

/// Retry backoff configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Delay before the first retry.
    pub initial_backoff_secs: u64,
    /// Upper bound for the exponential backoff.
    pub max_backoff_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_backoff_secs: 30,
            max_backoff_secs: 5 * 3600,
        }
    }
}

/// Network connectivity precondition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// `host:port` probed before each run. `None` treats the network as always up.
    pub probe_addr: Option<String>,
    /// Connect timeout for the probe in milliseconds.
    pub probe_timeout_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probe_addr: None,
            probe_timeout_ms: 1500,
        }
    }
}

impl KindredConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| KindredError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| KindredError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        crate::kindred_dirs::config_file()
    }

    /// Reject values the scheduler cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.reminder.hour > 23 || self.reminder.min > 59 {
            return Err(KindredError::Config(format!(
                "reminder time {:02}:{:02} is not a valid wall-clock time",
                self.reminder.hour, self.reminder.min
            )));
        }
        if self.api.page_size == 0 {
            return Err(KindredError::Config("api.page_size must be > 0".to_owned()));
        }
        url::Url::parse(&self.api.base_url)
            .map_err(|e| KindredError::Config(format!("invalid api.base_url: {e}")))?;
        Ok(())
    }
}
