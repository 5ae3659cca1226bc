//! Centralized directory paths for the kindred agent.
//!
//! Uses the [`dirs`] crate for platform-appropriate resolution.
//!
//! # Environment Overrides
//!
//! - `KINDRED_CONFIG_DIR` — overrides [`config_dir`]
//! - `KINDRED_STATE_DIR` — overrides [`state_dir`]

use std::path::PathBuf;

/// Application config directory.
///
/// Holds `config.toml` and `settings.json` (the master toggles).
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("KINDRED_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("kindred"))
        .unwrap_or_else(|| PathBuf::from("/tmp/kindred-config"))
}

/// Durable state directory.
///
/// Holds the partner counters record. Resolves to `dirs::data_dir()/kindred/`.
#[must_use]
pub fn state_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("KINDRED_STATE_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("kindred"))
        .unwrap_or_else(|| PathBuf::from("/tmp/kindred-state"))
}

/// Default config file (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Master toggle file (`config_dir()/settings.json`).
#[must_use]
pub fn settings_file() -> PathBuf {
    config_dir().join("settings.json")
}

/// Partner counters file (`state_dir()/partner-counters.json`).
#[must_use]
pub fn counters_file() -> PathBuf {
    state_dir().join("partner-counters.json")
}
