//! Master on/off toggles for the two background workers.
//!
//! Toggles are read fresh at the start of every run; nothing caches them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

/// Source of the user's master toggles.
#[async_trait]
pub trait ToggleSource: Send + Sync {
    /// Whether partner activity notifications are enabled.
    async fn notifications_enabled(&self) -> bool;

    /// Whether the daily self-logging reminder is enabled.
    async fn reminders_enabled(&self) -> bool;
}

/// On-disk form of the toggles (`settings.json`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToggleSettings {
    pub notifications_enabled: bool,
    pub reminders_enabled: bool,
}

impl Default for ToggleSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            reminders_enabled: true,
        }
    }
}

/// Toggles re-read from a JSON settings file on every query.
///
/// A missing file means both toggles are on. An unreadable file is logged and
/// also treated as on.
#[derive(Debug, Clone)]
pub struct FileToggles {
    path: PathBuf,
}

impl FileToggles {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the current settings from disk.
    #[must_use]
    pub async fn load(&self) -> ToggleSettings {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return ToggleSettings::default();
            }
            Err(e) => {
                warn!("cannot read {}: {e}", self.path.display());
                return ToggleSettings::default();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!("cannot parse {}: {e}", self.path.display());
            ToggleSettings::default()
        })
    }

    /// Persist `settings`, creating parent directories as needed.
    pub async fn save(&self, settings: &ToggleSettings) -> crate::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(settings)
            .map_err(|e| crate::KindredError::Config(format!("cannot serialize settings: {e}")))?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl ToggleSource for FileToggles {
    async fn notifications_enabled(&self) -> bool {
        self.load().await.notifications_enabled
    }

    async fn reminders_enabled(&self) -> bool {
        self.load().await.reminders_enabled
    }
}

/// In-memory toggles, flipped by the host UI.
#[derive(Debug)]
pub struct SharedToggles {
    notifications: AtomicBool,
    reminders: AtomicBool,
}

impl Default for SharedToggles {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl SharedToggles {
    #[must_use]
    pub fn new(notifications: bool, reminders: bool) -> Self {
        Self {
            notifications: AtomicBool::new(notifications),
            reminders: AtomicBool::new(reminders),
        }
    }

    pub fn set_notifications_enabled(&self, enabled: bool) {
        self.notifications.store(enabled, Ordering::SeqCst);
    }

    pub fn set_reminders_enabled(&self, enabled: bool) {
        self.reminders.store(enabled, Ordering::SeqCst);
    }
}

#[async_trait]
impl ToggleSource for SharedToggles {
    async fn notifications_enabled(&self) -> bool {
        self.notifications.load(Ordering::SeqCst)
    }

    async fn reminders_enabled(&self) -> bool {
        self.reminders.load(Ordering::SeqCst)
    }
}
