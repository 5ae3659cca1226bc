//! Durable baseline counters for the partner activity watcher.
//!
//! One record per device, overwritten in place after every completed watcher
//! run. Absent state reads as `0/0`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{KindredError, Result};

/// Last-observed partner counts for the current day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LastSeenCounters {
    pub mood_count: u32,
    pub activity_count: u32,
}

impl LastSeenCounters {
    #[must_use]
    pub fn new(mood_count: u32, activity_count: u32) -> Self {
        Self {
            mood_count,
            activity_count,
        }
    }
}

/// Durable key-value storage for [`LastSeenCounters`].
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Read the stored counters, or `0/0` when nothing was stored yet.
    async fn read(&self) -> Result<LastSeenCounters>;

    /// Overwrite the stored counters.
    async fn write(&self, counters: LastSeenCounters) -> Result<()>;
}

/// JSON file store. Writes go to a sibling temp file and are renamed over
/// the target so a crash mid-write never leaves a torn record.
#[derive(Debug, Clone)]
pub struct JsonCounterStore {
    path: PathBuf,
}

impl JsonCounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CounterStore for JsonCounterStore {
    async fn read(&self) -> Result<LastSeenCounters> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(LastSeenCounters::default());
            }
            Err(e) => {
                return Err(KindredError::Store(format!(
                    "cannot read {}: {e}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            KindredError::Store(format!("cannot parse {}: {e}", self.path.display()))
        })
    }

    async fn write(&self, counters: LastSeenCounters) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| KindredError::Store(format!("cannot create state dir: {e}")))?;
        }

        let json = serde_json::to_vec_pretty(&counters)
            .map_err(|e| KindredError::Store(format!("cannot serialize counters: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| KindredError::Store(format!("cannot write {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| KindredError::Store(format!("cannot replace {}: {e}", self.path.display())))?;

        debug!(
            mood_count = counters.mood_count,
            activity_count = counters.activity_count,
            "persisted partner counters"
        );
        Ok(())
    }
}

/// Process-local store for hosts without a writable filesystem.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    inner: Mutex<Option<LastSeenCounters>>,
}

impl MemoryCounterStore {
    /// Create a store pre-seeded with `counters`.
    #[must_use]
    pub fn seeded(counters: LastSeenCounters) -> Self {
        Self {
            inner: Mutex::new(Some(counters)),
        }
    }

    /// The stored value, `None` if never written.
    pub async fn snapshot(&self) -> Option<LastSeenCounters> {
        *self.inner.lock().await
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn read(&self) -> Result<LastSeenCounters> {
        Ok(self.inner.lock().await.unwrap_or_default())
    }

    async fn write(&self, counters: LastSeenCounters) -> Result<()> {
        *self.inner.lock().await = Some(counters);
        Ok(())
    }
}
