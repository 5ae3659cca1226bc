//! Process-wide application context.
//!
//! Built once at startup and handed to every component that needs shared
//! collaborators. Workers receive their collaborators from here through
//! their constructors; nothing reaches back into a global.

use std::sync::{Arc, RwLock};

use crate::clock::{Clock, SystemClock};
use crate::config::KindredConfig;
use crate::counters::{CounterStore, JsonCounterStore};
use crate::error::Result;
use crate::notify::NotificationSink;
use crate::records::{HttpRecordRepository, RecordRepository};
use crate::scheduler::network::{AlwaysOnline, NetworkProbe, TcpProbe};
use crate::toggles::{FileToggles, ToggleSource};

/// Holder for the signed-in user's bearer token.
///
/// Cloning shares the same slot, so a token refreshed by the host is seen by
/// every clone. How the token is obtained and stored on disk is the host's
/// business.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    /// Create a session that already holds a token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::default();
        session.set_token(Some(token.into()));
        session
    }

    /// Replace (or clear) the bearer token.
    pub fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut slot) => *slot = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    /// Current bearer token, if signed in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns `true` when a token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Shared collaborators for the background workers.
#[derive(Clone)]
pub struct AppContext {
    pub config: KindredConfig,
    pub session: Session,
    pub repository: Arc<dyn RecordRepository>,
    pub counters: Arc<dyn CounterStore>,
    pub sink: Arc<dyn NotificationSink>,
    pub toggles: Arc<dyn ToggleSource>,
    pub clock: Arc<dyn Clock>,
    pub network: Arc<dyn NetworkProbe>,
}

impl AppContext {
    /// Build the production context: HTTP records API, JSON counter store in
    /// the state dir, toggles re-read from `settings.json`, system clock.
    pub fn from_config(
        config: KindredConfig,
        session: Session,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<Self> {
        let repository: Arc<dyn RecordRepository> =
            Arc::new(HttpRecordRepository::new(&config.api, session.clone())?);
        let network: Arc<dyn NetworkProbe> = match &config.network.probe_addr {
            Some(addr) => Arc::new(TcpProbe::new(addr.clone(), config.network.probe_timeout_ms)),
            None => Arc::new(AlwaysOnline),
        };

        Ok(Self {
            repository,
            counters: Arc::new(JsonCounterStore::new(crate::kindred_dirs::counters_file())),
            sink,
            toggles: Arc::new(FileToggles::new(crate::kindred_dirs::settings_file())),
            clock: Arc::new(SystemClock),
            network,
            config,
            session,
        })
    }
}
