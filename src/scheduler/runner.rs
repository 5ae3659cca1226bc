//! Scheduler runtime.
//!
//! Each registered task gets its own tokio loop: wait the initial delay,
//! wait for connectivity if the task requires it, run, then sleep until the
//! next occurrence (or the retry backoff) and go again. Loops of different tasks are
//! independent; a single task never overlaps with itself because its loop is
//! sequential.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::RetryConfig;
use crate::scheduler::network::NetworkProbe;
use crate::scheduler::tasks::{
    BackgroundTask, ExistingTaskPolicy, TaskOutcome, TaskRegistration, TaskRunRecord,
    now_epoch_secs,
};

/// Number of run-history entries to keep.
const DEFAULT_HISTORY_LIMIT: usize = 200;

/// Exponential retry backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Delay before the first retry.
    pub initial: Duration,
    /// Upper bound on any single delay.
    pub max: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for BackoffPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            initial: Duration::from_secs(config.initial_backoff_secs),
            max: Duration::from_secs(config.max_backoff_secs.max(config.initial_backoff_secs)),
        }
    }
}

impl BackoffPolicy {
    /// Delay before retry number `attempt` (1-based): `initial * 2^(attempt-1)`, capped.
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.initial
            .checked_mul(1_u32 << exponent)
            .unwrap_or(self.max)
            .min(self.max)
    }
}

/// Result of a registration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// A new loop was started.
    Scheduled,
    /// A live registration with the same name exists and was left alone.
    KeptExisting,
    /// The previous registration was cancelled and replaced.
    Replaced,
}

struct Entry {
    registration: TaskRegistration,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

type SharedHistory = Arc<Mutex<Vec<TaskRunRecord>>>;

/// Periodic background task scheduler.
pub struct Scheduler {
    clock: Arc<dyn Clock>,
    network: Arc<dyn NetworkProbe>,
    backoff: BackoffPolicy,
    entries: HashMap<String, Entry>,
    history: SharedHistory,
    max_history_entries: usize,
    shutdown: CancellationToken,
}

impl Scheduler {
    /// Create a scheduler that reads registration time from `clock` and
    /// checks connectivity with `network`.
    pub fn new(clock: Arc<dyn Clock>, network: Arc<dyn NetworkProbe>) -> Self {
        Self {
            clock,
            network,
            backoff: BackoffPolicy::default(),
            entries: HashMap::new(),
            history: Arc::new(Mutex::new(Vec::new())),
            max_history_entries: DEFAULT_HISTORY_LIMIT,
            shutdown: CancellationToken::new(),
        }
    }

    /// Override the retry backoff.
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Override the in-memory run-history limit.
    #[must_use]
    pub fn with_history_limit(mut self, max_entries: usize) -> Self {
        self.max_history_entries = max_entries.max(1);
        self
    }

    /// Register `task` to run periodically under `registration`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn enqueue_unique_periodic(
        &mut self,
        registration: TaskRegistration,
        task: Arc<dyn BackgroundTask>,
    ) -> EnqueueOutcome {
        debug_assert_eq!(
            task.name(),
            registration.name,
            "task name does not match its registration"
        );
        let mut outcome = EnqueueOutcome::Scheduled;

        if let Some(existing) = self.entries.get(&registration.name) {
            let live = !existing.handle.is_finished();
            match (live, registration.policy) {
                (true, ExistingTaskPolicy::Keep) => {
                    debug!(task = %registration.name, "already scheduled, keeping existing");
                    return EnqueueOutcome::KeptExisting;
                }
                (true, ExistingTaskPolicy::Replace) => {
                    existing.cancel.cancel();
                    outcome = EnqueueOutcome::Replaced;
                }
                (false, _) => {}
            }
        }

        let initial_delay = registration.schedule.initial_delay(self.clock.now_local());
        info!(
            task = %registration.name,
            schedule = %registration.schedule,
            initial_delay_secs = initial_delay.as_secs(),
            "task scheduled"
        );

        let cancel = self.shutdown.child_token();
        let task_loop = TaskLoop {
            task,
            registration: registration.clone(),
            clock: Arc::clone(&self.clock),
            network: Arc::clone(&self.network),
            backoff: self.backoff,
            history: Arc::clone(&self.history),
            max_history_entries: self.max_history_entries,
            cancel: cancel.clone(),
        };
        let handle = tokio::spawn(task_loop.run(initial_delay));

        self.entries.insert(
            registration.name.clone(),
            Entry {
                registration,
                cancel,
                handle,
            },
        );
        outcome
    }

    /// Returns `true` if a live registration exists for `name`.
    #[must_use]
    pub fn is_scheduled(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(|entry| !entry.handle.is_finished())
    }

    /// Current registrations.
    #[must_use]
    pub fn registrations(&self) -> Vec<TaskRegistration> {
        self.entries.values().map(|e| e.registration.clone()).collect()
    }

    /// Cancel one registration. Returns `true` when found.
    pub fn cancel(&mut self, name: &str) -> bool {
        match self.entries.remove(name) {
            Some(entry) => {
                entry.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Snapshot of recent run history, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<TaskRunRecord> {
        match self.history.lock() {
            Ok(history) => history.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Cancel every loop and wait for them to stop.
    ///
    /// A run interrupted here is dropped at its current await point.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        for (name, entry) in self.entries {
            if let Err(e) = entry.handle.await {
                warn!(task = %name, "task loop ended abnormally: {e}");
            }
        }
        info!("scheduler stopped");
    }
}

struct TaskLoop {
    task: Arc<dyn BackgroundTask>,
    registration: TaskRegistration,
    clock: Arc<dyn Clock>,
    network: Arc<dyn NetworkProbe>,
    backoff: BackoffPolicy,
    history: SharedHistory,
    max_history_entries: usize,
    cancel: CancellationToken,
}

impl TaskLoop {
    async fn run(self, initial_delay: Duration) {
        let name = self.registration.name.clone();
        let schedule = self.registration.schedule;
        let mut next_delay = initial_delay;
        let mut attempt = 0_u32;

        loop {
            if !self.sleep(next_delay).await {
                break;
            }

            if self.registration.requires_network && !self.network.is_online().await {
                debug!(task = %name, "network unavailable, deferring run");
                next_delay = self.backoff.initial;
                continue;
            }

            let started_at = now_epoch_secs();
            let outcome = tokio::select! {
                () = self.cancel.cancelled() => break,
                outcome = self.task.run() => outcome,
            };
            let finished_at = now_epoch_secs();

            match &outcome {
                TaskOutcome::Success(summary) => {
                    debug!(task = %name, "run succeeded: {summary}");
                    attempt = 0;
                    next_delay = schedule.delay_after_success(self.clock.now_local());
                }
                TaskOutcome::Retry(reason) => {
                    attempt = attempt.saturating_add(1);
                    next_delay = self.backoff.delay(attempt);
                    warn!(
                        task = %name,
                        attempt,
                        retry_in_secs = next_delay.as_secs(),
                        "run failed, will retry: {reason}"
                    );
                }
            }

            self.push_history(TaskRunRecord {
                task_id: name.clone(),
                started_at,
                finished_at,
                outcome: outcome.outcome(),
                summary: outcome.summary(),
            });
        }

        debug!(task = %name, "task loop cancelled");
    }

    /// Sleep for `delay`. Returns `false` if cancelled first.
    async fn sleep(&self, delay: Duration) -> bool {
        if delay.is_zero() {
            tokio::task::yield_now().await;
            return !self.cancel.is_cancelled();
        }
        tokio::select! {
            () = self.cancel.cancelled() => false,
            () = tokio::time::sleep(delay) => true,
        }
    }

    fn push_history(&self, run: TaskRunRecord) {
        let mut history = match self.history.lock() {
            Ok(history) => history,
            Err(poisoned) => poisoned.into_inner(),
        };
        history.push(run);
        if history.len() > self.max_history_entries {
            let drop_count = history.len().saturating_sub(self.max_history_entries);
            history.drain(0..drop_count);
        }
    }
}
