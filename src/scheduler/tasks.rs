//! Scheduled task definitions.
//!
//! Defines the [`BackgroundTask`] trait, the [`Schedule`] enum for timing,
//! the [`TaskRegistration`] handed to the scheduler, and run outcomes.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::delay::delay_until_next;

const DAY_SECS: u64 = 24 * 3600;

/// How often a task should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schedule {
    /// Run immediately, then every N seconds.
    Interval {
        /// Interval in seconds between runs.
        secs: u64,
    },
    /// Run at the next occurrence of a local wall-clock time, then at that
    /// time every day.
    Daily {
        /// Hour of day (0-23, local time).
        hour: u8,
        /// Minute of hour (0-59).
        min: u8,
    },
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Interval { secs } => {
                if *secs >= 3600 {
                    write!(f, "every {} hours", secs / 3600)
                } else if *secs >= 60 {
                    write!(f, "every {} minutes", secs / 60)
                } else {
                    write!(f, "every {secs} seconds")
                }
            }
            Self::Daily { hour, min } => write!(f, "daily at {hour:02}:{min:02} local"),
        }
    }
}

impl Schedule {
    /// Nominal time between consecutive successful runs. Never zero.
    #[must_use]
    pub fn period(&self) -> Duration {
        match self {
            Self::Interval { secs } => Duration::from_secs((*secs).max(1)),
            Self::Daily { .. } => Duration::from_secs(DAY_SECS),
        }
    }

    /// Delay before the next run after a successful run that finished at
    /// local time `now`.
    ///
    /// Daily schedules re-anchor to the wall-clock target, so a late run
    /// (after a retry or an offline wait) does not shift later days.
    #[must_use]
    pub fn delay_after_success(&self, now: NaiveDateTime) -> Duration {
        match self {
            Self::Interval { .. } => self.period(),
            Self::Daily { hour, min } => delay_until_next(now, *hour, *min),
        }
    }

    /// Delay before the first run when registered at local time `now`.
    ///
    /// Daily schedules always pick a strictly future occurrence.
    #[must_use]
    pub fn initial_delay(&self, now: NaiveDateTime) -> Duration {
        match self {
            Self::Interval { .. } => Duration::ZERO,
            Self::Daily { hour, min } => delay_until_next(now, *hour, *min),
        }
    }
}

/// What the scheduler does when a task with the same name is already registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistingTaskPolicy {
    /// Leave the running registration alone; the new request is a no-op.
    #[default]
    Keep,
    /// Cancel the running registration and start the new one.
    Replace,
}

/// Everything the scheduler needs to know to run a task periodically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRegistration {
    /// Unique task name; the uniqueness key.
    pub name: String,
    /// When to run.
    pub schedule: Schedule,
    /// Only run while the network is reachable.
    pub requires_network: bool,
    /// Behaviour when `name` is already registered.
    pub policy: ExistingTaskPolicy,
}

impl TaskRegistration {
    /// Network-constrained registration with the keep-existing policy.
    pub fn new(name: impl Into<String>, schedule: Schedule) -> Self {
        Self {
            name: name.into(),
            schedule,
            requires_network: true,
            policy: ExistingTaskPolicy::Keep,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ExistingTaskPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn without_network(mut self) -> Self {
        self.requires_network = false;
        self
    }
}

/// Outcome of executing a background task, reported to the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Run completed; the summary goes to the run history.
    Success(String),
    /// Run failed transiently; retry after backoff.
    Retry(String),
}

impl TaskOutcome {
    /// Classify the outcome for run history.
    #[must_use]
    pub fn outcome(&self) -> TaskRunOutcome {
        match self {
            Self::Success(_) => TaskRunOutcome::Success,
            Self::Retry(_) => TaskRunOutcome::Retry,
        }
    }

    /// Short human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Success(msg) | Self::Retry(msg) => msg.clone(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Run outcome as recorded in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskRunOutcome {
    Success,
    Retry,
}

/// One entry of scheduler run history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRunRecord {
    pub task_id: String,
    pub started_at: u64,
    pub finished_at: u64,
    pub outcome: TaskRunOutcome,
    pub summary: String,
}

/// A unit of periodic background work.
#[async_trait]
pub trait BackgroundTask: Send + Sync {
    /// Stable task name used for registration and logs.
    fn name(&self) -> &str;

    /// Execute one run. Must not panic; transient failures return [`TaskOutcome::Retry`].
    async fn run(&self) -> TaskOutcome;
}

/// Returns current UTC seconds since epoch.
pub(crate) fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
