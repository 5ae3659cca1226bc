//! The two background workers and their scheduler registrations.

pub mod partner_watcher;
pub mod reminder;

pub use partner_watcher::{PartnerActivityWatcher, TASK_PARTNER_WATCHER, WatchReport};
pub use reminder::{ReminderReport, SelfLoggingReminder, TASK_SELF_REMINDER};

use std::sync::Arc;

use crate::config::KindredConfig;
use crate::context::AppContext;
use crate::scheduler::{EnqueueOutcome, Schedule, Scheduler, TaskRegistration};

/// Watcher registration: every `watcher.interval_secs`, network required, keep existing.
#[must_use]
pub fn watcher_registration(config: &KindredConfig) -> TaskRegistration {
    TaskRegistration::new(
        TASK_PARTNER_WATCHER,
        Schedule::Interval {
            secs: config.watcher.period().as_secs(),
        },
    )
}

/// Reminder registration: daily at `reminder.hour:min` local, network required, keep existing.
#[must_use]
pub fn reminder_registration(config: &KindredConfig) -> TaskRegistration {
    TaskRegistration::new(
        TASK_SELF_REMINDER,
        Schedule::Daily {
            hour: config.reminder.hour,
            min: config.reminder.min,
        },
    )
}

/// Register both workers with `scheduler`. Repeated calls are no-ops.
pub fn register_all(scheduler: &mut Scheduler, ctx: &AppContext) -> [EnqueueOutcome; 2] {
    let watcher = scheduler.enqueue_unique_periodic(
        watcher_registration(&ctx.config),
        Arc::new(PartnerActivityWatcher::from_context(ctx)),
    );
    let reminder = scheduler.enqueue_unique_periodic(
        reminder_registration(&ctx.config),
        Arc::new(SelfLoggingReminder::from_context(ctx)),
    );
    [watcher, reminder]
}
