//! Daily self-logging reminder.
//!
//! Checks live against today's records on every run; no state is carried
//! between runs, so two runs on the same day remind twice.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::context::AppContext;
use crate::error::Result;
use crate::notify::{NotificationEvent, NotificationSink, dispatch};
use crate::records::RecordRepository;
use crate::scheduler::{BackgroundTask, TaskOutcome};
use crate::toggles::ToggleSource;

/// Registration name of the reminder.
pub const TASK_SELF_REMINDER: &str = "self_logging_reminder";

/// What one reminder run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderReport {
    /// Reminders are switched off.
    Disabled,
    Checked {
        date: NaiveDate,
        mood_reminded: bool,
        activity_reminded: bool,
    },
}

/// Reminds the user to log a mood and an activity for today.
pub struct SelfLoggingReminder {
    repository: Arc<dyn RecordRepository>,
    sink: Arc<dyn NotificationSink>,
    toggles: Arc<dyn ToggleSource>,
    clock: Arc<dyn Clock>,
}

impl SelfLoggingReminder {
    pub fn new(
        repository: Arc<dyn RecordRepository>,
        sink: Arc<dyn NotificationSink>,
        toggles: Arc<dyn ToggleSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            sink,
            toggles,
            clock,
        }
    }

    #[must_use]
    pub fn from_context(ctx: &AppContext) -> Self {
        Self::new(
            Arc::clone(&ctx.repository),
            Arc::clone(&ctx.sink),
            Arc::clone(&ctx.toggles),
            Arc::clone(&ctx.clock),
        )
    }

    /// Run one check. Both lists are fetched before anything is sent.
    pub async fn check(&self) -> Result<ReminderReport> {
        if !self.toggles.reminders_enabled().await {
            debug!("reminders disabled, skipping");
            return Ok(ReminderReport::Disabled);
        }

        let date = self.clock.today();
        let moods = self.repository.moods(date).await?;
        let activities = self.repository.activities(date).await?;

        let mood_reminded = moods.is_empty();
        if mood_reminded {
            dispatch(self.sink.as_ref(), &NotificationEvent::reminder_mood()).await;
        }

        let activity_reminded = activities.is_empty();
        if activity_reminded {
            dispatch(self.sink.as_ref(), &NotificationEvent::reminder_activity()).await;
        }

        Ok(ReminderReport::Checked {
            date,
            mood_reminded,
            activity_reminded,
        })
    }
}

#[async_trait]
impl BackgroundTask for SelfLoggingReminder {
    fn name(&self) -> &str {
        TASK_SELF_REMINDER
    }

    async fn run(&self) -> TaskOutcome {
        match self.check().await {
            Ok(ReminderReport::Disabled) => TaskOutcome::Success("reminders disabled".to_owned()),
            Ok(ReminderReport::Checked {
                date,
                mood_reminded,
                activity_reminded,
            }) => TaskOutcome::Success(format!(
                "{date}: reminded mood={mood_reminded}, activity={activity_reminded}"
            )),
            Err(e) => {
                warn!(task = TASK_SELF_REMINDER, "reminder check failed: {e}");
                TaskOutcome::Retry(e.to_string())
            }
        }
    }
}
