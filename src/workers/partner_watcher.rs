//! Partner activity watcher.
//!
//! Every run compares the partner's mood and activity counts for today with
//! the last observed counts and notifies once per category that grew. The
//! new counts are written back at the very end of the run, whether or not
//! anything was sent, so an interrupted run leaves the baseline untouched.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::context::AppContext;
use crate::counters::{CounterStore, LastSeenCounters};
use crate::error::Result;
use crate::notify::{NotificationEvent, NotificationSink, dispatch, mood_glyph};
use crate::records::types::{latest_activity, latest_mood};
use crate::records::{Category, DailyCount, RecordRepository};
use crate::scheduler::{BackgroundTask, TaskOutcome};
use crate::toggles::ToggleSource;

/// Registration name of the watcher.
pub const TASK_PARTNER_WATCHER: &str = "partner_activity_watcher";

/// What one watcher run observed and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchReport {
    /// Notifications are switched off; nothing was fetched or written.
    Disabled,
    /// The run completed and persisted `counters` as the new baseline.
    Checked {
        date: NaiveDate,
        previous: LastSeenCounters,
        counters: LastSeenCounters,
        mood_notified: bool,
        activity_notified: bool,
    },
}

impl WatchReport {
    /// Returns `true` if the run sent at least one notification.
    #[must_use]
    pub fn notified_any(&self) -> bool {
        matches!(
            self,
            Self::Checked {
                mood_notified: true,
                ..
            } | Self::Checked {
                activity_notified: true,
                ..
            }
        )
    }

    fn summary(&self) -> String {
        match self {
            Self::Disabled => "notifications disabled".to_owned(),
            Self::Checked {
                date,
                counters,
                mood_notified,
                activity_notified,
                ..
            } => format!(
                "{date}: partner moods={} activities={} (notified mood={mood_notified}, activity={activity_notified})",
                counters.mood_count, counters.activity_count
            ),
        }
    }
}

/// Detects new partner entries for the current day.
pub struct PartnerActivityWatcher {
    repository: Arc<dyn RecordRepository>,
    counters: Arc<dyn CounterStore>,
    sink: Arc<dyn NotificationSink>,
    toggles: Arc<dyn ToggleSource>,
    clock: Arc<dyn Clock>,
}

impl PartnerActivityWatcher {
    pub fn new(
        repository: Arc<dyn RecordRepository>,
        counters: Arc<dyn CounterStore>,
        sink: Arc<dyn NotificationSink>,
        toggles: Arc<dyn ToggleSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            counters,
            sink,
            toggles,
            clock,
        }
    }

    /// Build a watcher from the shared application context.
    #[must_use]
    pub fn from_context(ctx: &AppContext) -> Self {
        Self::new(
            Arc::clone(&ctx.repository),
            Arc::clone(&ctx.counters),
            Arc::clone(&ctx.sink),
            Arc::clone(&ctx.toggles),
            Arc::clone(&ctx.clock),
        )
    }

    /// Run one comparison.
    ///
    /// # Errors
    ///
    /// Returns the first repository or store error. The baseline is not
    /// written in that case.
    pub async fn check(&self) -> Result<WatchReport> {
        if !self.toggles.notifications_enabled().await {
            debug!("partner notifications disabled, skipping");
            return Ok(WatchReport::Disabled);
        }

        let date = self.clock.today();
        let moods = self.repository.partner_moods(date).await?;
        let activities = self.repository.partner_activities(date).await?;

        let mood_count = DailyCount::of(Category::Mood, date, &moods);
        let activity_count = DailyCount::of(Category::Activity, date, &activities);
        let current = LastSeenCounters::new(mood_count.count, activity_count.count);
        let previous = self.counters.read().await?;

        let mut mood_notified = false;
        if current.mood_count > previous.mood_count {
            if let Some(latest) = latest_mood(&moods) {
                let event = NotificationEvent::partner_mood(
                    latest.display_name.clone(),
                    mood_glyph(&latest.mood_category),
                );
                dispatch(self.sink.as_ref(), &event).await;
                mood_notified = true;
            }
        }

        let mut activity_notified = false;
        if current.activity_count > previous.activity_count {
            if let Some(latest) = latest_activity(&activities) {
                let event = NotificationEvent::partner_activity(
                    latest.display_name.clone(),
                    current.activity_count,
                );
                dispatch(self.sink.as_ref(), &event).await;
                activity_notified = true;
            }
        }

        self.counters.write(current).await?;

        Ok(WatchReport::Checked {
            date,
            previous,
            counters: current,
            mood_notified,
            activity_notified,
        })
    }
}

#[async_trait]
impl BackgroundTask for PartnerActivityWatcher {
    fn name(&self) -> &str {
        TASK_PARTNER_WATCHER
    }

    async fn run(&self) -> TaskOutcome {
        match self.check().await {
            Ok(report) => {
                let summary = report.summary();
                if report.notified_any() {
                    info!("{summary}");
                }
                TaskOutcome::Success(summary)
            }
            Err(e) => {
                warn!(task = TASK_PARTNER_WATCHER, "partner check failed: {e}");
                TaskOutcome::Retry(e.to_string())
            }
        }
    }
}
