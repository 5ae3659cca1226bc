use std::sync::atomic::Ordering;

use kindred::counters::LastSeenCounters;
use kindred::notify::NotificationCategory;
use kindred::scheduler::{BackgroundTask, TaskOutcome};
use kindred::workers::ReminderReport;

use crate::helpers::{Harness, activity, mood, today};

#[tokio::test]
async fn nothing_logged_reminds_both() {
    let h = Harness::new();

    let report = h.reminder().check().await.expect("check succeeds");

    assert_eq!(
        report,
        ReminderReport::Checked {
            date: today(),
            mood_reminded: true,
            activity_reminded: true,
        }
    );
    assert_eq!(h.sink.count(NotificationCategory::ReminderMood), 1);
    assert_eq!(h.sink.count(NotificationCategory::ReminderActivity), 1);
}

#[tokio::test]
async fn logged_mood_only_reminds_activity() {
    let h = Harness::new();
    h.repo.set_moods(vec![mood("Me", "good", 1)]);

    h.reminder().check().await.expect("check succeeds");

    assert_eq!(h.sink.count(NotificationCategory::ReminderMood), 0);
    assert_eq!(h.sink.count(NotificationCategory::ReminderActivity), 1);
}

#[tokio::test]
async fn everything_logged_sends_nothing() {
    let h = Harness::new();
    h.repo.set_moods(vec![mood("Me", "good", 1)]);
    h.repo.set_activities(vec![activity("Me", 2)]);

    let outcome = h.reminder().run().await;

    assert!(outcome.is_success());
    assert!(h.sink.events().is_empty());
}

#[tokio::test]
async fn consecutive_runs_remind_each_time() {
    let h = Harness::new();
    h.repo.set_moods(vec![mood("Me", "good", 1)]);
    let reminder = h.reminder();

    reminder.run().await;
    reminder.run().await;

    assert_eq!(h.sink.count(NotificationCategory::ReminderActivity), 2);
    assert_eq!(h.sink.count(NotificationCategory::ReminderMood), 0);
}

#[tokio::test]
async fn reminder_never_touches_counters() {
    let h = Harness::seeded(LastSeenCounters::new(5, 5));
    h.reminder().run().await;
    assert_eq!(h.store.snapshot().await, Some(LastSeenCounters::new(5, 5)));
}

#[tokio::test]
async fn disabled_reminders_skip_fetch() {
    let h = Harness::new();
    h.toggles.set_reminders_enabled(false);

    let outcome = h.reminder().run().await;

    assert_eq!(outcome, TaskOutcome::Success("reminders disabled".to_owned()));
    assert_eq!(h.repo.call_count(), 0);
    assert!(h.sink.events().is_empty());
}

#[tokio::test]
async fn notifications_toggle_does_not_gate_reminders() {
    let h = Harness::new();
    h.toggles.set_notifications_enabled(false);

    h.reminder().check().await.expect("check succeeds");

    assert_eq!(h.sink.events().len(), 2);
}

#[tokio::test]
async fn fetch_failure_is_retry_without_partial_reminders() {
    let h = Harness::new();
    h.repo.fail.store(true, Ordering::SeqCst);

    let outcome = h.reminder().run().await;

    assert!(matches!(outcome, TaskOutcome::Retry(_)));
    assert!(h.sink.events().is_empty());
}

#[tokio::test]
async fn permission_denied_is_not_a_failure() {
    let h = Harness::new();
    h.sink.deny_permission.store(true, Ordering::SeqCst);

    let outcome = h.reminder().run().await;

    assert!(outcome.is_success());
}
