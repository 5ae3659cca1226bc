use std::sync::Arc;
use std::sync::atomic::Ordering;

use kindred::PartnerActivityWatcher;
use kindred::counters::LastSeenCounters;
use kindred::notify::{NotificationCategory, NotificationEvent};
use kindred::scheduler::{BackgroundTask, TaskOutcome};
use kindred::workers::WatchReport;

use crate::helpers::{Harness, ReadOnlyStore, activity, clock, mood, today};

#[tokio::test]
async fn first_partner_mood_notifies_with_glyph() {
    let h = Harness::new();
    h.repo.set_partner_moods(vec![mood("Alex", "great", 5)]);

    let outcome = h.watcher().run().await;

    assert!(outcome.is_success(), "outcome: {outcome:?}");
    assert_eq!(
        h.sink.events(),
        vec![NotificationEvent::partner_mood("Alex", "😄")]
    );
    assert_eq!(h.stored().await, LastSeenCounters::new(1, 0));
    assert_eq!(h.sink.count(NotificationCategory::PartnerActivity), 0);
}

#[tokio::test]
async fn unchanged_mood_count_is_suppressed_but_persisted() {
    let h = Harness::seeded(LastSeenCounters::new(2, 1));
    h.repo
        .set_partner_moods(vec![mood("Alex", "good", 1), mood("Alex", "bad", 2)]);
    h.repo.set_partner_activities(vec![activity("Alex", 3)]);

    let report = h.watcher().check().await.expect("check succeeds");

    assert!(h.sink.events().is_empty());
    assert!(!report.notified_any());
    assert_eq!(h.stored().await, LastSeenCounters::new(2, 1));
}

#[tokio::test]
async fn growth_by_several_entries_notifies_once() {
    let h = Harness::seeded(LastSeenCounters::new(2, 0));
    h.repo.set_partner_moods(vec![
        mood("Alex", "ok", 1),
        mood("Alex", "bad", 2),
        mood("Alex", "tired", 3),
        mood("Alex", "loved", 9),
        mood("Alex", "angry", 4),
    ]);

    h.watcher().check().await.expect("check succeeds");

    assert_eq!(h.sink.count(NotificationCategory::PartnerMood), 1);
    assert_eq!(
        h.sink.events()[0].payload.emoji.as_deref(),
        Some("🥰"),
        "newest mood wins"
    );
    assert_eq!(h.stored().await.mood_count, 5);
}

#[tokio::test]
async fn mood_growth_alone_does_not_notify_activity() {
    let h = Harness::seeded(LastSeenCounters::new(0, 2));
    h.repo.set_partner_moods(vec![mood("Alex", "good", 1)]);
    h.repo
        .set_partner_activities(vec![activity("Alex", 1), activity("Alex", 2)]);

    h.watcher().check().await.expect("check succeeds");

    assert_eq!(h.sink.count(NotificationCategory::PartnerMood), 1);
    assert_eq!(h.sink.count(NotificationCategory::PartnerActivity), 0);
    assert_eq!(h.stored().await, LastSeenCounters::new(1, 2));
}

#[tokio::test]
async fn both_categories_fire_in_one_run() {
    let h = Harness::new();
    h.repo.set_partner_moods(vec![mood("Sam", "genial", 1)]);
    h.repo
        .set_partner_activities(vec![activity("Sam", 1), activity("Sam", 2), activity("Sam", 3)]);

    h.watcher().check().await.expect("check succeeds");

    let events = h.sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], NotificationEvent::partner_mood("Sam", "😄"));
    assert_eq!(events[1], NotificationEvent::partner_activity("Sam", 3));
    assert_eq!(events[1].render().body, "Sam logged 3 activities today.");
}

#[tokio::test]
async fn single_activity_uses_singular_wording() {
    let h = Harness::new();
    h.repo.set_partner_activities(vec![activity("Sam", 1)]);

    h.watcher().check().await.expect("check succeeds");

    let events = h.sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].render().body, "Sam logged 1 activity today.");
}

#[tokio::test]
async fn disabled_toggle_skips_all_work() {
    let h = Harness::new();
    h.toggles.set_notifications_enabled(false);
    h.repo.set_partner_moods(vec![mood("Alex", "great", 1)]);
    h.repo.set_partner_activities(vec![activity("Alex", 1)]);

    let outcome = h.watcher().run().await;

    assert_eq!(outcome, TaskOutcome::Success("notifications disabled".to_owned()));
    assert_eq!(h.repo.call_count(), 0);
    assert!(h.sink.events().is_empty());
    assert_eq!(h.stored().await, LastSeenCounters::default());
}

#[tokio::test]
async fn toggle_is_read_fresh_each_run() {
    let h = Harness::new();
    let watcher = h.watcher();
    h.repo.set_partner_moods(vec![mood("Alex", "great", 1)]);

    h.toggles.set_notifications_enabled(false);
    assert_eq!(watcher.check().await.expect("check"), WatchReport::Disabled);

    h.toggles.set_notifications_enabled(true);
    watcher.check().await.expect("check");
    assert_eq!(h.sink.count(NotificationCategory::PartnerMood), 1);
}

#[tokio::test]
async fn fetch_failure_retries_and_keeps_baseline() {
    let h = Harness::seeded(LastSeenCounters::new(1, 1));
    h.repo.fail.store(true, Ordering::SeqCst);

    let outcome = h.watcher().run().await;

    assert!(matches!(outcome, TaskOutcome::Retry(_)));
    assert!(h.sink.events().is_empty());
    assert_eq!(h.stored().await, LastSeenCounters::new(1, 1));
}

#[tokio::test]
async fn permission_denied_does_not_block_persist() {
    let h = Harness::new();
    h.sink.deny_permission.store(true, Ordering::SeqCst);
    h.repo.set_partner_moods(vec![mood("Alex", "great", 1)]);

    let outcome = h.watcher().run().await;

    assert!(outcome.is_success());
    assert_eq!(h.sink.events().len(), 1);
    assert_eq!(h.stored().await, LastSeenCounters::new(1, 0));
}

#[tokio::test]
async fn store_write_failure_is_a_retry() {
    let h = Harness::new();
    h.repo.set_partner_moods(vec![mood("Alex", "great", 1)]);
    let watcher = PartnerActivityWatcher::new(
        h.repo.clone(),
        Arc::new(ReadOnlyStore::default()),
        h.sink.clone(),
        h.toggles.clone(),
        clock(),
    );

    let outcome = watcher.run().await;

    assert!(matches!(outcome, TaskOutcome::Retry(ref msg) if msg.contains("disk full")));
}

#[tokio::test]
async fn decrease_then_increase_compares_against_latest_baseline() {
    let h = Harness::seeded(LastSeenCounters::new(3, 0));
    let watcher = h.watcher();

    // Partner deleted two moods: baseline drops to 1 without notifying.
    h.repo.set_partner_moods(vec![mood("Alex", "good", 1)]);
    watcher.check().await.expect("check");
    assert!(h.sink.events().is_empty());
    assert_eq!(h.stored().await.mood_count, 1);

    // One new mood: 2 > 1 notifies even though 2 < the old baseline of 3.
    h.repo
        .set_partner_moods(vec![mood("Alex", "good", 1), mood("Alex", "awful", 2)]);
    watcher.check().await.expect("check");
    assert_eq!(h.sink.events(), vec![NotificationEvent::partner_mood("Alex", "😢")]);
}

#[tokio::test]
async fn queries_are_scoped_to_today() {
    let h = Harness::new();
    h.watcher().check().await.expect("check");

    let dates = h.repo.dates.lock().expect("lock").clone();
    assert_eq!(dates, vec![today(), today()]);
}

#[tokio::test]
async fn unknown_mood_token_uses_default_glyph() {
    let h = Harness::new();
    h.repo.set_partner_moods(vec![mood("Alex", "meh", 1)]);

    h.watcher().check().await.expect("check");

    assert_eq!(
        h.sink.events()[0].payload.emoji.as_deref(),
        Some(kindred::notify::DEFAULT_GLYPH)
    );
}
