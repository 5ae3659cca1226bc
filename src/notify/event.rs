//! Notification events handed to a [`NotificationSink`](super::NotificationSink).

use serde::{Deserialize, Serialize};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    /// The partner logged a new mood.
    PartnerMood,
    /// The partner logged new activities.
    PartnerActivity,
    /// The user has not logged a mood today.
    ReminderMood,
    /// The user has not logged an activity today.
    ReminderActivity,
    /// Free-form title/body message (e.g. from the push service).
    Generic,
}

impl NotificationCategory {
    /// Stable identifier, also used as the host notification channel id.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PartnerMood => "partner_mood",
            Self::PartnerActivity => "partner_activity",
            Self::ReminderMood => "reminder_mood",
            Self::ReminderActivity => "reminder_activity",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional fields carried by an event. Which ones are set depends on the category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// A notification to display. Built per run and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub category: NotificationCategory,
    pub payload: NotificationPayload,
}

/// Title and body ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedNotification {
    pub category: NotificationCategory,
    pub title: String,
    pub body: String,
}

const FALLBACK_PARTNER_NAME: &str = "Your partner";

impl NotificationEvent {
    /// The partner logged a mood.
    pub fn partner_mood(display_name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            category: NotificationCategory::PartnerMood,
            payload: NotificationPayload {
                display_name: Some(display_name.into()),
                emoji: Some(emoji.into()),
                ..NotificationPayload::default()
            },
        }
    }

    /// The partner has logged `count` activities today.
    pub fn partner_activity(display_name: impl Into<String>, count: u32) -> Self {
        Self {
            category: NotificationCategory::PartnerActivity,
            payload: NotificationPayload {
                display_name: Some(display_name.into()),
                count: Some(count),
                ..NotificationPayload::default()
            },
        }
    }

    /// Remind the user to log a mood.
    #[must_use]
    pub fn reminder_mood() -> Self {
        Self {
            category: NotificationCategory::ReminderMood,
            payload: NotificationPayload::default(),
        }
    }

    /// Remind the user to log an activity.
    #[must_use]
    pub fn reminder_activity() -> Self {
        Self {
            category: NotificationCategory::ReminderActivity,
            payload: NotificationPayload::default(),
        }
    }

    /// Free-form message.
    pub fn generic(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            category: NotificationCategory::Generic,
            payload: NotificationPayload {
                title: Some(title.into()),
                body: Some(body.into()),
                ..NotificationPayload::default()
            },
        }
    }

    /// Produce the displayed title and body.
    ///
    /// An explicit `title`/`body` in the payload always wins over the
    /// category's default wording.
    #[must_use]
    pub fn render(&self) -> RenderedNotification {
        let name = self
            .payload
            .display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(FALLBACK_PARTNER_NAME);

        let (title, body) = match self.category {
            NotificationCategory::PartnerMood => {
                let emoji = self
                    .payload
                    .emoji
                    .as_deref()
                    .unwrap_or(super::glyph::DEFAULT_GLYPH);
                (
                    format!("{name} shared a mood {emoji}"),
                    format!("See how {name} is feeling today."),
                )
            }
            NotificationCategory::PartnerActivity => {
                let count = self.payload.count.unwrap_or(1);
                (
                    format!("{name} is keeping busy"),
                    activity_phrase(name, count),
                )
            }
            NotificationCategory::ReminderMood => (
                "How are you feeling?".to_owned(),
                "You haven't logged a mood today. Take a moment to check in.".to_owned(),
            ),
            NotificationCategory::ReminderActivity => (
                "What did you do today?".to_owned(),
                "You haven't logged an activity today. Add one before the day ends.".to_owned(),
            ),
            NotificationCategory::Generic => ("Kindred".to_owned(), String::new()),
        };

        RenderedNotification {
            category: self.category,
            title: self.payload.title.clone().unwrap_or(title),
            body: self.payload.body.clone().unwrap_or(body),
        }
    }
}

/// Singular wording for exactly one activity, plural otherwise.
fn activity_phrase(name: &str, count: u32) -> String {
    if count == 1 {
        format!("{name} logged 1 activity today.")
    } else {
        format!("{name} logged {count} activities today.")
    }
}
