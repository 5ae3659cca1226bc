//! Routing of remote push messages onto local notification events.
//!
//! The push service delivers a flat string map plus an optional
//! title/body. `data["type"]` picks the category; unknown or missing types
//! become [`NotificationCategory::Generic`](super::NotificationCategory::Generic).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::event::NotificationEvent;
use super::glyph::mood_glyph;

/// A message received from the remote push service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PushMessage {
    pub data: HashMap<String, String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PushMessage {
    fn field(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Convert into the event shown to the user.
    #[must_use]
    pub fn into_event(self) -> NotificationEvent {
        let display_name = self.field("display_name").unwrap_or_default().to_owned();

        let mut event = match self.field("type") {
            Some("partner_mood") => {
                let token = self.field("mood_category").unwrap_or_default();
                NotificationEvent::partner_mood(display_name, mood_glyph(token))
            }
            Some("partner_activity") => {
                let count = self
                    .field("count")
                    .and_then(|c| c.parse::<u32>().ok())
                    .unwrap_or(1);
                NotificationEvent::partner_activity(display_name, count)
            }
            Some("reminder_mood") => NotificationEvent::reminder_mood(),
            Some("reminder_activity") => NotificationEvent::reminder_activity(),
            _ => NotificationEvent::generic(
                self.title.clone().unwrap_or_else(|| "Kindred".to_owned()),
                self.body.clone().unwrap_or_default(),
            ),
        };

        // Server-supplied wording overrides the local templates.
        if self.title.is_some() {
            event.payload.title = self.title;
        }
        if self.body.is_some() {
            event.payload.body = self.body;
        }
        event
    }
}
