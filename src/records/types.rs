//! Record types returned by the records API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Kind of tracked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A logged mood.
    Mood,
    /// A logged activity.
    Activity,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mood => write!(f, "mood"),
            Self::Activity => write!(f, "activity"),
        }
    }
}

/// A mood entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodRecord {
    /// Server-assigned identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name of the author.
    pub display_name: String,
    /// Free-form mood token (e.g. `"great"`, `"genial"`).
    pub mood_category: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// Server-assigned identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name of the author.
    pub display_name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Count of one category's entries for one day. Produced per poll, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub category: Category,
    pub date: NaiveDate,
    pub count: u32,
}

impl DailyCount {
    /// Count a fetched list of records.
    #[must_use]
    pub fn of<T>(category: Category, date: NaiveDate, records: &[T]) -> Self {
        Self {
            category,
            date,
            count: u32::try_from(records.len()).unwrap_or(u32::MAX),
        }
    }
}

/// One page of a paginated list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPage<T> {
    /// Records on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// 1-based page number.
    #[serde(default = "first_page")]
    pub page: u32,
    /// Total number of pages for the query.
    #[serde(default = "first_page")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> RecordPage<T> {
    /// Returns `true` when more pages follow this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Most recently created mood, if any.
#[must_use]
pub fn latest_mood(moods: &[MoodRecord]) -> Option<&MoodRecord> {
    moods.iter().max_by_key(|m| m.created_at)
}

/// Most recently created activity, if any.
#[must_use]
pub fn latest_activity(activities: &[ActivityRecord]) -> Option<&ActivityRecord> {
    activities.iter().max_by_key(|a| a.created_at)
}
