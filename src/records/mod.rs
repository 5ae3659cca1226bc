//! Mood and activity records and the repository that serves them.
//!
//! The workers only ever ask for a single calendar day. A failed fetch is
//! surfaced as an error and is never confused with an empty day.

pub mod http;
pub mod types;

pub use http::HttpRecordRepository;
pub use types::{ActivityRecord, Category, DailyCount, MoodRecord, RecordPage};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;

/// Read access to the records API for the signed-in user and their partner.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// The partner's moods logged on `date`.
    async fn partner_moods(&self, date: NaiveDate) -> Result<Vec<MoodRecord>>;

    /// The partner's activities logged on `date`.
    async fn partner_activities(&self, date: NaiveDate) -> Result<Vec<ActivityRecord>>;

    /// The current user's moods logged on `date`.
    async fn moods(&self, date: NaiveDate) -> Result<Vec<MoodRecord>>;

    /// The current user's activities logged on `date`.
    async fn activities(&self, date: NaiveDate) -> Result<Vec<ActivityRecord>>;
}
