//! REST-backed [`RecordRepository`].
//!
//! Endpoints (all `GET`, bearer-authenticated):
//!
//! | Records | Path |
//! |---------|------|
//! | own moods | `{base}/moods` |
//! | own activities | `{base}/activities` |
//! | partner moods | `{base}/partner/moods` |
//! | partner activities | `{base}/partner/activities` |
//!
//! Each takes `date=YYYY-MM-DD&page=N&page_size=M` and returns a
//! [`RecordPage`]. Pages are followed until `page == total_pages`.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::context::Session;
use crate::error::{KindredError, Result};
use crate::records::RecordRepository;
use crate::records::types::{ActivityRecord, MoodRecord, RecordPage};

/// Hard stop for runaway pagination.
const MAX_PAGES: u32 = 100;

/// Records API client.
pub struct HttpRecordRepository {
    base_url: String,
    page_size: u32,
    session: Session,
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpRecordRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRecordRepository")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl HttpRecordRepository {
    /// Create a client for the configured API.
    ///
    /// # Errors
    ///
    /// Returns [`KindredError::Config`] if the base URL does not parse.
    pub fn new(config: &ApiConfig, session: Session) -> Result<Self> {
        url::Url::parse(&config.base_url)
            .map_err(|e| KindredError::Config(format!("invalid api.base_url: {e}")))?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            page_size: config.page_size.max(1),
            session,
            client: reqwest::Client::new(),
        })
    }

    /// Fetch every page of `path` for `date`.
    async fn fetch_all<T: DeserializeOwned>(&self, path: &str, date: NaiveDate) -> Result<Vec<T>> {
        let url = format!("{}/{path}", self.base_url);
        let date_param = date.format("%Y-%m-%d").to_string();
        let mut items = Vec::new();
        let mut page = 1_u32;

        loop {
            let page_data: RecordPage<T> = self.fetch_page(&url, &date_param, page).await?;
            let has_next = page_data.has_next();
            items.extend(page_data.items);

            if !has_next {
                break;
            }
            if page >= MAX_PAGES {
                return Err(KindredError::Repository(format!(
                    "{path}: more than {MAX_PAGES} pages for {date_param}"
                )));
            }
            page += 1;
        }

        debug!(path, date = %date_param, count = items.len(), "fetched records");
        Ok(items)
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        url: &str,
        date: &str,
        page: u32,
    ) -> Result<RecordPage<T>> {
        let mut request = self.client.get(url).query(&[
            ("date", date.to_owned()),
            ("page", page.to_string()),
            ("page_size", self.page_size.to_string()),
        ]);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| KindredError::Repository(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &body));
        }

        response
            .json::<RecordPage<T>>()
            .await
            .map_err(|e| KindredError::Repository(format!("cannot decode {url}: {e}")))
    }
}

fn map_http_error(status: reqwest::StatusCode, body: &str) -> KindredError {
    let message = extract_error_message(body);
    match status.as_u16() {
        401 | 403 => KindredError::Repository(format!("not authorized: {message}")),
        _ => KindredError::Repository(format!("HTTP {}: {message}", status.as_u16())),
    }
}

/// Pull `{"message": ...}` out of an error body, falling back to the raw text.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_owned())
}

#[async_trait]
impl RecordRepository for HttpRecordRepository {
    async fn partner_moods(&self, date: NaiveDate) -> Result<Vec<MoodRecord>> {
        self.fetch_all("partner/moods", date).await
    }

    async fn partner_activities(&self, date: NaiveDate) -> Result<Vec<ActivityRecord>> {
        self.fetch_all("partner/activities", date).await
    }

    async fn moods(&self, date: NaiveDate) -> Result<Vec<MoodRecord>> {
        self.fetch_all("moods", date).await
    }

    async fn activities(&self, date: NaiveDate) -> Result<Vec<ActivityRecord>> {
        self.fetch_all("activities", date).await
    }
}
