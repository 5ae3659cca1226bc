//! Notification sinks.
//!
//! Workers never fail because a notification could not be shown. They go
//! through [`dispatch`], which logs and swallows sink errors.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::event::{NotificationEvent, RenderedNotification};

/// Failure reported by a sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    /// The OS or user revoked notification permission.
    #[error("notification permission denied")]
    PermissionDenied,
    /// Any other delivery failure.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Displays notifications to the user.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Show `event`.
    async fn send(&self, event: &NotificationEvent) -> Result<(), SinkError>;
}

/// Send `event` to `sink`, logging and discarding any failure.
///
/// Returns `true` when the sink accepted the notification.
pub async fn dispatch(sink: &dyn NotificationSink, event: &NotificationEvent) -> bool {
    match sink.send(event).await {
        Ok(()) => {
            debug!(category = %event.category, "notification dispatched");
            true
        }
        Err(SinkError::PermissionDenied) => {
            warn!(category = %event.category, "notification permission denied, skipping");
            false
        }
        Err(e) => {
            warn!(category = %event.category, "notification not delivered: {e}");
            false
        }
    }
}

/// Forwards rendered notifications to the host UI over a channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<RenderedNotification>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<RenderedNotification>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl NotificationSink for ChannelSink {
    async fn send(&self, event: &NotificationEvent) -> Result<(), SinkError> {
        self.tx
            .send(event.render())
            .map_err(|_| SinkError::Delivery("notification channel closed".to_owned()))
    }
}

/// Writes notifications to the log. Used by the headless agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn send(&self, event: &NotificationEvent) -> Result<(), SinkError> {
        let rendered = event.render();
        info!(
            category = %rendered.category,
            title = %rendered.title,
            body = %rendered.body,
            "notification"
        );
        Ok(())
    }
}
