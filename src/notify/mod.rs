//! Notification events, rendering, and sinks.

pub mod event;
pub mod glyph;
pub mod push;
pub mod sink;

pub use event::{NotificationCategory, NotificationEvent, NotificationPayload, RenderedNotification};
pub use glyph::{DEFAULT_GLYPH, mood_glyph};
pub use push::PushMessage;
pub use sink::{ChannelSink, LogSink, NotificationSink, SinkError, dispatch};
