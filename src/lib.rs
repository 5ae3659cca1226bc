//! Kindred: background sync and notification dispatch for a couples app.
//!
//! Two periodic workers run against the records API:
//!
//! - **Partner activity watcher**: every 15 minutes, compares the partner's
//!   mood/activity counts for today with the last observed counts and
//!   notifies on growth.
//! - **Self-logging reminder**: daily at 20:00 local, reminds the user to log
//!   a mood and/or an activity if none exist for today.
//!
//! # Architecture
//!
//! Workers get their collaborators through constructors, normally from a
//! single [`AppContext`] built at startup:
//! - **Records**: [`records::RecordRepository`] (REST client in [`records::http`])
//! - **Counters**: [`counters::CounterStore`], the durable watcher baseline
//! - **Notifications**: [`notify::NotificationSink`]
//! - **Toggles**: [`toggles::ToggleSource`], read fresh on every run
//! - **Scheduling**: [`scheduler::Scheduler`], one tokio loop per task

pub mod clock;
pub mod config;
pub mod context;
pub mod counters;
pub mod error;
pub mod kindred_dirs;
pub mod notify;
pub mod records;
pub mod scheduler;
pub mod toggles;
pub mod workers;

pub use config::KindredConfig;
pub use context::{AppContext, Session};
pub use error::{KindredError, Result};
pub use scheduler::Scheduler;
pub use workers::{PartnerActivityWatcher, SelfLoggingReminder};
