//! Background task scheduler.
//!
//! Runs the partner watcher and the daily reminder on their own cadences,
//! with keep-existing registration, a connectivity precondition, and
//! exponential retry backoff.

pub mod delay;
pub mod network;
pub mod runner;
pub mod tasks;

pub use runner::{BackoffPolicy, EnqueueOutcome, Scheduler};
pub use tasks::{
    BackgroundTask, ExistingTaskPolicy, Schedule, TaskOutcome, TaskRegistration, TaskRunOutcome,
    TaskRunRecord,
};
