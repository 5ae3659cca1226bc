//! Error types for the kindred background workers.

/// Top-level error type for sync and notification dispatch.
#[derive(Debug, thiserror::Error)]
pub enum KindredError {
    /// Records API fetch, transport, or decode error.
    #[error("repository error: {0}")]
    Repository(String),

    /// Durable counter store read/write error.
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, KindredError>;
