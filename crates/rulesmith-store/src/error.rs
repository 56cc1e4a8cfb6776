//! Error types for the store backends.

use thiserror::Error;

/// Errors that can occur during backend operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record column serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data in storage (e.g. a stored id that does not parse).
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// The connection mutex was poisoned by a panicking thread.
    #[error("storage mutex poisoned")]
    Poisoned,

    /// The blocking storage task failed before completing.
    #[error("storage task failed: {0}")]
    TaskFailed(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, StoreError>;
