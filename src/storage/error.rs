//! Storage-specific error types.
//!
//! Connectivity and statement failures surface as [`StorageError`]. The gateway
//! wraps them into [`PersistError`] so callers can tell a caller bug
//! ([`PersistError::EmptyInput`]) from a store failure.

use thiserror::Error;

use crate::storage::WriteMode;

/// Errors that can occur in the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database operation failed (sqlx error).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No usable connection could be established.
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// A gateway was given two strategies for the same mode.
    #[error("more than one write strategy registered for {0}")]
    DuplicateStrategy(WriteMode),
}

/// Outcome of a failed [`CpuInfoGateway::save`](crate::storage::CpuInfoGateway::save).
#[derive(Debug, Error)]
pub enum PersistError {
    /// Nothing to persist. Signals a bug in the caller; no I/O was performed.
    #[error("refusing to persist an empty cpu info record")]
    EmptyInput,

    /// The store rejected or failed the write. Nothing was committed.
    #[error("cpu info write failed: {0}")]
    WriteFailed(#[source] StorageError),
}
