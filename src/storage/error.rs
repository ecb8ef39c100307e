//! Storage layer error types
//!
//! Defines all errors that can occur while reading or writing slots.

use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The SQLite backend rejected an operation
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization of the in-memory state failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A stored slot could not be decoded into the expected shape
    #[error("Corrupt data in slot '{slot}': {reason}")]
    Corrupt { slot: String, reason: String },

    /// Writing the value would exceed the backend's per-slot quota
    #[error("Storage quota exceeded for '{key}': {size} bytes (limit {limit})")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
