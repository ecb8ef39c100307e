//! Application error types
//!
//! Every mutator returns `AppResult`. How each variant reaches the user is
//! decided by [`Shell::dispatch`](crate::shell::Shell::dispatch).

use crate::ids::Id;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors raised by mutators
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid input; the state was not touched
    #[error("{0}")]
    Validation(String),

    /// The referenced entity no longer exists
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Id },

    /// The user dismissed a confirmation or prompt
    #[error("Action cancelled")]
    Declined,

    /// Password verification or hashing failed
    #[error("{0}")]
    Auth(String),

    /// A profile photo could not be read or encoded
    #[error("Photo error: {0}")]
    Photo(String),

    /// Persisting the state failed; the in-memory change is kept
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(kind: &'static str, id: Id) -> Self {
        AppError::NotFound { kind, id }
    }
}

/// Result type alias for mutators
pub type AppResult<T> = Result<T, AppError>;
