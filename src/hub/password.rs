//! Hub password hashing and verification using Argon2
//!
//! The password slot holds a PHC-formatted argon2id hash. A slot written by
//! older versions may still hold the bare password; it is recognised as
//! legacy and compared directly so it can be upgraded on first use.

use crate::error::{AppError, AppResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password using Argon2id with a fresh random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Auth(format!("Failed to hash password: {e}")))
}

/// Whether a stored value is a PHC hash rather than a legacy bare password
pub fn is_hashed(stored: &str) -> bool {
    stored.starts_with("$argon2")
}

/// Outcome of checking a password against the stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Mismatch,
    Match,
    /// Matched a legacy bare password that should be re-stored as a hash
    MatchLegacy,
}

impl PasswordCheck {
    pub fn is_match(&self) -> bool {
        !matches!(self, PasswordCheck::Mismatch)
    }
}

/// Verify a password against the stored hash (or legacy bare value)
///
/// A stored value that looks like a hash but cannot be checked is an
/// `Auth` error, never a plain mismatch.
pub fn verify_password(password: &str, stored: &str) -> AppResult<PasswordCheck> {
    if !is_hashed(stored) {
        return Ok(if password == stored {
            PasswordCheck::MatchLegacy
        } else {
            PasswordCheck::Mismatch
        });
    }

    let parsed_hash = PasswordHash::new(stored)
        .map_err(|e| AppError::Auth(format!("Invalid password hash format: {e}")))?;
    if parsed_hash.hash.is_none() {
        tracing::error!("Stored hub password hash has no digest");
        return Err(AppError::Auth(
            "Stored password is damaged and cannot be checked.".to_string(),
        ));
    }

    Ok(
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
        {
            PasswordCheck::Match
        } else {
            PasswordCheck::Mismatch
        },
    )
}
