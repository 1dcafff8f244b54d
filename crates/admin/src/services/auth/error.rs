//! Admin authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password did not match the stored credential.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The new password does not meet the minimum requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Hashing the password failed.
    #[error("failed to hash password")]
    PasswordHash,

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}
