//! Admin authentication service.
//!
//! A single username/password pair guards the dashboard. The password is
//! stored as an Argon2 PHC string under `reeldeal_admin_credentials`,
//! seeded from configuration the first time the admin starts.

mod error;

pub use error::AuthError;

use std::time::Duration;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};

use crate::db::{RecordStore, StoredCredentials};
use crate::models::CurrentAdmin;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Admin authentication service.
#[derive(Clone)]
pub struct AuthService {
    store: RecordStore,
    login_delay: Duration,
}

impl AuthService {
    /// Create a new authentication service.
    ///
    /// `login_delay` is slept before every attempt, successful or not.
    #[must_use]
    pub const fn new(store: RecordStore, login_delay: Duration) -> Self {
        Self { store, login_delay }
    }

    /// Write the initial credential if none is stored yet.
    ///
    /// Returns `true` when a credential was written. An existing credential
    /// is never overwritten, so a password changed through the CLI survives
    /// restarts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the configured password is too
    /// short, or `AuthError::Repository` if storage fails.
    pub async fn ensure_credentials(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<bool, AuthError> {
        if self.store.load_credentials().await?.is_some() {
            return Ok(false);
        }

        self.set_password(username, password).await?;
        tracing::info!(username, "Seeded admin credentials");
        Ok(true)
    }

    /// Replace the stored credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the password is shorter than
    /// [`MIN_PASSWORD_LENGTH`], `AuthError::PasswordHash` if hashing fails,
    /// or `AuthError::Repository` if storage fails.
    pub async fn set_password(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<(), AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::WeakPassword("username cannot be empty".to_string()));
        }
        validate_password(password.expose_secret())?;

        let credentials = StoredCredentials {
            username: username.to_string(),
            password_hash: hash_password(password.expose_secret())?,
        };
        self.store.save_credentials(&credentials).await?;
        Ok(())
    }

    /// Check a login attempt against the stored credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no credential is stored or
    /// either field does not match.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<CurrentAdmin, AuthError> {
        tokio::time::sleep(self.login_delay).await;

        let stored = self
            .store
            .load_credentials()
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Verify even on a username mismatch so both failures cost the same.
        let password_ok = verify_password(password, &stored.password_hash).is_ok();
        if username != stored.username || !password_ok {
            tracing::warn!("Failed admin login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!("Admin logged in");
        Ok(CurrentAdmin::new(stored.username))
    }
}

/// Validate a new password.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is too short.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
