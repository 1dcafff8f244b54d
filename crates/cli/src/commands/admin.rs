//! Admin credential management.
//!
//! # Usage
//!
//! ```bash
//! echo 'new-password' | rd-cli admin set-password -u admin
//! ```

use std::io::BufRead;
use std::time::Duration;

use reeldeal_admin::db::RecordStore;
use reeldeal_admin::services::AuthService;
use secrecy::SecretString;

use super::CommandError;

/// Read one line from `input` as the new password.
///
/// # Errors
///
/// Returns an error if nothing could be read.
pub fn read_password(mut input: impl BufRead) -> Result<SecretString, CommandError> {
    let mut line = String::new();
    input.read_line(&mut line)?;

    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(CommandError::Input(
            "expected the new password on stdin".to_string(),
        ));
    }
    Ok(SecretString::from(password.to_string()))
}

/// Replace the stored admin credential.
///
/// # Errors
///
/// Returns an error if the password is too short or the store cannot be
/// written.
pub async fn set_password(
    store: &RecordStore,
    username: &str,
    password: &SecretString,
) -> Result<(), CommandError> {
    let auth = AuthService::new(store.clone(), Duration::ZERO);
    auth.set_password(username, password).await?;

    tracing::info!(username, "Admin credential updated");
    Ok(())
}
