//! Stored admin credential.

use serde::{Deserialize, Serialize};

/// Storage key of the credential record.
pub const CREDENTIALS_KEY: &str = "reeldeal_admin_credentials";

/// The single admin login: a username and an Argon2 PHC hash string.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredentials {
    pub username: String,
    pub password_hash: String,
}

impl std::fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}
