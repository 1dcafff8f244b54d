//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

/// Display name given to the single admin account.
pub const ADMIN_DISPLAY_NAME: &str = "Site Owner";

/// Session-stored admin identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Login name.
    pub username: String,
    /// Display name shown in the sidebar.
    pub name: String,
}

impl CurrentAdmin {
    /// Identity for a successfully authenticated username.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            name: ADMIN_DISPLAY_NAME.to_string(),
        }
    }
}

/// Session keys for admin state.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for pending one-shot notifications.
    pub const FLASH: &str = "flash";
}
