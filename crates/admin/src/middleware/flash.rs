//! One-shot notifications carried across a redirect.
//!
//! A handler pushes a message before redirecting; the next rendered page
//! takes and displays it. Session failures are logged and swallowed.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session_keys;

/// Visual style of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// A pending notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    /// CSS classes for templates.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "toast toast-success",
            FlashKind::Error => "toast toast-error",
        }
    }
}

/// Queue a success notification.
pub async fn success(session: &Session, message: impl Into<String>) {
    push(session, FlashKind::Success, message.into()).await;
}

/// Queue an error notification.
pub async fn error(session: &Session, message: impl Into<String>) {
    push(session, FlashKind::Error, message.into()).await;
}

async fn push(session: &Session, kind: FlashKind, message: String) {
    let mut pending = session
        .get::<Vec<Flash>>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    pending.push(Flash { kind, message });

    if let Err(e) = session.insert(session_keys::FLASH, pending).await {
        tracing::warn!(error = %e, "Failed to store flash message");
    }
}

/// Remove and return all pending notifications.
pub async fn take(session: &Session) -> Vec<Flash> {
    match session.remove::<Vec<Flash>>(session_keys::FLASH).await {
        Ok(pending) => pending.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash messages");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_flash_is_taken_once() {
        let session = session();
        success(&session, "Category added successfully").await;
        error(&session, "Failed to delete product").await;

        let flashes = take(&session).await;
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].kind, FlashKind::Success);
        assert_eq!(flashes[1].message, "Failed to delete product");

        assert!(take(&session).await.is_empty());
    }
}
