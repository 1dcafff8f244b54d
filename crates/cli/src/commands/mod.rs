//! Command implementations.

pub mod admin;
pub mod report;
pub mod seed;

use std::path::Path;

use reeldeal_admin::db::{RecordStore, RepositoryError, StorageBackend};
use reeldeal_admin::services::{AuthError, ExportError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    Input(String),
}

/// Open the file-backed record store in `data_dir`.
pub fn open_store(data_dir: &Path) -> RecordStore {
    tracing::debug!(data_dir = %data_dir.display(), "Opening record store");
    RecordStore::new(StorageBackend::file(data_dir))
}
