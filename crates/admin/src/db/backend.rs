//! Key-value blob storage behind the record store.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::RepositoryError;

/// Where collection blobs live.
#[derive(Debug)]
pub enum StorageBackend {
    /// One `<key>.json` file per key inside a directory.
    File { dir: PathBuf },
    /// In-process map; contents are lost when the process exits.
    Memory(Mutex<HashMap<String, String>>),
}

impl StorageBackend {
    /// File-backed storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self::File { dir: dir.into() }
    }

    /// Empty in-memory storage.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Mutex::new(HashMap::new()))
    }

    /// Read the blob stored under `key`, or `None` if the key is absent.
    pub(crate) async fn read(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        match self {
            Self::File { dir } => match tokio::fs::read_to_string(blob_path(dir, key)).await {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
            Self::Memory(map) => Ok(map
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(key)
                .cloned()),
        }
    }

    /// Replace the blob stored under `key`.
    ///
    /// File writes go to a sibling temp file first and are renamed into
    /// place, so a crash never leaves a half-written collection.
    pub(crate) async fn write(&self, key: &str, contents: &str) -> Result<(), RepositoryError> {
        match self {
            Self::File { dir } => {
                tokio::fs::create_dir_all(dir).await?;
                let path = blob_path(dir, key);
                let temp_path = path.with_extension("json.tmp");
                tokio::fs::write(&temp_path, contents).await?;
                tokio::fs::rename(&temp_path, &path).await?;
                tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote collection");
                Ok(())
            }
            Self::Memory(map) => {
                map.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(key.to_string(), contents.to_string());
                Ok(())
            }
        }
    }
}

fn blob_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}
