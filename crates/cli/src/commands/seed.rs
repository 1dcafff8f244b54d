//! Seed the record store with sample data.

use reeldeal_admin::db::RecordStore;

use super::CommandError;

/// Seed absent collections, or every collection when `force` is set.
///
/// Returns the keys that were written.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub async fn run(store: &RecordStore, force: bool) -> Result<Vec<&'static str>, CommandError> {
    let written = store.seed_all(force).await?;

    if written.is_empty() {
        tracing::info!("All collections already present; use --force to overwrite");
    } else {
        for key in &written {
            tracing::info!(key, "Seeded collection");
        }
    }

    Ok(written)
}
