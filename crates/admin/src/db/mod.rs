//! Record store for the admin dashboard.
//!
//! # Collections
//!
//! Each collection is a JSON array stored under a fixed key:
//!
//! - `reeldeal_products` - Local product catalog
//! - `reeldeal_categories` - Product categories
//! - `reeldeal_orders` - Orders used by the dashboard and analytics
//! - `reeldeal_customers` - Customers
//! - `reeldeal_admin_credentials` - Single admin credential (`{ username, passwordHash }`)
//!
//! A collection whose key is absent is seeded with sample data the first
//! time it is read. Every mutation rewrites the whole array.
//!
//! # Backends
//!
//! - [`StorageBackend::File`] - one `<key>.json` file per collection in a directory
//! - [`StorageBackend::Memory`] - in-process map, used by tests

mod backend;
pub mod credentials;
pub mod seed;
mod store;

use thiserror::Error;

pub use backend::StorageBackend;
pub use credentials::StoredCredentials;
pub use store::{Record, RecordStore};

/// Errors that can occur during record store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the backing storage failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored JSON could not be parsed or produced.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Constraint violation (e.g., duplicate category slug).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Input rejected before touching storage.
    #[error("validation error: {0}")]
    Validation(String),
}
