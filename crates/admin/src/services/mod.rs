//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Single-account password authentication (Argon2)
//! - `export` - CSV export of sales data

pub mod auth;
pub mod export;

pub use auth::{AuthError, AuthService};
pub use export::{ExportError, export_filename, orders_csv};
