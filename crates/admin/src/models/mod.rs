//! Domain models for admin.
//!
//! Record types live in `reeldeal_core`; this module holds the identity kept
//! in the session.

pub mod session;

pub use session::{ADMIN_DISPLAY_NAME, CurrentAdmin, keys as session_keys};
