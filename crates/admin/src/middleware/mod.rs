//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Session layer (tower-sessions with in-memory store)
//! 4. Auth extractors on protected handlers

pub mod auth;
pub mod flash;
pub mod session;

pub use auth::{
    AdminAuthRejection, LOGIN_PATH, OptionalAdminAuth, RequireAdminAuth, clear_current_admin,
    set_current_admin,
};
pub use flash::{Flash, FlashKind};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
