//! Session gate for admin screens and the JSON API.
//!
//! Screens answer an anonymous request with a redirect to the login form;
//! anything under `/api/` answers 401 instead so scripts get a status code
//! rather than HTML.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

/// Path of the login screen.
pub const LOGIN_PATH: &str = "/auth/login";

/// Prefix of the JSON API.
const API_PREFIX: &str = "/api/";

/// Logged-in admin, or the request is turned away.
///
/// ```rust,ignore
/// async fn orders(RequireAdminAuth(admin): RequireAdminAuth) -> String {
///     format!("orders for {}", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Why an anonymous request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAuthRejection {
    /// Screen request; send the browser to the login form.
    RedirectToLogin,
    /// API request.
    Unauthorized,
}

impl AdminAuthRejection {
    fn for_path(path: &str) -> Self {
        if path.starts_with(API_PREFIX) {
            Self::Unauthorized
        } else {
            Self::RedirectToLogin
        }
    }
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Login required").into_response(),
        }
    }
}

/// Admin stored in the request's session, if any.
///
/// A session that fails to load counts as logged out.
async fn session_admin(parts: &Parts) -> Option<CurrentAdmin> {
    let session = parts.extensions.get::<Session>()?;
    match session.get::<CurrentAdmin>(session_keys::CURRENT_ADMIN).await {
        Ok(admin) => admin,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read admin from session");
            None
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_admin(parts)
            .await
            .map(Self)
            .ok_or_else(|| AdminAuthRejection::for_path(parts.uri.path()))
    }
}

/// Logged-in admin when there is one; never rejects.
pub struct OptionalAdminAuth(pub Option<CurrentAdmin>);

impl<S> FromRequestParts<S> for OptionalAdminAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_admin(parts).await))
    }
}

/// Record a successful login.
///
/// The session ID is cycled first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Forget the logged-in admin. Pending flashes survive so the login page
/// can show the logout notice.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    session.cycle_id().await
}
