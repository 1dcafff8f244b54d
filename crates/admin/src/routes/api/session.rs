//! Session API handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    error::{AppError, clear_sentry_user, set_sentry_user},
    middleware::{RequireAdminAuth, clear_current_admin, set_current_admin},
    models::CurrentAdmin,
    state::AppState,
};

/// Build the session router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/session",
        post(login).get(current).delete(logout),
    )
}

/// Login request body.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Check credentials and start a session.
///
/// # Errors
///
/// Returns 401 if the credentials do not match.
#[tracing::instrument(skip_all, fields(username = %body.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<CurrentAdmin>, AppError> {
    let admin = state
        .auth()
        .login(body.username.trim(), &body.password)
        .await?;
    set_current_admin(&session, &admin).await?;
    set_sentry_user(&admin.username);

    Ok(Json(admin))
}

/// The logged-in admin.
pub async fn current(RequireAdminAuth(admin): RequireAdminAuth) -> Json<CurrentAdmin> {
    Json(admin)
}

/// End the session.
///
/// # Errors
///
/// Returns 500 if the session store cannot be updated.
pub async fn logout(session: Session) -> Result<StatusCode, AppError> {
    clear_current_admin(&session).await?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}
