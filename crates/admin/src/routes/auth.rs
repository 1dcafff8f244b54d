//! Authentication route handlers for admin.
//!
//! Username and password against the single stored credential.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{
    Flash, LOGIN_PATH, OptionalAdminAuth, clear_current_admin, flash, set_current_admin,
};
use crate::services::AuthError;
use crate::state::AppState;

use super::render;

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    flashes: Vec<Flash>,
}

/// Submitted login form.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", post(logout))
}

/// Render the login page.
///
/// GET /auth/login
async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth, session: Session) -> Response {
    if admin.is_some() {
        return Redirect::to("/").into_response();
    }

    let template = LoginPageTemplate {
        flashes: flash::take(&session).await,
    };
    render(&template).into_response()
}

/// Check credentials and start a session.
///
/// POST /auth/login
#[tracing::instrument(skip_all, fields(username = %form.username))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    match state.auth().login(form.username.trim(), &form.password).await {
        Ok(admin) => {
            set_current_admin(&session, &admin).await?;
            set_sentry_user(&admin.username);
            flash::success(&session, "Welcome back!").await;
            tracing::info!("Admin logged in");
            Ok(Redirect::to("/"))
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Rejected admin login");
            flash::error(&session, "Invalid credentials").await;
            Ok(Redirect::to(LOGIN_PATH))
        }
        Err(e) => Err(e.into()),
    }
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::warn!(error = %e, "Failed to clear admin session");
    }
    clear_sentry_user();
    flash::success(&session, "Logged out successfully").await;

    Redirect::to(LOGIN_PATH)
}
