//! Analytics and dashboard API handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::Utc;
use reeldeal_core::{DashboardStats, Order, SalesSummary};

use crate::{
    error::AppError,
    middleware::RequireAdminAuth,
    routes::{analytics::AnalyticsQuery, dashboard::load_stats},
    state::AppState,
};

/// Build the reports router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/analytics", get(analytics))
        .route("/api/dashboard", get(dashboard))
}

/// Sales summary for `?range=`.
///
/// # Errors
///
/// Returns 500 if the store cannot be read.
pub async fn analytics(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<SalesSummary>, AppError> {
    let orders: Vec<Order> = state.store().list().await?;
    Ok(Json(SalesSummary::compute(
        &orders,
        query.date_range(),
        Utc::now(),
    )))
}

/// Dashboard statistics.
///
/// # Errors
///
/// Returns 500 if the store cannot be read.
pub async fn dashboard(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(load_stats(&state).await?))
}
