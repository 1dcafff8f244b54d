//! Order and customer API handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use reeldeal_core::{Customer, Order, OrderId, OrderStatus};
use serde::Deserialize;

use crate::{error::AppError, middleware::RequireAdminAuth, state::AppState};

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list_orders))
        .route("/api/orders/{id}/status", patch(update_status))
        .route("/api/customers", get(list_customers))
}

/// Status change request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: OrderStatus,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

/// List stored orders.
///
/// # Errors
///
/// Returns 500 if the store cannot be read.
pub async fn list_orders(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.store().list().await?))
}

/// Change an order's status and optionally its tracking number.
///
/// # Errors
///
/// Returns 404 if the order does not exist.
#[tracing::instrument(skip_all, fields(order_id = %id, status = %body.status))]
pub async fn update_status(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .store()
        .update_order_status(&OrderId::new(id), body.status, body.tracking_number)
        .await?;
    Ok(Json(order))
}

/// List stored customers.
///
/// # Errors
///
/// Returns 500 if the store cannot be read.
pub async fn list_customers(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(state.store().list_customers().await?))
}
