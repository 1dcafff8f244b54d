//! Order route handlers.
//!
//! Orders are read from the storefront API; confirming an order forwards a
//! payment link to the customer through the same API.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    middleware::{Flash, RequireAdminAuth, flash},
    remote::{ApiError, RemoteOrder, RemoteOrderItem},
    state::AppState,
};

use super::{AdminUserView, SearchQuery, render};

/// Badge classes for the storefront's free-form status strings.
#[must_use]
pub fn status_class(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "pending" => "badge badge-warning",
        "confirmed" | "processing" => "badge badge-info",
        "shipped" => "badge badge-primary",
        "delivered" => "badge badge-success",
        "cancelled" => "badge badge-danger",
        _ => "badge badge-muted",
    }
}

/// Order row for templates.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub date: String,
    pub total: String,
    pub status: String,
    pub status_class: &'static str,
    pub payment_method: String,
    pub notes: String,
    pub payment_link: Option<String>,
    pub items: Vec<OrderItemView>,
}

impl From<&RemoteOrder> for OrderView {
    fn from(order: &RemoteOrder) -> Self {
        Self {
            id: order.id.clone(),
            customer_name: order.user.name.clone(),
            customer_email: order.user.email.clone(),
            date: order
                .created_at
                .map_or_else(|| "-".to_string(), |d| d.format("%-m/%-d/%Y").to_string()),
            total: order.total_price.to_string(),
            status: order.status.clone(),
            status_class: status_class(&order.status),
            payment_method: order.payment_method.clone().unwrap_or_default(),
            notes: order.notes.clone().unwrap_or_default(),
            payment_link: order.payment_link.clone(),
            items: order.items.iter().map(OrderItemView::from).collect(),
        }
    }
}

/// Line item for the detail page.
#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub product_name: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

impl From<&RemoteOrderItem> for OrderItemView {
    fn from(item: &RemoteOrderItem) -> Self {
        Self {
            product_name: item.product_name.clone(),
            quantity: item.quantity,
            price: item.price.to_string(),
            line_total: item.line_total().to_string(),
        }
    }
}

/// Orders list page template.
#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub orders: Vec<OrderView>,
    pub search: String,
}

/// Order detail page template.
#[derive(Template)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub order: OrderView,
}

/// Payment link form on the order detail page.
#[derive(Debug, Deserialize)]
pub struct ForwardPaymentForm {
    pub payment_link: String,
    #[serde(default)]
    pub notes: String,
}

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(index))
        .route("/orders/{id}", get(show))
        .route("/orders/{id}/forward-payment", post(forward_payment))
}

/// Order listing.
///
/// GET /orders
#[tracing::instrument(skip_all)]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Html<String> {
    let orders = match state.api().list_orders().await {
        Ok(orders) => orders,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load orders");
            flash::error(&session, "Failed to load orders").await;
            Vec::new()
        }
    };

    let needle = query.needle();
    let orders = orders
        .iter()
        .filter(|o| needle.as_deref().is_none_or(|n| o.matches_search(n)))
        .map(OrderView::from)
        .collect();

    let template = OrdersIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/orders".to_string(),
        flashes: flash::take(&session).await,
        orders,
        search: query.term(),
    };

    render(&template)
}

/// Order detail with the payment link form.
///
/// GET /orders/{id}
#[tracing::instrument(skip_all, fields(order_id = %id))]
async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    let order = match state.api().get_order(&id).await {
        Ok(order) => order,
        Err(ApiError::NotFound(_)) => {
            flash::error(&session, "Order not found").await;
            return Redirect::to("/orders").into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load order");
            flash::error(&session, "Failed to load orders").await;
            return Redirect::to("/orders").into_response();
        }
    };

    let template = OrderShowTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/orders".to_string(),
        flashes: flash::take(&session).await,
        order: OrderView::from(&order),
    };

    render(&template).into_response()
}

/// Send the payment link and confirm the order.
///
/// POST /orders/{id}/forward-payment
#[tracing::instrument(skip_all, fields(order_id = %id))]
async fn forward_payment(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<ForwardPaymentForm>,
) -> Redirect {
    match state
        .api()
        .forward_payment(&id, &form.payment_link, &form.notes)
        .await
    {
        Ok(()) => {
            flash::success(&session, "Order confirmed and email sent!").await;
            Redirect::to("/orders")
        }
        Err(e) => {
            if !matches!(e, ApiError::Validation(_)) {
                tracing::error!(error = %e, "Failed to confirm order");
            }
            flash::error(&session, e.user_message("Failed to confirm order")).await;
            Redirect::to(&format!("/orders/{id}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_class_is_case_insensitive() {
        assert_eq!(status_class("Pending"), "badge badge-warning");
        assert_eq!(status_class("delivered"), "badge badge-success");
        assert_eq!(status_class("on-hold"), "badge badge-muted");
    }
}
