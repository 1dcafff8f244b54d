//! Analytics route handlers.
//!
//! Sales performance over a date window, computed from the record store's
//! orders, plus the CSV export.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    routing::get,
};
use chrono::Utc;
use reeldeal_core::{DateRange, Order, ProductSales, SalesSummary};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    error::AppError,
    middleware::{Flash, RequireAdminAuth, flash},
    services::{export_filename, orders_csv},
    state::AppState,
};

use super::{AdminUserView, render};

/// Query parameters for analytics pages.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// Range tag: "today", "this-week", "this-month" or "this-quarter".
    pub range: Option<String>,
}

impl AnalyticsQuery {
    /// Selected range; unknown or missing tags fall back to this month.
    #[must_use]
    pub fn date_range(&self) -> DateRange {
        self.range
            .as_deref()
            .and_then(|r| r.parse().ok())
            .unwrap_or_default()
    }
}

/// Range option for the selector.
#[derive(Debug, Clone)]
pub struct RangeOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Top product row.
#[derive(Debug, Clone)]
pub struct ProductSalesView {
    pub rank: usize,
    pub name: String,
    pub quantity: u64,
    pub revenue: String,
}

impl ProductSalesView {
    fn new(rank: usize, sales: &ProductSales) -> Self {
        Self {
            rank,
            name: sales.name.clone(),
            quantity: sales.quantity,
            revenue: sales.revenue.to_string(),
        }
    }
}

/// Summary cards.
#[derive(Debug, Clone)]
pub struct SalesSummaryView {
    pub total_revenue: String,
    pub total_orders: String,
    pub average_order_value: String,
    pub top_products: Vec<ProductSalesView>,
}

impl From<&SalesSummary> for SalesSummaryView {
    fn from(summary: &SalesSummary) -> Self {
        Self {
            total_revenue: summary.total_revenue.to_string(),
            total_orders: summary.total_orders.to_string(),
            average_order_value: summary.average_order_value.to_string(),
            top_products: summary
                .top_products
                .iter()
                .enumerate()
                .map(|(i, p)| ProductSalesView::new(i + 1, p))
                .collect(),
        }
    }
}

/// Analytics page template.
#[derive(Template)]
#[template(path = "analytics/index.html")]
pub struct AnalyticsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub summary: SalesSummaryView,
    pub ranges: Vec<RangeOption>,
    pub current_range: &'static str,
}

/// Build the analytics router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(index))
        .route("/analytics/export", get(export))
}

/// Sales summary for the selected range.
///
/// GET /analytics
#[tracing::instrument(skip_all)]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Html<String>, AppError> {
    let range = query.date_range();
    let orders: Vec<Order> = state.store().list().await?;
    let summary = SalesSummary::compute(&orders, range, Utc::now());

    let template = AnalyticsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/analytics".to_string(),
        flashes: flash::take(&session).await,
        summary: SalesSummaryView::from(&summary),
        ranges: DateRange::ALL
            .iter()
            .map(|r| RangeOption {
                value: r.as_str(),
                label: r.label(),
                selected: *r == range,
            })
            .collect(),
        current_range: range.as_str(),
    };

    Ok(render(&template))
}

/// Download every stored order as CSV.
///
/// GET /analytics/export
#[tracing::instrument(skip_all)]
async fn export(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let orders: Vec<Order> = state.store().list().await?;
    let body = orders_csv(&orders)?;
    let filename = export_filename(query.date_range(), Utc::now());

    tracing::info!(rows = orders.len(), %filename, "Exported orders");
    flash::success(&session, "Sales data exported successfully").await;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}
