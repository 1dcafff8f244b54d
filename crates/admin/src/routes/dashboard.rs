//! Dashboard route handler.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use chrono::Utc;
use reeldeal_core::{DashboardStats, Order, Product, StockLevel};
use tower_sessions::Session;

use crate::{
    error::AppError,
    middleware::{Flash, RequireAdminAuth, flash},
    state::AppState,
};

use super::{AdminUserView, render};

/// Headline numbers.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    pub today_sales: String,
    pub month_sales: String,
    pub new_orders: String,
    pub low_stock: String,
    pub customers: String,
}

impl From<&DashboardStats> for DashboardMetrics {
    fn from(stats: &DashboardStats) -> Self {
        Self {
            today_sales: stats.today_sales.to_string(),
            month_sales: stats.month_sales.to_string(),
            new_orders: stats.new_orders.to_string(),
            low_stock: stats.low_stock_count.to_string(),
            customers: stats.customer_count.to_string(),
        }
    }
}

/// Recent order row.
#[derive(Debug, Clone)]
pub struct RecentOrderView {
    pub id: String,
    pub customer_name: String,
    pub units: u32,
    pub total: String,
    /// Stored total disagrees with the line items.
    pub total_mismatch: bool,
    pub status: String,
    pub status_class: &'static str,
}

impl From<&Order> for RecentOrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            customer_name: order.customer_name.clone(),
            units: order.unit_count(),
            total: order.total.to_string(),
            total_mismatch: !order.is_total_consistent(),
            status: order.status.to_string(),
            status_class: order.status.badge_class(),
        }
    }
}

/// Low-stock product row.
#[derive(Debug, Clone)]
pub struct LowStockView {
    pub name: String,
    pub sku: String,
    pub stock: u32,
    pub out_of_stock: bool,
}

impl From<&Product> for LowStockView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            sku: product.sku.clone(),
            stock: product.stock,
            out_of_stock: product.stock_level() == StockLevel::OutOfStock,
        }
    }
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub metrics: DashboardMetrics,
    pub recent_orders: Vec<RecentOrderView>,
    pub low_stock: Vec<LowStockView>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Dashboard overview.
///
/// GET /
#[tracing::instrument(skip_all)]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let stats = load_stats(&state).await?;

    let template = DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/".to_string(),
        flashes: flash::take(&session).await,
        metrics: DashboardMetrics::from(&stats),
        recent_orders: stats.recent_orders.iter().map(RecentOrderView::from).collect(),
        low_stock: stats
            .low_stock_products
            .iter()
            .map(LowStockView::from)
            .collect(),
    };

    Ok(render(&template))
}

/// Compute dashboard statistics from the record store.
pub(crate) async fn load_stats(state: &AppState) -> Result<DashboardStats, AppError> {
    let store = state.store();
    let orders: Vec<Order> = store.list().await?;
    let products: Vec<Product> = store.list().await?;
    let customers = store.list_customers().await?;

    for order in orders.iter().filter(|o| !o.is_total_consistent()) {
        tracing::warn!(
            order_id = %order.id,
            total = %order.total,
            items_total = %order.items_total(),
            "Order total does not match its line items"
        );
    }

    Ok(DashboardStats::compute(
        &orders,
        &products,
        customers.len(),
        Utc::now(),
    ))
}
