//! Product catalog route handlers.
//!
//! Reads and deletes go straight to the storefront API.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use reeldeal_core::StockLevel;
use tower_sessions::Session;

use crate::{
    middleware::{Flash, RequireAdminAuth, flash},
    remote::RemoteProduct,
    state::AppState,
};

use super::{AdminUserView, SearchQuery, render};

/// Product row for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub stock: u32,
    pub stock_label: &'static str,
    pub stock_class: &'static str,
    pub image: Option<String>,
}

impl From<&RemoteProduct> for ProductView {
    fn from(product: &RemoteProduct) -> Self {
        let level = product.stock_level();
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            compare_at_price: product.compare_at_price.map(|p| p.to_string()),
            stock: product.stock,
            stock_label: level.label(),
            stock_class: match level {
                StockLevel::OutOfStock => "badge badge-danger",
                StockLevel::Low => "badge badge-warning",
                StockLevel::InStock => "badge badge-success",
            },
            image: product.image.clone(),
        }
    }
}

/// Products list page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub products: Vec<ProductView>,
    pub search: String,
}

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index))
        .route("/products/{id}/delete", post(delete))
}

/// Product listing.
///
/// GET /products
#[tracing::instrument(skip_all)]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Html<String> {
    let products = match state.api().list_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load products");
            flash::error(&session, "Failed to load products").await;
            Vec::new()
        }
    };

    let needle = query.needle();
    let products = products
        .iter()
        .filter(|p| needle.as_deref().is_none_or(|n| p.matches_search(n)))
        .map(ProductView::from)
        .collect();

    let template = ProductsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/products".to_string(),
        flashes: flash::take(&session).await,
        products,
        search: query.term(),
    };

    render(&template)
}

/// Delete a product from the live catalog.
///
/// POST /products/{id}/delete
#[tracing::instrument(skip_all, fields(product_id = %id))]
async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Redirect {
    match state.api().delete_product(&id).await {
        Ok(()) => {
            tracing::info!("Product deleted");
            flash::success(&session, "Product deleted successfully").await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete product");
            flash::error(&session, "Failed to delete product").await;
        }
    }

    Redirect::to("/products")
}
