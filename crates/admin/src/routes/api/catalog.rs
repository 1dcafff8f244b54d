//! Product and category API handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch},
};
use reeldeal_core::{Category, CategoryId, NewProduct, Product, ProductId, ProductPatch};
use serde::Deserialize;

use crate::{error::AppError, middleware::RequireAdminAuth, state::AppState};

/// Build the catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            patch(update_product).delete(delete_product),
        )
        .route("/api/categories", get(list_categories).post(create_category))
        .route("/api/categories/{id}", delete(delete_category))
}

// =============================================================================
// Products
// =============================================================================

/// List stored products.
///
/// # Errors
///
/// Returns 500 if the store cannot be read.
pub async fn list_products(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.store().list().await?))
}

/// Create a product.
///
/// # Errors
///
/// Returns 400 if the name is blank.
pub async fn create_product(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.store().add_product(body).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Apply a partial update to a product.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
pub async fn update_product(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .store()
        .update_product(&ProductId::new(id), patch)
        .await?;
    Ok(Json(product))
}

/// Delete a product.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
pub async fn delete_product(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store().delete_product(&ProductId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Categories
// =============================================================================

/// Request body for a new category.
#[derive(Debug, Deserialize)]
pub struct NewCategoryRequest {
    pub name: String,
}

/// List stored categories.
///
/// # Errors
///
/// Returns 500 if the store cannot be read.
pub async fn list_categories(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(state.store().list().await?))
}

/// Create a category, deriving its slug from the name.
///
/// # Errors
///
/// Returns 400 for a blank name or 409 if the slug is taken.
pub async fn create_category(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<NewCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = state.store().add_category(&body.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Delete a category.
///
/// # Errors
///
/// Returns 404 if the category does not exist.
pub async fn delete_category(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store().delete_category(&CategoryId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
