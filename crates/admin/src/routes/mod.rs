//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! GET  /auth/login                     - Login page
//! POST /auth/login                     - Check credentials, start session
//! POST /auth/logout                    - End session
//!
//! # Dashboard (record store)
//! GET  /                               - Sales, new orders, low stock, recent orders
//!
//! # Products (remote API)
//! GET  /products?q=                    - Product listing with search
//! POST /products/{id}/delete           - Delete product
//!
//! # Categories (record store)
//! GET  /categories                     - Category listing
//! POST /categories                     - Add category
//! POST /categories/{id}/delete         - Delete category
//!
//! # Orders (remote API)
//! GET  /orders?q=                      - Order listing with search
//! GET  /orders/{id}                    - Order detail
//! POST /orders/{id}/forward-payment    - Send payment link, confirm order
//!
//! # Customers (remote API)
//! GET  /customers?q=                   - Customer listing with search
//! GET  /customers/{id}                 - Customer detail with their orders
//!
//! # Analytics (record store)
//! GET  /analytics?range=               - Sales summary
//! GET  /analytics/export?range=        - CSV download
//!
//! # JSON API
//! /api/...                             - See [`api`]
//! ```

pub mod analytics;
pub mod api;
pub mod auth;
pub mod categories;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;

use askama::Template;
use axum::{Router, response::Html};
use serde::Deserialize;

use crate::{models::CurrentAdmin, state::AppState};

/// Build the complete router for screens and the JSON API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(orders::router())
        .merge(customers::router())
        .merge(analytics::router())
        .merge(api::router())
}

/// Logged-in admin as shown in the layout header.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub username: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            username: admin.username.clone(),
        }
    }
}

/// `?q=` search box on listing screens.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    /// Lowercased, trimmed search term, or `None` if the box is empty.
    #[must_use]
    pub fn needle(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// Raw term for echoing back into the search box.
    #[must_use]
    pub fn term(&self) -> String {
        self.q.clone().unwrap_or_default()
    }
}

/// Render a template, falling back to a plain error page.
pub(crate) fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to render template");
        String::from("Error rendering template")
    }))
}
