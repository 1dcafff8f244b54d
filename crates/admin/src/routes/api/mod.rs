//! JSON API handlers for admin.
//!
//! Everything here works against the local record store and sits behind the
//! session gate, except `POST /api/session` which opens it.
//!
//! ```text
//! POST   /api/session                 - Login
//! GET    /api/session                 - Current admin
//! DELETE /api/session                 - Logout
//! GET    /api/products                - List products
//! POST   /api/products                - Create product
//! PATCH  /api/products/{id}           - Update product
//! DELETE /api/products/{id}           - Delete product
//! GET    /api/categories              - List categories
//! POST   /api/categories              - Create category
//! DELETE /api/categories/{id}         - Delete category
//! GET    /api/orders                  - List orders
//! PATCH  /api/orders/{id}/status      - Update order status
//! GET    /api/customers               - List customers
//! GET    /api/analytics?range=        - Sales summary
//! GET    /api/dashboard               - Dashboard statistics
//! ```

pub mod catalog;
pub mod orders;
pub mod reports;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(session::router())
        .merge(catalog::router())
        .merge(orders::router())
        .merge(reports::router())
}
