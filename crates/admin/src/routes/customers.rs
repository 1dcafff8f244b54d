//! Customer route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use tower_sessions::Session;

use crate::{
    middleware::{Flash, RequireAdminAuth, flash},
    remote::RemoteCustomer,
    state::AppState,
};

use super::{AdminUserView, SearchQuery, orders::OrderView, render};

/// Customer row for templates.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub registered: String,
    pub role: String,
}

impl From<&RemoteCustomer> for CustomerView {
    fn from(customer: &RemoteCustomer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            registered: customer
                .created_at
                .map_or_else(|| "-".to_string(), |d| d.format("%-m/%-d/%Y").to_string()),
            role: customer.role.clone().unwrap_or_else(|| "user".to_string()),
        }
    }
}

/// Customers list page template.
#[derive(Template)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub customers: Vec<CustomerView>,
    pub search: String,
}

/// Customer detail page template.
#[derive(Template)]
#[template(path = "customers/show.html")]
pub struct CustomerShowTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub customer: CustomerView,
    pub orders: Vec<OrderView>,
}

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(index))
        .route("/customers/{id}", get(show))
}

/// Customer listing.
///
/// GET /customers
#[tracing::instrument(skip_all)]
async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Html<String> {
    let customers = match state.api().list_customers().await {
        Ok(customers) => customers,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load customers");
            flash::error(&session, "Failed to load customers").await;
            Vec::new()
        }
    };

    let needle = query.needle();
    let customers = customers
        .iter()
        .filter(|c| needle.as_deref().is_none_or(|n| c.matches_search(n)))
        .map(CustomerView::from)
        .collect();

    let template = CustomersIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/customers".to_string(),
        flashes: flash::take(&session).await,
        customers,
        search: query.term(),
    };

    render(&template)
}

/// Customer detail with their orders.
///
/// GET /customers/{id}
#[tracing::instrument(skip_all, fields(customer_id = %id))]
async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    let customer = match state.api().list_customers().await {
        Ok(customers) => customers.into_iter().find(|c| c.id == id),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load customers");
            flash::error(&session, "Failed to load customers").await;
            return Redirect::to("/customers").into_response();
        }
    };
    let Some(customer) = customer else {
        flash::error(&session, "Customer not found").await;
        return Redirect::to("/customers").into_response();
    };

    let orders = match state.api().orders_for_customer(&id).await {
        Ok(orders) => orders.iter().map(OrderView::from).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load customer orders");
            flash::error(&session, "Failed to load user's orders").await;
            Vec::new()
        }
    };

    let template = CustomerShowTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/customers".to_string(),
        flashes: flash::take(&session).await,
        customer: CustomerView::from(&customer),
        orders,
    };

    render(&template).into_response()
}
