//! Client for the remote storefront API.
//!
//! Orders, customers, and the live product catalog come from the storefront
//! back end rather than the local record store.
//!
//! # Endpoints
//!
//! - `GET /me/users` - Registered customers
//! - `GET /api/orders` - All orders
//! - `POST /api/confirm/forward-payment/{id}` - Send a payment link and confirm the order
//! - `GET /add` - Product catalog (`{ fishingTools: [...] }`)
//! - `DELETE /add/{id}` - Delete a product

mod types;

pub use types::*;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ApiConfig;

/// Errors that can occur when interacting with the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input rejected before sending.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ApiError {
    /// Message to show the operator, preferring what the API said.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } | Self::Validation(message)
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }
}

/// Remote storefront API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// List registered customers.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response is malformed.
    #[tracing::instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<RemoteCustomer>, ApiError> {
        self.get("/me/users").await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List all orders.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response is malformed.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<RemoteOrder>, ApiError> {
        self.get("/api/orders").await
    }

    /// Fetch one order by ID.
    ///
    /// The API has no detail endpoint, so this filters the full list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no order has that ID.
    pub async fn get_order(&self, order_id: &str) -> Result<RemoteOrder, ApiError> {
        self.list_orders()
            .await?
            .into_iter()
            .find(|order| order.id == order_id)
            .ok_or_else(|| ApiError::NotFound(format!("order {order_id}")))
    }

    /// Orders placed by one customer, matched on the embedded `user._id`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the order list cannot be fetched.
    #[tracing::instrument(skip(self))]
    pub async fn orders_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<RemoteOrder>, ApiError> {
        let orders = self.list_orders().await?;
        Ok(orders
            .into_iter()
            .filter(|order| order.belongs_to(customer_id))
            .collect())
    }

    /// Send a payment link for an order and mark it confirmed.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` without sending anything if the link is
    /// blank, or `ApiError` if the request fails.
    #[tracing::instrument(skip(self, notes))]
    pub async fn forward_payment(
        &self,
        order_id: &str,
        payment_link: &str,
        notes: &str,
    ) -> Result<(), ApiError> {
        let payment_link = payment_link.trim();
        if payment_link.is_empty() {
            return Err(ApiError::Validation(
                "Please provide a payment link".to_string(),
            ));
        }

        let path = format!("/api/confirm/forward-payment/{order_id}");
        let body = ForwardPaymentRequest {
            payment_link,
            notes,
        };
        let response = self
            .inner
            .client
            .post(self.url(&path))
            .json(&body)
            .send()
            .await?;

        self.expect_success(response).await?;
        tracing::info!("Payment link forwarded");
        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List the live product catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response is malformed.
    #[tracing::instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<RemoteProduct>, ApiError> {
        let envelope: FishingToolsResponse = self.get("/add").await?;
        Ok(envelope.fishing_tools)
    }

    /// Delete a product from the live catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the API reports 404, or `ApiError` if
    /// the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, product_id: &str) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .delete(self.url(&format!("/add/{product_id}")))
            .send()
            .await?;

        self.expect_success(response).await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Execute a GET request and parse the JSON body.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.inner.client.get(self.url(path)).send().await?;
        self.handle_response(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(self.parse_error(response).await)
    }

    /// Accept any 2xx and ignore the body.
    async fn expect_success(&self, response: reqwest::Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(self.parse_error(response).await)
    }

    /// Parse error response from the API.
    ///
    /// The storefront answers errors with `{ "message": "..." }`; anything
    /// else falls back to the raw body.
    async fn parse_error(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or(body);

        if status == 404 {
            return ApiError::NotFound(if message.is_empty() { path } else { message });
        }

        tracing::warn!(status, %message, "Remote API error");
        ApiError::Api { status, message }
    }
}
