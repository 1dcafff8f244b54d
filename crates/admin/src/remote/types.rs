//! Shapes returned by the remote storefront API.
//!
//! The API is a document store with Mongo-style `_id` keys and
//! inconsistent field casing, so every field is mapped explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use reeldeal_core::{Price, StockLevel};

// =============================================================================
// Orders
// =============================================================================

/// Customer reference embedded in an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUser {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// One line of a remote order.
///
/// The list endpoint calls the name `name`; the detail shape calls it
/// `productName`. Both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteOrderItem {
    #[serde(rename = "productName", alias = "name", default)]
    pub product_name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub price: Price,
}

impl RemoteOrderItem {
    /// Price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// An order as served by `GET /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteOrder {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: OrderUser,
    /// Accepts `cartItems` from the list endpoint.
    #[serde(alias = "cartItems", default)]
    pub items: Vec<RemoteOrderItem>,
    #[serde(rename = "totalPrice", default)]
    pub total_price: Price,
    #[serde(rename = "paymentmethod", default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "paymentLink", default)]
    pub payment_link: Option<String>,
}

impl RemoteOrder {
    /// Case-insensitive match on order ID, customer name, or customer email.
    #[must_use]
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        [&self.id, &self.user.name, &self.user.email]
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }

    /// Whether the order belongs to the given remote user.
    #[must_use]
    pub fn belongs_to(&self, customer_id: &str) -> bool {
        self.user.id.as_deref() == Some(customer_id)
    }
}

/// Body of `POST /api/confirm/forward-payment/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardPaymentRequest<'a> {
    pub payment_link: &'a str,
    pub notes: &'a str,
}

// =============================================================================
// Customers
// =============================================================================

/// A registered user as served by `GET /me/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCustomer {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub role: Option<String>,
}

impl RemoteCustomer {
    /// Case-insensitive match on name or email.
    #[must_use]
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.email.to_lowercase().contains(needle_lower)
    }
}

// =============================================================================
// Products
// =============================================================================

/// Envelope of `GET /add`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FishingToolsResponse {
    #[serde(rename = "fishingTools", default)]
    pub fishing_tools: Vec<RemoteProduct>,
}

/// A product as served by `GET /add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteProduct {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "ProductName", default)]
    pub name: String,
    #[serde(rename = "SKU", default)]
    pub sku: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Specifications", default)]
    pub specifications: String,
    #[serde(rename = "Price", default)]
    pub price: Price,
    #[serde(rename = "CompareatPrice", default)]
    pub compare_at_price: Option<Price>,
    /// Free-form; the API sends either a string or a number.
    #[serde(rename = "Weight", default, deserialize_with = "string_or_number")]
    pub weight: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "StockQuantity", default)]
    pub stock: u32,
    #[serde(rename = "img3", default)]
    pub image: Option<String>,
}

impl RemoteProduct {
    /// Case-insensitive match on name, SKU, or category.
    #[must_use]
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        [&self.name, &self.sku, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }

    /// Stock bucket for the badge.
    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        _ => Ok(String::new()),
    }
}
