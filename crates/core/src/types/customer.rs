//! Customer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CustomerId;

/// A registered customer.
///
/// `total_orders` is denormalized and never recomputed from the order list.
/// The email is stored as entered; nothing validates it on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
    #[serde(default)]
    pub total_orders: u32,
}

impl Customer {
    /// Case-insensitive match on name or email.
    #[must_use]
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.email.to_lowercase().contains(needle_lower)
    }
}
