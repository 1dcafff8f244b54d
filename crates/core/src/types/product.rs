//! Product records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Price, ProductId, StockLevel};

/// A product in the local catalog.
///
/// `category` holds the category *name*, not an ID. Deleting a category
/// leaves its products untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub specifications: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Price>,
    pub sku: String,
    pub category: String,
    pub weight: f64,
    #[serde(default)]
    pub images: Vec<String>,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Build a product from creation input.
    #[must_use]
    pub fn from_new(id: ProductId, new: NewProduct, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            specifications: new.specifications,
            price: new.price,
            compare_at_price: new.compare_at_price,
            sku: new.sku,
            category: new.category,
            weight: new.weight,
            images: new.images,
            stock: new.stock,
            created_at,
        }
    }

    /// Stock bucket for badges and dashboard alerts.
    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }

    /// Case-insensitive match on name, SKU, or category.
    #[must_use]
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        [&self.name, &self.sku, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }

    /// Apply a partial update. Fields left as `None` keep their value.
    pub fn apply(&mut self, patch: ProductPatch) {
        let ProductPatch {
            name,
            description,
            specifications,
            price,
            compare_at_price,
            sku,
            category,
            weight,
            images,
            stock,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(specifications) = specifications {
            self.specifications = specifications;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(compare_at_price) = compare_at_price {
            self.compare_at_price = compare_at_price;
        }
        if let Some(sku) = sku {
            self.sku = sku;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(weight) = weight {
            self.weight = weight;
        }
        if let Some(images) = images {
            self.images = images;
        }
        if let Some(stock) = stock {
            self.stock = stock;
        }
    }
}

/// Input for creating a product; the store assigns `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specifications: String,
    pub price: Price,
    #[serde(default)]
    pub compare_at_price: Option<Price>,
    pub sku: String,
    pub category: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: u32,
}

/// Partial product update.
///
/// `compareAtPrice` is doubly optional: absent leaves it alone, `null`
/// clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specifications: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default, deserialize_with = "double_option")]
    pub compare_at_price: Option<Option<Price>>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub stock: Option<u32>,
}

/// Distinguish an explicit `null` from an absent field.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rod() -> Product {
        Product {
            id: ProductId::new("1"),
            name: "OceanMaster Pro Rod".to_string(),
            description: "Deep sea rod".to_string(),
            specifications: "7ft".to_string(),
            price: Price::from_cents(19_999),
            compare_at_price: Some(Price::from_cents(24_999)),
            sku: "ROD-001".to_string(),
            category: "Fishing Rods".to_string(),
            weight: 8.5,
            images: vec!["/placeholder.svg".to_string()],
            stock: 15,
            created_at: Utc.with_ymd_and_hms(2023, 10, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(rod()).unwrap();
        assert_eq!(json["compareAtPrice"], "249.99");
        assert_eq!(json["sku"], "ROD-001");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_patch_leaves_unset_fields() {
        let mut product = rod();
        product.apply(ProductPatch {
            stock: Some(3),
            ..ProductPatch::default()
        });
        assert_eq!(product.stock, 3);
        assert_eq!(product.name, "OceanMaster Pro Rod");
        assert_eq!(product.compare_at_price, Some(Price::from_cents(24_999)));
    }

    #[test]
    fn test_patch_null_clears_compare_at_price() {
        let patch: ProductPatch = serde_json::from_str(r#"{"compareAtPrice": null}"#).unwrap();
        let mut product = rod();
        product.apply(patch);
        assert_eq!(product.compare_at_price, None);

        let absent: ProductPatch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.compare_at_price, None);
    }

    #[test]
    fn test_matches_search() {
        let product = rod();
        assert!(product.matches_search("rod-0"));
        assert!(product.matches_search("fishing rods"));
        assert!(!product.matches_search("lure"));
    }

    #[test]
    fn test_negative_stock_rejected() {
        let mut json = serde_json::to_value(rod()).unwrap();
        json["stock"] = serde_json::json!(-1);
        assert!(serde_json::from_value::<Product>(json).is_err());
    }
}
