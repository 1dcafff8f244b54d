//! Category records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, slugify};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a category, deriving the slug from the name.
    #[must_use]
    pub fn new(id: CategoryId, name: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.to_owned(),
            slug: slugify(name),
            created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_slug() {
        let category = Category::new(CategoryId::new("5"), "Tackle Boxes", Utc::now());
        assert_eq!(category.slug, "tackle-boxes");
        assert_eq!(category.name, "Tackle Boxes");
    }
}
