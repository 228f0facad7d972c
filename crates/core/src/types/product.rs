//! The product model.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A catalog product.
///
/// Products are immutable once defined. The catalog guarantees a non-empty
/// image list and a rating in `0.0..=5.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub short_description: String,
    pub images: Vec<String>,
    pub rating: f32,
    pub reviews_count: u32,
    pub tags: Vec<String>,
    pub category: String,
    pub materials: String,
    pub shipping: String,
}

impl Product {
    /// The first image, used on cards and cart lines.
    #[must_use]
    pub fn primary_image(&self) -> &str {
        self.images.first().map_or("", String::as_str)
    }

    /// Tags joined with a comma, as they appear in prose.
    #[must_use]
    pub fn tag_line(&self) -> String {
        self.tags.join(", ")
    }

    /// Whether the product belongs to `category` (case-insensitive).
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}
