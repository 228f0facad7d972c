//! Display types shared by page templates.

use kapdewala_core::{Product, Size};

use crate::shop::{AdviceSlot, CartEntry, ShopSession, ViewKind};

/// Navbar state: which link is active and the cart badge count.
#[derive(Clone)]
pub struct NavView {
    pub active: &'static str,
    pub cart_count: usize,
}

impl NavView {
    /// Navbar for `shop` after navigating to `kind`.
    #[must_use]
    pub fn new(kind: ViewKind, shop: &ShopSession) -> Self {
        Self {
            active: kind.as_str(),
            cart_count: shop.cart().total_count(),
        }
    }
}

/// Product card display data for grids.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub short_description: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            image: product.primary_image().to_string(),
            category: product.category.clone(),
            short_description: product.short_description.clone(),
        }
    }
}

/// Full product display data for the product view.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub images: Vec<String>,
    pub rating: f32,
    pub reviews_count: u32,
    pub tags: Vec<String>,
    pub category: String,
    pub materials: String,
    pub shipping: String,
    pub sizes: Vec<&'static str>,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            images: product.images.clone(),
            rating: product.rating,
            reviews_count: product.reviews_count,
            tags: product.tags.clone(),
            category: product.category.clone(),
            materials: product.materials.clone(),
            shipping: product.shipping.clone(),
            sizes: Size::ALL.iter().map(|s| s.label()).collect(),
        }
    }
}

/// Cart line display data for checkout.
#[derive(Clone)]
pub struct CartLineView {
    pub name: String,
    pub size: String,
    pub price: String,
    pub image: String,
}

impl From<&CartEntry> for CartLineView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            name: entry.product.name.clone(),
            size: entry.size.to_string(),
            price: entry.price().to_string(),
            image: entry.product.primary_image().to_string(),
        }
    }
}

/// State of the advice panel.
#[derive(Clone, PartialEq, Eq)]
pub enum AdviceView {
    /// Offer the "get styling advice" button.
    Idle,
    /// Fetch running; the fragment polls for the result.
    Loading,
    /// Advice available.
    Ready(String),
}

impl From<&AdviceSlot> for AdviceView {
    fn from(slot: &AdviceSlot) -> Self {
        match slot {
            AdviceSlot::Empty => Self::Idle,
            AdviceSlot::Loading(_) => Self::Loading,
            AdviceSlot::Ready(text) => Self::Ready(text.clone()),
        }
    }
}
