//! View router.
//!
//! Tracks which of the five top-level views a shopper is on and which
//! product they last opened. The product view carries its product id, so a
//! product view without a product cannot be represented.

use kapdewala_core::{Product, ProductId};
use serde::{Deserialize, Serialize};

/// The closed set of views a navigation can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    Home,
    Shop,
    ProductView,
    Checkout,
    About,
}

impl ViewKind {
    /// Stable name used in templates and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Shop => "shop",
            Self::ProductView => "product-view",
            Self::Checkout => "checkout",
            Self::About => "about",
        }
    }
}

/// The active view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum View {
    #[default]
    Home,
    Shop,
    Product(ProductId),
    Checkout,
    About,
}

impl View {
    /// The kind of this view, without its payload.
    #[must_use]
    pub const fn kind(&self) -> ViewKind {
        match self {
            Self::Home => ViewKind::Home,
            Self::Shop => ViewKind::Shop,
            Self::Product(_) => ViewKind::ProductView,
            Self::Checkout => ViewKind::Checkout,
            Self::About => ViewKind::About,
        }
    }

    /// The product shown, if this is a product view.
    #[must_use]
    pub const fn product_id(&self) -> Option<&ProductId> {
        match self {
            Self::Product(id) => Some(id),
            _ => None,
        }
    }

    /// Whether this view shows the product `id`.
    #[must_use]
    pub fn shows(&self, id: &ProductId) -> bool {
        self.product_id() == Some(id)
    }
}

/// Result of a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// The view that became active.
    pub view: View,
    /// Generation counter after the navigation.
    pub generation: u64,
    /// True when a product view was requested with no product to show and
    /// the router fell back to the shop grid.
    pub fell_back: bool,
}

/// Holds the current view and the selected product.
#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    current: View,
    selected: Option<Product>,
    generation: u64,
}

impl ViewRouter {
    /// Navigate to `kind`, optionally selecting `product`.
    ///
    /// A supplied product always becomes the selected product, whatever the
    /// target view. A product view with no product argument shows the
    /// previously selected product; with nothing selected it falls back to
    /// the shop grid. Every call advances the generation counter.
    pub fn navigate(&mut self, kind: ViewKind, product: Option<&Product>) -> Navigation {
        if let Some(product) = product {
            self.selected = Some(product.clone());
        }

        let mut fell_back = false;
        self.current = match kind {
            ViewKind::Home => View::Home,
            ViewKind::Shop => View::Shop,
            ViewKind::Checkout => View::Checkout,
            ViewKind::About => View::About,
            ViewKind::ProductView => {
                if let Some(selected) = &self.selected {
                    View::Product(selected.id.clone())
                } else {
                    fell_back = true;
                    tracing::warn!("product view requested with no product selected, showing shop");
                    View::Shop
                }
            }
        };
        self.generation = self.generation.wrapping_add(1);

        Navigation {
            view: self.current.clone(),
            generation: self.generation,
            fell_back,
        }
    }

    /// The active view.
    #[must_use]
    pub const fn current(&self) -> &View {
        &self.current
    }

    /// The most recently selected product, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    /// The product being shown, if the active view is a product view.
    #[must_use]
    pub fn shown_product(&self) -> Option<&Product> {
        let id = self.current.product_id()?;
        self.selected.as_ref().filter(|p| &p.id == id)
    }

    /// Number of navigations so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
