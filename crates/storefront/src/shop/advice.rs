//! Per-product-view advice slot.
//!
//! A fetch is tagged with the product id and router generation it was
//! issued under. The result is only written back while both still match;
//! anything else is a late answer for a view the shopper already left.

use kapdewala_core::ProductId;

/// Identity of one in-flight advice request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceTicket {
    pub product_id: ProductId,
    pub generation: u64,
}

/// State of the advisory text for the current view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdviceSlot {
    #[default]
    Empty,
    Loading(AdviceTicket),
    Ready(String),
}

impl AdviceSlot {
    /// The advisory text, once fetched.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Ready(text) => Some(text),
            _ => None,
        }
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }
}

/// Why a fetch was not started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdviceRefusal {
    /// The shopper is not on this product's view.
    #[error("product {0} is not the product being viewed")]
    NotViewing(ProductId),
    /// A fetch for this view is already running.
    #[error("advice already in flight")]
    InFlight,
    /// Advice for this view has already arrived.
    #[error("advice already present")]
    AlreadyAdvised,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceOutcome {
    Applied,
    Discarded,
}
