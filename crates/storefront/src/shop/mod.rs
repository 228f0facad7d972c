//! Shopper state: view router, cart and advice slot.
//!
//! [`ShopSession`] is the one object a request handler mutates. It owns a
//! [`ViewRouter`] and a [`Cart`] and funnels every change through them, so
//! the navigation and cart rules are testable without HTTP or templates.
//!
//! [`ShopperStore`] keeps one `ShopSession` per anonymous shopper behind an
//! async mutex. Mutations for one shopper are therefore applied one at a
//! time, in arrival order.

pub mod advice;
pub mod cart;
pub mod router;
pub mod store;

pub use advice::{AdviceOutcome, AdviceRefusal, AdviceSlot, AdviceTicket};
pub use cart::{Cart, CartEntry};
pub use router::{Navigation, View, ViewKind, ViewRouter};
pub use store::{ShopperHandle, ShopperStore};

use kapdewala_core::{Product, ProductId, Size};

/// Everything the storefront remembers about one shopper.
#[derive(Debug, Clone, Default)]
pub struct ShopSession {
    router: ViewRouter,
    cart: Cart,
    advice: AdviceSlot,
}

impl ShopSession {
    /// Navigate to `kind`, optionally selecting `product`.
    ///
    /// Clears the advice slot: advisory text belongs to a single visit of a
    /// product view and never carries over to the next view.
    pub fn navigate(&mut self, kind: ViewKind, product: Option<&Product>) -> Navigation {
        let nav = self.router.navigate(kind, product);
        self.advice = AdviceSlot::Empty;
        nav
    }

    /// Add `product` in `size` to the cart, returning the new line count.
    pub fn add_item(&mut self, product: &Product, size: Size) -> usize {
        self.cart.add_item(product, size)
    }

    /// Mark an advice fetch for `product_id` as started.
    ///
    /// # Errors
    ///
    /// Returns an [`AdviceRefusal`] if the shopper is not viewing the
    /// product, a fetch is already running, or advice is already present.
    pub fn begin_advice(&mut self, product_id: &ProductId) -> Result<AdviceTicket, AdviceRefusal> {
        if !self.router.current().shows(product_id) {
            return Err(AdviceRefusal::NotViewing(product_id.clone()));
        }
        match &self.advice {
            AdviceSlot::Loading(_) => Err(AdviceRefusal::InFlight),
            AdviceSlot::Ready(_) => Err(AdviceRefusal::AlreadyAdvised),
            AdviceSlot::Empty => {
                let ticket = AdviceTicket {
                    product_id: product_id.clone(),
                    generation: self.router.generation(),
                };
                self.advice = AdviceSlot::Loading(ticket.clone());
                Ok(ticket)
            }
        }
    }

    /// Store the result of the fetch identified by `ticket`.
    ///
    /// The text is applied only if the slot is still waiting on this exact
    /// ticket; a navigation in between makes the result stale.
    pub fn complete_advice(&mut self, ticket: &AdviceTicket, text: String) -> AdviceOutcome {
        match &self.advice {
            AdviceSlot::Loading(pending) if pending == ticket => {
                self.advice = AdviceSlot::Ready(text);
                AdviceOutcome::Applied
            }
            _ => {
                tracing::info!(
                    product_id = %ticket.product_id,
                    generation = ticket.generation,
                    current_generation = self.router.generation(),
                    "discarding stale styling advice"
                );
                AdviceOutcome::Discarded
            }
        }
    }

    /// The view router.
    #[must_use]
    pub const fn router(&self) -> &ViewRouter {
        &self.router
    }

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The advice slot for the current view.
    #[must_use]
    pub const fn advice(&self) -> &AdviceSlot {
        &self.advice
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use kapdewala_core::catalog;

    fn product(id: &str) -> &'static Product {
        catalog::find(id).unwrap()
    }

    fn viewing(id: &str) -> ShopSession {
        let mut shop = ShopSession::default();
        shop.navigate(ViewKind::ProductView, Some(product(id)));
        shop
    }

    #[test]
    fn test_advice_applied_when_still_viewing() {
        let mut shop = viewing("p1");
        let ticket = shop.begin_advice(&ProductId::new("p1")).unwrap();
        assert!(shop.advice().is_loading());

        let outcome = shop.complete_advice(&ticket, "Wear it with black jeans.".to_string());
        assert_eq!(outcome, AdviceOutcome::Applied);
        assert_eq!(shop.advice().text(), Some("Wear it with black jeans."));
    }

    #[test]
    fn test_navigation_clears_advice() {
        let mut shop = viewing("p1");
        let ticket = shop.begin_advice(&ProductId::new("p1")).unwrap();
        shop.complete_advice(&ticket, "Layer it.".to_string());

        for kind in [ViewKind::Home, ViewKind::Shop, ViewKind::Checkout, ViewKind::About] {
            let mut copy = shop.clone();
            copy.navigate(kind, None);
            assert_eq!(copy.advice(), &AdviceSlot::Empty);
        }
    }

    #[test]
    fn test_late_advice_for_other_product_is_discarded() {
        let mut shop = viewing("p1");
        let ticket = shop.begin_advice(&ProductId::new("p1")).unwrap();

        shop.navigate(ViewKind::ProductView, Some(product("p2")));
        let outcome = shop.complete_advice(&ticket, "For the bomber.".to_string());

        assert_eq!(outcome, AdviceOutcome::Discarded);
        assert_eq!(shop.advice(), &AdviceSlot::Empty);
    }

    #[test]
    fn test_late_advice_after_revisit_is_discarded() {
        let mut shop = viewing("p1");
        let ticket = shop.begin_advice(&ProductId::new("p1")).unwrap();

        // Leave and come back to the same product: new generation, new slot.
        shop.navigate(ViewKind::Shop, None);
        shop.navigate(ViewKind::ProductView, Some(product("p1")));

        assert_eq!(
            shop.complete_advice(&ticket, "old".to_string()),
            AdviceOutcome::Discarded
        );
        assert_eq!(shop.advice(), &AdviceSlot::Empty);
    }

    #[test]
    fn test_second_fetch_is_coalesced() {
        let mut shop = viewing("p4");
        let id = ProductId::new("p4");
        let _ticket = shop.begin_advice(&id).unwrap();
        assert_eq!(shop.begin_advice(&id), Err(AdviceRefusal::InFlight));
    }

    #[test]
    fn test_fetch_refused_when_not_viewing() {
        let mut shop = viewing("p1");
        assert_eq!(
            shop.begin_advice(&ProductId::new("p2")),
            Err(AdviceRefusal::NotViewing(ProductId::new("p2")))
        );

        let mut home = ShopSession::default();
        assert!(home.begin_advice(&ProductId::new("p1")).is_err());
    }

    #[test]
    fn test_fetch_refused_once_advised() {
        let mut shop = viewing("p5");
        let id = ProductId::new("p5");
        let ticket = shop.begin_advice(&id).unwrap();
        shop.complete_advice(&ticket, "Go tonal.".to_string());
        assert_eq!(shop.begin_advice(&id), Err(AdviceRefusal::AlreadyAdvised));
    }

    #[test]
    fn test_checkout_scenario() {
        let mut shop = ShopSession::default();
        shop.navigate(ViewKind::ProductView, Some(product("p1")));
        shop.add_item(product("p1"), Size::M);
        shop.navigate(ViewKind::Checkout, None);

        assert_eq!(shop.router().current(), &View::Checkout);
        let entries = shop.cart().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().unwrap().product.id, "p1");
        assert_eq!(entries.first().unwrap().size, Size::M);
        assert_eq!(shop.cart().subtotal(), kapdewala_core::Price::whole(245));
    }
}
