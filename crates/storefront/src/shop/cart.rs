//! Cart store.
//!
//! Append-only: every add creates a new line with quantity 1, even when the
//! same product and size are already in the cart.

use kapdewala_core::{Price, Product, Size};

/// One product/size selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub product: Product,
    pub size: Size,
    pub quantity: u32,
}

impl CartEntry {
    /// Unit price of the line.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.product.price
    }
}

/// An ordered list of cart entries.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Append a new line for `product` in `size`, returning the new line count.
    pub fn add_item(&mut self, product: &Product, size: Size) -> usize {
        self.entries.push(CartEntry {
            product: product.clone(),
            size,
            quantity: 1,
        });
        tracing::debug!(product_id = %product.id, %size, lines = self.entries.len(), "cart line added");
        self.entries.len()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of lines, shown on the cart badge.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of line prices.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.entries.iter().map(CartEntry::price).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use kapdewala_core::catalog;

    #[test]
    fn test_empty_cart() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.total_count(), 0);
        assert_eq!(cart.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_add_item_appends_with_quantity_one() {
        let mut cart = Cart::default();
        let bomber = catalog::find("p1").unwrap();

        assert_eq!(cart.add_item(bomber, Size::M), 1);
        let entry = cart.entries().first().unwrap();
        assert_eq!(entry.product.id, "p1");
        assert_eq!(entry.size, Size::M);
        assert_eq!(entry.quantity, 1);
        assert_eq!(cart.subtotal(), Price::whole(245));
    }

    #[test]
    fn test_repeated_adds_are_not_merged() {
        let mut cart = Cart::default();
        let tee = catalog::find("p2").unwrap();

        cart.add_item(tee, Size::S);
        cart.add_item(tee, Size::S);

        assert_eq!(cart.total_count(), 2);
        assert!(cart.entries().iter().all(|e| e.quantity == 1));
        assert!(cart.entries().iter().all(|e| e.price() == Price::whole(65)));
        assert_eq!(cart.subtotal(), Price::whole(130));
    }

    #[test]
    fn test_entries_keep_call_order() {
        let mut cart = Cart::default();
        let calls = [("p3", Size::L), ("p1", Size::XL), ("p3", Size::S)];
        for (id, size) in calls {
            cart.add_item(catalog::find(id).unwrap(), size);
        }

        let seen: Vec<_> = cart
            .entries()
            .iter()
            .map(|e| (e.product.id.as_str(), e.size))
            .collect();
        assert_eq!(seen, calls);
        assert_eq!(cart.subtotal(), Price::whole(180 + 245 + 180));
    }
}
