//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront sells in a single implicit currency, and every catalog
//! price is a whole number of units. Display renders it with a dollar sign and
//! two decimal places, the same way the checkout summary shows it.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative amount of money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn whole(units: u32) -> Self {
        Self(Decimal::from(units))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display_two_decimals() {
        assert_eq!(Price::whole(245).to_string(), "$245.00");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
        assert_eq!(Price::whole(65) + Price::whole(180), Price::whole(245));
    }

    #[test]
    fn test_price_sum() {
        let total: Price = [Price::whole(65), Price::whole(65)].iter().sum();
        assert_eq!(total, Price::whole(130));

        let empty: Price = core::iter::empty::<Price>().sum();
        assert_eq!(empty, Price::ZERO);
    }

    #[test]
    fn test_price_serializes_as_string() {
        let json = serde_json::to_string(&Price::whole(180)).unwrap();
        assert_eq!(json, "\"180\"");
    }
}
