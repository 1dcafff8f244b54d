//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront sells in US dollars only, so a `Price` is a plain decimal
//! amount in dollars. It serializes as a decimal string and accepts either a
//! string or a JSON number when deserializing, which covers both the stored
//! records and the remote API's numeric fields.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A dollar amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Round to whole cents, keeping exactly two decimal places so the
    /// serialized form is stable ("0.00", "150.00").
    ///
    /// Midpoints round away from zero.
    #[must_use]
    pub fn round_to_cents(self) -> Self {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        Self(rounded)
    }

    /// Format with exactly two decimal places (e.g., "12.90").
    #[must_use]
    pub fn fixed2(&self) -> String {
        self.round_to_cents().0.to_string()
    }

    /// Format for display (e.g., "$12.90").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${}", self.fixed2())
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

/// Divide evenly, e.g. for an average. Division by zero yields zero.
impl Div<usize> for Price {
    type Output = Self;

    fn div(self, count: usize) -> Self {
        if count == 0 {
            return Self::ZERO;
        }
        Self(self.0 / Decimal::from(count))
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
    fn test_fixed2_pads_and_rounds() {
        assert_eq!(Price::from_cents(7500).fixed2(), "75.00");
        assert_eq!(Price::new(Decimal::new(12345, 3)).fixed2(), "12.35");
        assert_eq!(Price::new(Decimal::new(5, 0)).display(), "$5.00");
    }

    #[test]
    fn test_deserializes_number_and_string() {
        let from_number: Price = serde_json::from_str("199.99").unwrap();
        let from_string: Price = serde_json::from_str("\"199.99\"").unwrap();
        assert_eq!(from_number, Price::from_cents(19_999));
        assert_eq!(from_string, from_number);
    }

    #[test]
    fn test_line_total_and_sum() {
        let line = Price::from_cents(1299) * 2;
        assert_eq!(line, Price::from_cents(2598));

        let total: Price = [Price::from_cents(19_999), line].iter().sum();
        assert_eq!(total.fixed2(), "225.97");
    }

    #[test]
    fn test_round_to_cents_fixes_scale() {
        let zero = Price::ZERO.round_to_cents();
        assert_eq!(serde_json::to_string(&zero).unwrap(), "\"0.00\"");

        let third = (Price::from_cents(10_000) / 3).round_to_cents();
        assert_eq!(serde_json::to_string(&third).unwrap(), "\"33.33\"");

        let midpoint = Price::new(Decimal::new(1005, 3)).round_to_cents();
        assert_eq!(midpoint, Price::from_cents(101));
    }

    #[test]
    fn test_div_by_zero_is_zero() {
        assert_eq!(Price::from_cents(100) / 0, Price::ZERO);
        assert_eq!(Price::from_cents(15_000) / 2, Price::from_cents(7500));
    }
}
