//! Money value object for unit prices and totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use super::ItemQuantity;

/// A monetary amount without a currency.
///
/// Represented as a Decimal for precise financial calculations. The currency
/// travels next to the amount (see [`super::CurrencyCode`]) because the ERP
/// and the catalog disagree on where it comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a new Money value from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Money value from cents (integer).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }

    /// Clamp negative amounts to zero.
    #[must_use]
    pub fn non_negative(self) -> Self {
        if self.is_negative() { Self::ZERO } else { self }
    }

    /// Extended price for `quantity` units, saturating at the representable
    /// bounds.
    #[must_use]
    pub fn times(self, quantity: ItemQuantity) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity.get())))
    }

    /// Extended price for `quantity` units, or `None` on overflow.
    #[must_use]
    pub fn checked_times(self, quantity: ItemQuantity) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity.get())).map(Self)
    }

    /// Sum of two amounts, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Money {
    type Output = Self;

    /// Saturates at the representable bounds.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Money::new(dec!(19.9)).to_string(), "19.90");
        assert_eq!(Money::from_cents(1999).to_string(), "19.99");
    }

    #[test]
    fn non_negative_clamps() {
        assert_eq!(Money::new(dec!(-1.5)).non_negative(), Money::ZERO);
        assert_eq!(Money::new(dec!(2.5)).non_negative(), Money::new(dec!(2.5)));
    }

    #[test]
    fn times_quantity() {
        let qty = ItemQuantity::new(3).unwrap();
        assert_eq!(Money::new(dec!(19.99)).times(qty), Money::new(dec!(59.97)));
    }

    #[test]
    fn extended_price_saturates_instead_of_overflowing() {
        let huge = Money::new(Decimal::MAX);
        let qty = ItemQuantity::new(1_000_000_000).unwrap();

        assert_eq!(huge.checked_times(qty), None);
        assert_eq!(huge.times(qty), Money::new(Decimal::MAX));
        assert_eq!(huge.checked_add(Money::from_cents(1)), None);
        assert_eq!(huge + huge, Money::new(Decimal::MAX));
    }

    #[test]
    fn sum_of_amounts() {
        let total: Money = [dec!(1.10), dec!(2.20), dec!(3.30)]
            .into_iter()
            .map(Money::new)
            .sum();
        assert_eq!(total, Money::new(dec!(6.60)));
    }

    #[test]
    fn serde_accepts_numbers_and_strings() {
        let from_number: Money = serde_json::from_str("19.99").unwrap();
        let from_string: Money = serde_json::from_str("\"19.99\"").unwrap();
        assert_eq!(from_number, from_string);
    }
}
