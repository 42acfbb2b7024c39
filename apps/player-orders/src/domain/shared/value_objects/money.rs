//! Money value object for in-game currency amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// A monetary amount in the game currency.
///
/// Represented as a Decimal so budget arithmetic never touches floating point.
/// Precision is only reduced by [`Money::round_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new Money value from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this amount is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if this amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Clamp negative amounts to zero.
    #[must_use]
    pub fn floor_at_zero(self) -> Self {
        Self(self.0.max(Decimal::ZERO))
    }

    /// Round to `minor_units` decimal places, half away from zero.
    ///
    /// For the non-negative amounts produced by pricing this is round-half-up.
    #[must_use]
    pub fn round_to(self, minor_units: u32) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(minor_units, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiply by a plain decimal factor (rates, multipliers).
    #[must_use]
    pub fn scale(self, factor: Decimal) -> Self {
        Self(self.0 * factor)
    }

    /// Add, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Multiply by `factor`, returning `None` on overflow.
    #[must_use]
    pub fn checked_scale(self, factor: Decimal) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
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
    fn checked_arithmetic_reports_overflow() {
        let max = Money::new(Decimal::MAX);
        assert!(max.checked_add(Money::new(dec!(1))).is_none());
        assert!(max.checked_scale(dec!(2)).is_none());
        assert_eq!(
            Money::new(dec!(2.5)).checked_add(Money::new(dec!(1))),
            Some(Money::new(dec!(3.5)))
        );
        assert_eq!(Money::new(dec!(4)).checked_scale(dec!(1.25)), Some(Money::new(dec!(5))));
    }

    #[test]
    fn round_to_is_half_up_for_positive_amounts() {
        assert_eq!(Money::new(dec!(2.345)).round_to(2).amount(), dec!(2.35));
        assert_eq!(Money::new(dec!(2.344)).round_to(2).amount(), dec!(2.34));
        assert_eq!(Money::new(dec!(0.5)).round_to(0).amount(), dec!(1));
    }

    #[test]
    fn floor_at_zero_clamps_negative() {
        assert_eq!(Money::new(dec!(-4.2)).floor_at_zero(), Money::ZERO);
        assert_eq!(Money::new(dec!(4.2)).floor_at_zero().amount(), dec!(4.2));
    }

    #[test]
    fn sum_of_amounts() {
        let total: Money = [dec!(1.5), dec!(2.5), dec!(3)]
            .into_iter()
            .map(Money::new)
            .sum();
        assert_eq!(total.amount(), dec!(7));
    }

    #[test]
    fn arithmetic() {
        let a = Money::new(dec!(10));
        let b = Money::new(dec!(4));
        assert_eq!((a - b).amount(), dec!(6));
        assert_eq!((a + b).amount(), dec!(14));
        assert_eq!((a * dec!(1.2)).amount(), dec!(12.0));
        assert_eq!(a.scale(dec!(0.5)).amount(), dec!(5.0));
    }

    #[test]
    fn predicates() {
        assert!(Money::new(dec!(1)).is_positive());
        assert!(Money::new(dec!(-1)).is_negative());
        assert!(Money::ZERO.is_zero());
        assert_eq!(Money::default(), Money::ZERO);
    }

    #[test]
    fn display_strips_trailing_zeros() {
        assert_eq!(Money::new(dec!(63.00)).to_string(), "63");
        assert_eq!(Money::new(dec!(12.50)).to_string(), "12.5");
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::new(dec!(63.00))).unwrap();
        assert_eq!(json, "\"63.00\"");
    }
}
