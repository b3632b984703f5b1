//! Decimal money representation.
//!
//! All prices and totals in the system are decimal currency values. Floating
//! point is never used for money; arithmetic goes through [`rust_decimal`]
//! and display rounding happens only at the record/render boundary.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Sales tax rate applied uniformly to every sale (8%).
///
/// There are no per-category tax rules; the rate is a single fixed constant.
/// Built with `from_parts` because `Decimal::new` is not const.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Errors that can occur when constructing a [`Money`] value.
#[derive(thiserror::Error, Debug, Clone)]
pub enum MoneyError {
    /// Monetary amounts (unit prices) must be non-negative.
    #[error("money amount cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative USD amount.
///
/// Internally exact; use [`Money::rounded`] to snap to cents for display or
/// for recording on a finalized transaction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a money value, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Negative` if `amount < 0`.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a money value from a whole number of cents.
    ///
    /// Convenient for literals: `Money::from_cents(1599)` is $15.99.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Negative` if `cents < 0`.
    pub fn from_cents(cents: i64) -> Result<Self, MoneyError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// The exact decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Round to 2 decimal places, midpoint away from zero.
    ///
    /// Matches the display rounding of the original system (JS `toFixed`):
    /// 3.5584 rounds to 3.56, 48.0384 rounds to 48.04.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, std::ops::Add::add)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.rounded().0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_rejected() {
        let result = Money::new(Decimal::new(-100, 2));
        assert!(matches!(result, Err(MoneyError::Negative(_))));
    }

    #[test]
    fn test_zero_allowed() {
        assert!(Money::new(Decimal::ZERO).is_ok());
        assert!(Money::from_cents(0).is_ok());
    }

    #[test]
    fn test_from_cents() {
        let price = Money::from_cents(1599).unwrap();
        assert_eq!(price.to_string(), "$15.99");
    }

    #[test]
    fn test_rounding_midpoint_away_from_zero() {
        // 44.48 * 0.08 = 3.5584 -> 3.56
        let tax = Money::new(Decimal::new(35584, 4)).unwrap();
        assert_eq!(tax.rounded().amount(), Decimal::new(356, 2));

        // 48.0384 -> 48.04
        let total = Money::new(Decimal::new(480_384, 4)).unwrap();
        assert_eq!(total.rounded().amount(), Decimal::new(4804, 2));
    }

    #[test]
    fn test_times_and_sum() {
        let aspirin = Money::from_cents(1599).unwrap();
        let vitamin_c = Money::from_cents(1250).unwrap();
        let subtotal: Money = [aspirin.times(2), vitamin_c.times(1)].into_iter().sum();
        assert_eq!(subtotal.amount(), Decimal::new(4448, 2));
    }

    #[test]
    fn test_tax_rate_is_eight_percent() {
        assert_eq!(TAX_RATE, Decimal::new(8, 2));
    }
}
