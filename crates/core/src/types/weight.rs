//! Mass in kilograms.

use core::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative mass in kilograms.
///
/// Displays with exactly two decimals, e.g. `12.50 kg`. Arithmetic saturates
/// at [`Decimal::MAX`] instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(Decimal);

impl Weight {
    /// Zero kilograms.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a weight from a kilogram amount.
    #[must_use]
    pub const fn from_kilograms(kg: Decimal) -> Self {
        Self(kg)
    }

    /// Get the amount in kilograms.
    #[must_use]
    pub const fn kilograms(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kg", self.0)
    }
}

impl Add for Weight {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Mul<u32> for Weight {
    type Output = Self;

    fn mul(self, qty: u32) -> Self {
        Self(self.0.checked_mul(Decimal::from(qty)).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Weight::from_kilograms(Decimal::new(125, 1)).to_string(), "12.50 kg");
        assert_eq!(Weight::ZERO.to_string(), "0.00 kg");
        assert_eq!(Weight::from_kilograms(Decimal::new(82, 1)).to_string(), "8.20 kg");
    }

    #[test]
    fn test_sum_of_line_weights() {
        let total: Weight = [
            Weight::from_kilograms(Decimal::new(125, 1)) * 2,
            Weight::from_kilograms(Decimal::new(450, 1)) * 1,
        ]
        .into_iter()
        .sum();
        assert_eq!(total.kilograms(), Decimal::new(700, 1));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let heavy = Weight::from_kilograms(Decimal::MAX);
        assert_eq!((heavy * 2).kilograms(), Decimal::MAX);
        assert_eq!((heavy + heavy).kilograms(), Decimal::MAX);
    }
}
