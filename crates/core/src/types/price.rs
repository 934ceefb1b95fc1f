//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are kept in the currency's major unit (whole sums, not tiyin or
//! cents). Formatting follows the display locale: digits are grouped in
//! threes and at most three fraction digits are shown.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::locale::Locale;

/// Largest number of fraction digits shown when formatting an amount.
const MAX_FRACTION_DIGITS: u32 = 3;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's major unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display in the given locale, e.g. `1,450,000 UZS`.
    #[must_use]
    pub fn localized(&self, locale: Locale) -> String {
        format!(
            "{} {}",
            group_digits(self.amount, locale),
            self.currency_code.code()
        )
    }
}

/// Error returned for an unsupported currency code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported currency code: {0}")]
pub struct CurrencyError(pub String);

/// ISO 4217 currency codes accepted by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    UZS,
    USD,
    EUR,
    RUB,
}

impl CurrencyCode {
    /// The three-letter code shown after formatted amounts.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UZS => "UZS",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::RUB => "RUB",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UZS" => Ok(Self::UZS),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "RUB" => Ok(Self::RUB),
            _ => Err(CurrencyError(s.to_owned())),
        }
    }
}

/// Group the integer digits of `amount` in threes using the locale's
/// separators.
///
/// ```rust
/// # use imex_core::{Locale, group_digits};
/// # use rust_decimal::Decimal;
/// assert_eq!(group_digits(Decimal::new(1_450_000, 0), Locale::En), "1,450,000");
/// assert_eq!(group_digits(Decimal::new(12_345, 1), Locale::Ru), "1\u{a0}234,5");
/// ```
#[must_use]
pub fn group_digits(amount: Decimal, locale: Locale) -> String {
    let rounded = amount
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = rounded.abs().to_string();
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + integer.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    let len = integer.len();
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(locale.group_separator());
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator());
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_en() {
        let price = Price::new(Decimal::new(1_450_000, 0), CurrencyCode::UZS);
        assert_eq!(price.localized(Locale::En), "1,450,000 UZS");
    }

    #[test]
    fn test_localized_ru_uses_no_break_space() {
        let price = Price::new(Decimal::new(9_800_000, 0), CurrencyCode::UZS);
        assert_eq!(price.localized(Locale::Ru), "9\u{a0}800\u{a0}000 UZS");
    }

    #[test]
    fn test_group_digits_small_and_zero() {
        assert_eq!(group_digits(Decimal::ZERO, Locale::En), "0");
        assert_eq!(group_digits(Decimal::new(999, 0), Locale::En), "999");
        assert_eq!(group_digits(Decimal::new(1000, 0), Locale::En), "1,000");
    }

    #[test]
    fn test_group_digits_trims_and_rounds_fraction() {
        // 2900000.50 -> trailing zero dropped
        assert_eq!(
            group_digits(Decimal::new(290_000_050, 2), Locale::En),
            "2,900,000.5"
        );
        // 1.23456 -> three fraction digits
        assert_eq!(group_digits(Decimal::new(123_456, 5), Locale::En), "1.235");
    }

    #[test]
    fn test_group_digits_negative() {
        assert_eq!(group_digits(Decimal::new(-12_000, 0), Locale::En), "-12,000");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("uzs".parse::<CurrencyCode>().unwrap(), CurrencyCode::UZS);
        assert_eq!(" USD ".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
