//! Display language selection.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a locale tag is not one of the supported set.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported locale tag: {0}")]
pub struct LocaleError(pub String);

/// Supported display languages.
///
/// The set is closed: anything else fails to parse and callers fall back to
/// the configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
    Uz,
}

impl Locale {
    /// All supported locales, in switcher order.
    pub const ALL: [Self; 3] = [Self::En, Self::Ru, Self::Uz];

    /// Short tag persisted under the locale key (`en`, `ru`, `uz`).
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Uz => "uz",
        }
    }

    /// Thousands separator used when grouping amounts.
    ///
    /// `ru` and `uz` group with a no-break space.
    #[must_use]
    pub const fn group_separator(self) -> char {
        match self {
            Self::En => ',',
            Self::Ru | Self::Uz => '\u{a0}',
        }
    }

    /// Decimal separator used when formatting amounts.
    #[must_use]
    pub const fn decimal_separator(self) -> char {
        match self {
            Self::En => '.',
            Self::Ru | Self::Uz => ',',
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "en" => Ok(Self::En),
            "ru" => Ok(Self::Ru),
            "uz" => Ok(Self::Uz),
            other => Err(LocaleError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        for locale in Locale::ALL {
            assert_eq!(locale.tag().parse::<Locale>().unwrap(), locale);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_case_variants() {
        assert!("de".parse::<Locale>().is_err());
        assert!("EN".parse::<Locale>().is_err());
        assert_eq!(
            "fr".parse::<Locale>().unwrap_err(),
            LocaleError("fr".to_owned())
        );
    }

    #[test]
    fn test_serde_uses_tag() {
        assert_eq!(serde_json::to_string(&Locale::Uz).unwrap(), "\"uz\"");
    }
}
