//! Core types for IMEX.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod locale;
pub mod price;
pub mod weight;

pub use category::{Category, CategoryError};
pub use email::{Email, EmailError};
pub use id::ProductId;
pub use locale::{Locale, LocaleError};
pub use price::{CurrencyCode, CurrencyError, Price, group_digits};
pub use weight::Weight;
