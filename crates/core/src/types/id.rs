//! Product identifiers.
//!
//! Catalog SKUs such as `PX-001` are opaque strings. Wrapping them in a
//! newtype keeps them from being mixed up with display names or locale tags.

use core::fmt;
use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// A catalog product identifier (SKU).
///
/// Serialized transparently as a JSON string, so persisted carts read as
/// `{"id": "PX-001", ...}`.
///
/// # Example
///
/// ```rust
/// # use imex_core::ProductId;
/// let id = ProductId::new("PX-001");
/// assert_eq!(id.as_str(), "PX-001");
/// assert_eq!(id.to_string(), "PX-001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ProductId::new("BM-442");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"BM-442\"");

        let parsed: ProductId = serde_json::from_str("\"VL-099\"").unwrap();
        assert_eq!(parsed, ProductId::from("VL-099"));
    }

    #[test]
    fn test_borrow_allows_str_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(ProductId::new("PX-001"), 1);
        assert_eq!(map.get("PX-001"), Some(&1));
    }
}
