//! Product catalog lookup.
//!
//! The catalog is static, read-only data: a mapping from product id to its
//! display name, unit price, unit weight and category. The built-in entries
//! are compiled in; a JSON file can replace them at startup without changing
//! anything downstream.
//!
//! Misses are not errors by default. [`Catalog::find_or_sentinel`] returns a
//! zero-valued "Industrial Asset" record for unknown ids, and
//! [`Catalog::resolve`] lets the caller choose between that and rejection via
//! [`UnknownProductPolicy`].

use std::path::Path;
use std::sync::Arc;

use imex_core::{Category, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::unit_value_in_range;
use crate::filter::CategoryFilter;

/// Display name of the sentinel entry returned for unknown ids.
pub const SENTINEL_NAME: &str = "Industrial Asset";

/// Errors from catalog loading and strict lookup.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Product id is not in the catalog and the policy rejects unknown ids.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not a valid id-to-entry map.
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    /// An entry's price or weight is negative or out of range.
    #[error("catalog entry {id} has an invalid {field}")]
    InvalidEntry {
        /// Offending product id.
        id: ProductId,
        /// `"price"` or `"weight"`.
        field: &'static str,
    },
}

/// How lookups treat product ids missing from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownProductPolicy {
    /// Substitute the zero-valued sentinel entry.
    #[default]
    Degrade,
    /// Refuse the lookup with [`CatalogError::UnknownProduct`].
    Reject,
}

impl std::str::FromStr for UnknownProductPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "degrade" => Ok(Self::Degrade),
            "reject" => Ok(Self::Reject),
            _ => Err(format!("invalid unknown-product policy: {s} (expected degrade or reject)")),
        }
    }
}

/// A static product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name.
    pub name: String,
    /// Unit price in the currency's major unit.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Unit weight in kilograms.
    #[serde(with = "rust_decimal::serde::float")]
    pub weight: Decimal,
    /// Product category; `None` only for the sentinel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl CatalogEntry {
    /// The zero-valued record used for unknown ids.
    #[must_use]
    pub fn sentinel() -> Self {
        Self {
            name: SENTINEL_NAME.to_owned(),
            price: Decimal::ZERO,
            weight: Decimal::ZERO,
            category: None,
        }
    }

    fn validate(&self, id: &ProductId) -> Result<(), CatalogError> {
        let invalid = |field| CatalogError::InvalidEntry {
            id: id.clone(),
            field,
        };
        if !unit_value_in_range(self.price) {
            return Err(invalid("price"));
        }
        if !unit_value_in_range(self.weight) {
            return Err(invalid("weight"));
        }
        Ok(())
    }
}

/// Read-only product catalog, kept in a stable display order.
///
/// Clones share the same entries.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Arc<Vec<(ProductId, CatalogEntry)>>,
}

impl Catalog {
    /// The compiled-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let entry = |name: &str, price: i64, weight: Decimal, category| CatalogEntry {
            name: name.to_owned(),
            price: Decimal::from(price),
            weight,
            category: Some(category),
        };

        Self::from_entries([
            (
                ProductId::from("PX-001"),
                entry("Seamless Pipe ASTM", 1_450_000, Decimal::new(125, 1), Category::Pipes),
            ),
            (
                ProductId::from("BM-442"),
                entry("H-Beam S355JR", 9_800_000, Decimal::new(450, 1), Category::Structural),
            ),
            (
                ProductId::from("VL-099"),
                entry("Ball Valve PN40", 3_250_000, Decimal::new(82, 1), Category::Tech),
            ),
        ])
    }

    /// Build a catalog from explicit entries, keeping their order.
    ///
    /// Later duplicates of an id are dropped.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (ProductId, CatalogEntry)>) -> Self {
        let mut deduped: Vec<(ProductId, CatalogEntry)> = Vec::new();
        for (id, entry) in entries {
            if deduped.iter().any(|(existing, _)| *existing == id) {
                tracing::warn!(product_id = %id, "Duplicate catalog id ignored");
                continue;
            }
            deduped.push((id, entry));
        }
        Self {
            entries: Arc::new(deduped),
        }
    }

    /// Parse a catalog from a JSON object of `id -> entry`.
    ///
    /// Entries are ordered by id so the grid is stable across restarts.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the JSON is not an id-to-entry map,
    /// or `CatalogError::InvalidEntry` if a price or weight is negative or
    /// out of range.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let map: std::collections::BTreeMap<ProductId, CatalogEntry> = serde_json::from_str(raw)?;
        for (id, entry) in &map {
            entry.validate(id)?;
        }
        Ok(Self::from_entries(map))
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Look up an entry, returning `None` on a miss.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, entry)| entry)
    }

    /// Look up an entry, substituting the sentinel on a miss.
    #[must_use]
    pub fn find_or_sentinel(&self, id: &ProductId) -> CatalogEntry {
        self.find(id).cloned().unwrap_or_else(|| {
            tracing::debug!(product_id = %id, "Unknown product, using sentinel entry");
            CatalogEntry::sentinel()
        })
    }

    /// Look up an entry under the given policy.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownProduct` for a miss under
    /// [`UnknownProductPolicy::Reject`].
    pub fn resolve(
        &self,
        id: &ProductId,
        policy: UnknownProductPolicy,
    ) -> Result<CatalogEntry, CatalogError> {
        match policy {
            UnknownProductPolicy::Degrade => Ok(self.find_or_sentinel(id)),
            UnknownProductPolicy::Reject => self
                .find(id)
                .cloned()
                .ok_or_else(|| CatalogError::UnknownProduct(id.clone())),
        }
    }

    /// All entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = (&ProductId, &CatalogEntry)> {
        self.entries.iter().map(|(id, entry)| (id, entry))
    }

    /// Entries matching `filter`, in display order.
    #[must_use]
    pub fn filtered(&self, filter: &CategoryFilter) -> Vec<(&ProductId, &CatalogEntry)> {
        self.entries()
            .filter(|(_, entry)| filter.matches(entry.category))
            .collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
