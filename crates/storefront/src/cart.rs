//! Inquiry-list state.
//!
//! [`Cart`] holds the line items and implements the pure state transitions:
//! add, remove and adjust-quantity. It knows nothing about persistence or
//! rendering; the engine runs persist and re-render after each transition.
//!
//! Invariants upheld by every transition:
//! - at most one [`LineItem`] per [`ProductId`];
//! - every `qty` is between 1 and [`MAX_QTY`] (adjustments clamp, they
//!   never remove);
//! - unit prices and weights are non-negative and at most
//!   [`MAX_UNIT_VALUE`], so totals never overflow;
//! - [`Cart::totals`] is a pure function of the current lines.

use imex_core::{Category, ProductId, Weight};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;

/// Largest quantity a single line can hold.
pub const MAX_QTY: u32 = 1_000_000;

/// Largest accepted unit price or unit weight.
pub const MAX_UNIT_VALUE: u64 = 1_000_000_000_000_000;

/// Whether `value` is an acceptable unit price or unit weight.
#[must_use]
pub fn unit_value_in_range(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::from(MAX_UNIT_VALUE)
}

/// One product entry in the inquiry list.
///
/// Name, price, weight and category are a snapshot of the catalog entry at
/// add time and are not re-synced afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product id; unique within the cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in the currency's major unit.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Unit weight in kilograms.
    #[serde(with = "rust_decimal::serde::float")]
    pub weight_per_unit: Decimal,
    /// Quantity, at least 1.
    pub qty: u32,
    /// Product category; absent for sentinel items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl LineItem {
    fn from_entry(id: &ProductId, entry: &CatalogEntry) -> Self {
        Self {
            id: id.clone(),
            name: entry.name.clone(),
            price: entry.price,
            weight_per_unit: entry.weight,
            qty: 1,
            category: entry.category,
        }
    }

    /// `price * qty`, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn line_price(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.qty))
            .unwrap_or(Decimal::MAX)
    }

    /// `weight_per_unit * qty`.
    #[must_use]
    pub fn line_weight(&self) -> Weight {
        Weight::from_kilograms(self.weight_per_unit) * self.qty
    }
}

/// Derived totals over all line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    /// `Σ price * qty`.
    pub price: Decimal,
    /// `Σ weight_per_unit * qty`.
    pub weight: Weight,
}

/// Outcome of [`Cart::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    Inserted,
    /// An existing line's quantity was incremented to the given value.
    Incremented(u32),
}

/// Ordered sequence of line items keyed by product id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from previously persisted items.
    ///
    /// Stored data may have been edited by hand. Quantities are clamped into
    /// `1..=MAX_QTY`, repeated ids are merged into the first occurrence, and
    /// lines with a negative or out-of-range price or weight are dropped.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for mut item in items {
            if !unit_value_in_range(item.price) || !unit_value_in_range(item.weight_per_unit) {
                tracing::warn!(product_id = %item.id, "Dropping stored line with out-of-range values");
                continue;
            }
            item.qty = item.qty.clamp(1, MAX_QTY);
            if let Some(existing) = cart.find_mut(&item.id) {
                existing.qty = existing.qty.saturating_add(item.qty).min(MAX_QTY);
            } else {
                cart.items.push(item);
            }
        }
        cart
    }

    /// Add one unit of `id`.
    ///
    /// Increments the existing line, or appends a new line copied from
    /// `entry` with quantity 1.
    pub fn add(&mut self, id: &ProductId, entry: &CatalogEntry) -> AddOutcome {
        if let Some(existing) = self.find_mut(id) {
            existing.qty = existing.qty.saturating_add(1).min(MAX_QTY);
            return AddOutcome::Incremented(existing.qty);
        }
        self.items.push(LineItem::from_entry(id, entry));
        AddOutcome::Inserted
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != *id);
        self.items.len() != before
    }

    /// Set the line's quantity to `qty + delta`, clamped into `1..=MAX_QTY`.
    ///
    /// Returns the new quantity, or `None` if there is no line for `id`.
    pub fn adjust_quantity(&mut self, id: &ProductId, delta: i64) -> Option<u32> {
        let item = self.find_mut(id)?;
        let target = i64::from(item.qty)
            .saturating_add(delta)
            .clamp(1, i64::from(MAX_QTY));
        item.qty = u32::try_from(target).unwrap_or(MAX_QTY);
        Some(item.qty)
    }

    /// Recompute totals from the current lines.
    #[must_use]
    pub fn totals(&self) -> Totals {
        let price = self
            .items
            .iter()
            .map(LineItem::line_price)
            .try_fold(Decimal::ZERO, Decimal::checked_add)
            .unwrap_or(Decimal::MAX);
        Totals {
            price,
            weight: self.items.iter().map(LineItem::line_weight).sum(),
        }
    }

    /// Sum of all quantities, shown on the counter badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }

    /// The line for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id == *id)
    }
}
