//! Persistent store adapter.
//!
//! The engine persists two values: the inquiry list under [`keys::CART`]
//! and the selected display language under [`keys::LANG`]. Both live in a
//! plain string key-value store, so the same adapter works over an
//! in-memory map (tests, headless use) or a JSON file on disk.
//!
//! Reads never fail from the caller's point of view: a missing key or a
//! value that no longer parses loads as "nothing stored".
//!
//! The HTTP surface serves many visitors from one store. Each visitor gets a
//! [`StoreAdapter::scoped`] view whose keys carry a `:<scope>` suffix, e.g.
//! `imex_cart:3f1c...`; the unscoped keys belong to the local CLI user.

mod file;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use imex_core::Locale;
use thiserror::Error;

use crate::cart::{Cart, LineItem};

pub use file::FileStore;

/// Store keys.
pub mod keys {
    /// Key holding the JSON array of line items.
    pub const CART: &str = "imex_cart";

    /// Key holding the selected locale tag.
    pub const LANG: &str = "imex_lang";

    /// Prefix of persisted HTTP session records.
    pub const SESSION: &str = "imex_session";

    /// `base` namespaced under `scope`.
    #[must_use]
    pub fn scoped(base: &str, scope: &str) -> String {
        format!("{base}:{scope}")
    }
}

/// Errors raised by a backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded.
    #[error("store encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key-value store.
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing medium cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Volatile store backed by a `HashMap`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `entries`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Cloneable handle to one backing store shared across engines.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Box<dyn KeyValueStore>>>,
}

impl SharedStore {
    /// Share `inner` behind a lock.
    #[must_use]
    pub fn new(inner: impl KeyValueStore + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(inner))),
        }
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedStore").finish_non_exhaustive()
    }
}

/// Adapter that (de)serializes engine state over a [`KeyValueStore`].
pub struct StoreAdapter {
    inner: Box<dyn KeyValueStore>,
    scope: Option<String>,
}

impl StoreAdapter {
    /// Wrap a backing store, using the unscoped keys.
    #[must_use]
    pub fn new(inner: impl KeyValueStore + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            scope: None,
        }
    }

    /// Wrap a backing store, namespacing every key under `scope`.
    #[must_use]
    pub fn scoped(inner: impl KeyValueStore + 'static, scope: impl Into<String>) -> Self {
        Self {
            inner: Box::new(inner),
            scope: Some(scope.into()),
        }
    }

    fn key(&self, base: &str) -> String {
        self.scope
            .as_deref()
            .map_or_else(|| base.to_owned(), |scope| keys::scoped(base, scope))
    }

    /// Load the persisted cart.
    ///
    /// Returns an empty cart if the key is absent, unreadable, or does not
    /// parse as a line-item array.
    #[must_use]
    pub fn load_cart(&self) -> Cart {
        let raw = match self.inner.get(&self.key(keys::CART)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted cart, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Vec<LineItem>>(&raw) {
            Ok(items) => Cart::from_items(items),
            Err(e) => {
                tracing::warn!(error = %e, "Persisted cart is corrupt, starting empty");
                Cart::new()
            }
        }
    }

    /// Overwrite the persisted cart with the full line-item sequence.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or the backing write fails.
    pub fn save_cart(&mut self, cart: &Cart) -> Result<(), StoreError> {
        let raw = serde_json::to_string(cart.items())?;
        let key = self.key(keys::CART);
        self.inner.set(&key, raw)
    }

    /// Load the persisted locale, if one is stored and recognized.
    #[must_use]
    pub fn load_locale(&self) -> Option<Locale> {
        let raw = self.inner.get(&self.key(keys::LANG)).ok().flatten()?;
        match raw.parse() {
            Ok(locale) => Some(locale),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring persisted locale");
                None
            }
        }
    }

    /// Persist the selected locale.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing write fails.
    pub fn save_locale(&mut self, locale: Locale) -> Result<(), StoreError> {
        let key = self.key(keys::LANG);
        self.inner.set(&key, locale.tag().to_owned())
    }
}

impl std::fmt::Debug for StoreAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreAdapter")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use imex_core::ProductId;

    use super::*;
    use crate::catalog::Catalog;

    fn cart_with(ids: &[&str]) -> Cart {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        for id in ids {
            let id = ProductId::from(*id);
            let entry = catalog.find_or_sentinel(&id);
            cart.add(&id, &entry);
        }
        cart
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let adapter = StoreAdapter::new(MemoryStore::new());
        assert!(adapter.load_cart().is_empty());
        assert_eq!(adapter.load_locale(), None);
    }

    #[test]
    fn test_load_corrupt_cart_is_empty() {
        for raw in ["not json", "{\"id\":1}", "[{\"id\":\"PX-001\"}]", "null"] {
            let adapter = StoreAdapter::new(MemoryStore::with_entries([(keys::CART, raw)]));
            assert!(adapter.load_cart().is_empty(), "raw = {raw}");
        }
    }

    #[test]
    fn test_cart_roundtrip() {
        let mut cart = cart_with(&["PX-001", "BM-442", "NON-EXISTENT"]);
        cart.adjust_quantity(&ProductId::from("BM-442"), 4);

        let mut adapter = StoreAdapter::new(MemoryStore::new());
        adapter.save_cart(&cart).unwrap();
        assert_eq!(adapter.load_cart(), cart);
    }

    #[test]
    fn test_persisted_layout() {
        let store = SharedStore::new(MemoryStore::new());
        let mut adapter = StoreAdapter::new(store.clone());
        adapter
            .save_cart(&cart_with(&["PX-001", "NON-EXISTENT"]))
            .unwrap();

        let raw = store.get(keys::CART).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {
                    "id": "PX-001",
                    "name": "Seamless Pipe ASTM",
                    "price": 1_450_000.0,
                    "weightPerUnit": 12.5,
                    "qty": 1,
                    "category": "pipes"
                },
                {
                    "id": "NON-EXISTENT",
                    "name": "Industrial Asset",
                    "price": 0.0,
                    "weightPerUnit": 0.0,
                    "qty": 1
                }
            ])
        );
    }

    #[test]
    fn test_scoped_adapters_do_not_share_state() {
        let store = SharedStore::new(MemoryStore::new());
        let mut alice = StoreAdapter::scoped(store.clone(), "alice");
        let mut bob = StoreAdapter::scoped(store.clone(), "bob");

        alice.save_cart(&cart_with(&["PX-001"])).unwrap();
        alice.save_locale(Locale::Uz).unwrap();
        bob.save_cart(&cart_with(&["VL-099", "VL-099"])).unwrap();

        assert_eq!(alice.load_cart().item_count(), 1);
        assert_eq!(bob.load_cart().item_count(), 2);
        assert_eq!(bob.load_locale(), None);
        assert!(StoreAdapter::new(store.clone()).load_cart().is_empty());
        assert!(store.get("imex_cart:alice").unwrap().is_some());
        assert_eq!(store.get("imex_lang:alice").unwrap().as_deref(), Some("uz"));
    }

    #[test]
    fn test_out_of_range_lines_load_as_dropped() {
        let raw = r#"[
            {"id":"X","name":"X","price":7e28,"weightPerUnit":1,"qty":2},
            {"id":"N","name":"N","price":-5,"weightPerUnit":1,"qty":1},
            {"id":"PX-001","name":"Seamless Pipe ASTM","price":1450000,"weightPerUnit":12.5,"qty":1}
        ]"#;
        let cart = StoreAdapter::new(MemoryStore::with_entries([(keys::CART, raw)])).load_cart();
        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["PX-001"]);
    }

    #[test]
    fn test_loads_integer_numbers_written_by_other_clients() {
        let raw = r#"[{"id":"PX-001","name":"Seamless Pipe ASTM","price":1450000,"weightPerUnit":12.5,"qty":3,"category":"pipes"}]"#;
        let adapter = StoreAdapter::new(MemoryStore::with_entries([(keys::CART, raw)]));
        let cart = adapter.load_cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].qty, 3);
    }

    #[test]
    fn test_locale_roundtrip_and_garbage() {
        let mut adapter = StoreAdapter::new(MemoryStore::new());
        adapter.save_locale(Locale::Ru).unwrap();
        assert_eq!(adapter.load_locale(), Some(Locale::Ru));

        let adapter = StoreAdapter::new(MemoryStore::with_entries([(keys::LANG, "klingon")]));
        assert_eq!(adapter.load_locale(), None);
    }
}
