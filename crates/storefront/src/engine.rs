//! Application context.
//!
//! [`Engine`] is constructed once at startup and handed to whichever surface
//! drives it (the HTTP state or the CLI). It owns the catalog, the store
//! adapter, the cart, the current locale, and the display and notification
//! surfaces. Every cart mutation runs the same cycle:
//!
//! ```text
//! transition -> persist -> recompute totals -> project -> write to display
//! ```
//!
//! Operations take `&mut self`, so a mutation cannot re-enter while a
//! persist cycle is running. Nothing here fails visibly: store write errors
//! are logged and the in-memory state stays authoritative.

use imex_core::{CurrencyCode, Locale, ProductId};
use thiserror::Error;
use tracing::instrument;

use crate::cart::{AddOutcome, Cart, Totals};
use crate::catalog::{Catalog, CatalogError, UnknownProductPolicy};
use crate::config::StorefrontConfig;
use crate::notify::{NotificationKind, Notifier};
use crate::render::{CartView, DisplaySurface, RenderContext, render_cart};
use crate::store::StoreAdapter;

/// Errors returned by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Catalog lookup refused the product id.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Engine behavior knobs taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineSettings {
    /// Currency code appended to formatted amounts.
    pub currency: CurrencyCode,
    /// Locale used when none is persisted.
    pub default_locale: Locale,
    /// Treatment of product ids missing from the catalog.
    pub unknown_products: UnknownProductPolicy,
}

impl From<&StorefrontConfig> for EngineSettings {
    fn from(config: &StorefrontConfig) -> Self {
        Self {
            currency: config.currency,
            default_locale: config.default_locale,
            unknown_products: config.unknown_products,
        }
    }
}

/// The inquiry-list engine.
pub struct Engine<D, N> {
    settings: EngineSettings,
    catalog: Catalog,
    store: StoreAdapter,
    cart: Cart,
    locale: Locale,
    display: D,
    notifier: N,
}

impl<D: DisplaySurface, N: Notifier> Engine<D, N> {
    /// Load persisted state and render it once.
    ///
    /// A missing or corrupt cart loads as empty; a missing or unrecognized
    /// locale falls back to `settings.default_locale`.
    pub fn boot(
        settings: EngineSettings,
        catalog: Catalog,
        store: StoreAdapter,
        display: D,
        notifier: N,
    ) -> Self {
        let cart = store.load_cart();
        let locale = store.load_locale().unwrap_or(settings.default_locale);

        let mut engine = Self {
            settings,
            catalog,
            store,
            cart,
            locale,
            display,
            notifier,
        };

        tracing::debug!(
            lines = engine.cart.len(),
            locale = %engine.locale,
            catalog_entries = engine.catalog.len(),
            "Engine booted"
        );
        engine.refresh();
        engine
    }

    /// Add one unit of `id` to the inquiry list.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Catalog` only when the id is unknown and the
    /// policy is [`UnknownProductPolicy::Reject`]; state is left untouched.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub fn add(&mut self, id: &ProductId) -> Result<AddOutcome, EngineError> {
        let entry = self.catalog.resolve(id, self.settings.unknown_products)?;
        let outcome = self.cart.add(id, &entry);
        tracing::debug!(?outcome, "Added to inquiry");
        self.commit();
        self.notifier.notify(
            &format!("{} added to inquiry", entry.name),
            NotificationKind::Info,
        );
        Ok(outcome)
    }

    /// Remove the line for `id`. Returns whether a line existed.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let removed = self.cart.remove(id);
        self.commit();
        removed
    }

    /// Change the quantity of `id` by `delta`, never going below 1.
    ///
    /// Returns the new quantity, or `None` (and does nothing) if the id is
    /// not in the list.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub fn adjust_quantity(&mut self, id: &ProductId, delta: i64) -> Option<u32> {
        let qty = self.cart.adjust_quantity(id, delta)?;
        self.commit();
        Some(qty)
    }

    /// Current totals.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.cart.totals()
    }

    /// Switch the display language.
    ///
    /// Unrecognized tags are ignored and return `false`.
    #[instrument(skip(self))]
    pub fn set_locale(&mut self, tag: &str) -> bool {
        let Ok(locale) = tag.parse::<Locale>() else {
            tracing::debug!("Ignoring unsupported locale");
            return false;
        };

        self.locale = locale;
        if let Err(e) = self.store.save_locale(locale) {
            tracing::warn!(error = %e, "Failed to persist locale");
        }
        self.refresh();
        self.notifier.notify(
            &format!("Language changed to {}", locale.tag().to_uppercase()),
            NotificationKind::Info,
        );
        true
    }

    /// Re-project the cart and write it to the display surface.
    pub fn refresh(&mut self) {
        let view = self.view();
        render_cart(&view, &mut self.display);
    }

    /// Project the cart with the current locale and currency.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::project(&self.cart, &self.render_context())
    }

    /// Formatting inputs for the current locale and currency.
    #[must_use]
    pub const fn render_context(&self) -> RenderContext {
        RenderContext {
            locale: self.locale,
            currency: self.settings.currency,
        }
    }

    /// The current cart state.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The current locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// The product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Engine settings.
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The display surface.
    #[must_use]
    pub const fn display(&self) -> &D {
        &self.display
    }

    /// The notification surface.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Emit a notification through the engine's surface.
    pub fn notify(&mut self, message: &str, kind: NotificationKind) {
        self.notifier.notify(message, kind);
    }

    fn commit(&mut self) {
        if let Err(e) = self.store.save_cart(&self.cart) {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
        self.refresh();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use super::*;
    use crate::cart::{MAX_QTY, MAX_UNIT_VALUE};
    use crate::notify::NotificationLog;
    use crate::render::{FragmentBuffer, Headless, MountPoint};
    use crate::store::{FileStore, MemoryStore, keys};

    type TestEngine = Engine<FragmentBuffer, NotificationLog>;

    fn boot_with(store: StoreAdapter, settings: EngineSettings) -> TestEngine {
        Engine::boot(
            settings,
            Catalog::builtin(),
            store,
            FragmentBuffer::all(),
            NotificationLog::new(),
        )
    }

    fn boot() -> TestEngine {
        boot_with(StoreAdapter::new(MemoryStore::new()), EngineSettings::default())
    }

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn totals(engine: &TestEngine) -> (Decimal, Decimal) {
        let t = engine.totals();
        (t.price, t.weight.kilograms())
    }

    #[test]
    fn test_scenarios_a_through_d() {
        let mut engine = boot();
        let pipe = ProductId::from("PX-001");

        // A
        engine.add(&pipe).unwrap();
        let line = engine.cart().get(&pipe).unwrap();
        assert_eq!(line.qty, 1);
        assert_eq!(line.price, dec("1450000"));
        assert_eq!(line.weight_per_unit, dec("12.5"));
        assert_eq!(totals(&engine), (dec("1450000"), dec("12.5")));

        // B
        engine.add(&pipe).unwrap();
        assert_eq!(engine.cart().get(&pipe).unwrap().qty, 2);
        assert_eq!(totals(&engine), (dec("2900000"), dec("25.0")));

        // C
        assert_eq!(engine.adjust_quantity(&pipe, -5), Some(1));
        assert_eq!(totals(&engine), (dec("1450000"), dec("12.5")));

        // D
        assert!(engine.remove(&pipe));
        assert!(engine.cart().is_empty());
        assert_eq!(totals(&engine), (Decimal::ZERO, Decimal::ZERO));
    }

    #[test]
    fn test_display_follows_every_mutation() {
        let mut engine = boot();
        assert_eq!(engine.display().fragment(MountPoint::Counter), Some("0"));

        engine.add(&ProductId::from("BM-442")).unwrap();
        engine.add(&ProductId::from("BM-442")).unwrap();
        assert_eq!(engine.display().fragment(MountPoint::Counter), Some("2"));
        assert_eq!(
            engine.display().fragment(MountPoint::TotalPrice),
            Some("19,600,000 UZS")
        );
        assert_eq!(
            engine.display().fragment(MountPoint::TotalWeight),
            Some("90.00 kg")
        );

        engine.remove(&ProductId::from("BM-442"));
        assert_eq!(engine.display().fragment(MountPoint::Counter), Some("0"));
        assert!(
            engine
                .display()
                .fragment(MountPoint::Items)
                .unwrap()
                .contains("empty-state")
        );
    }

    #[test]
    fn test_add_notifies_with_product_name() {
        let mut engine = boot();
        engine.add(&ProductId::from("VL-099")).unwrap();
        engine.add(&ProductId::from("NON-EXISTENT")).unwrap();

        let messages: Vec<String> = engine
            .notifier_mut()
            .drain()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(
            messages,
            [
                "Ball Valve PN40 added to inquiry",
                "Industrial Asset added to inquiry"
            ]
        );
    }

    #[test]
    fn test_unknown_id_degrades_by_default() {
        let mut engine = boot();
        let outcome = engine.add(&ProductId::from("NON-EXISTENT")).unwrap();
        assert_eq!(outcome, AddOutcome::Inserted);

        let line = engine.cart().get(&ProductId::from("NON-EXISTENT")).unwrap();
        assert_eq!(line.price, Decimal::ZERO);
        assert_eq!(line.weight_per_unit, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_id_rejected_under_strict_policy() {
        let settings = EngineSettings {
            unknown_products: UnknownProductPolicy::Reject,
            ..EngineSettings::default()
        };
        let mut engine = boot_with(StoreAdapter::new(MemoryStore::new()), settings);

        let result = engine.add(&ProductId::from("NON-EXISTENT"));
        assert!(matches!(
            result,
            Err(EngineError::Catalog(CatalogError::UnknownProduct(_)))
        ));
        assert!(engine.cart().is_empty());
        assert!(engine.notifier_mut().pending().is_empty());
    }

    #[test]
    fn test_adjust_missing_is_noop() {
        let mut engine = boot();
        assert_eq!(engine.adjust_quantity(&ProductId::from("PX-001"), 3), None);
        assert!(!engine.remove(&ProductId::from("PX-001")));
        assert!(engine.cart().is_empty());
    }

    #[test]
    fn test_state_survives_reboot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut engine = boot_with(
            StoreAdapter::new(FileStore::open(&path)),
            EngineSettings::default(),
        );
        engine.add(&ProductId::from("PX-001")).unwrap();
        engine.add(&ProductId::from("VL-099")).unwrap();
        engine.adjust_quantity(&ProductId::from("VL-099"), 2);
        assert!(engine.set_locale("uz"));
        let before = engine.cart().clone();
        drop(engine);

        let engine = boot_with(
            StoreAdapter::new(FileStore::open(&path)),
            EngineSettings::default(),
        );
        assert_eq!(engine.cart(), &before);
        assert_eq!(engine.locale(), Locale::Uz);
        assert_eq!(engine.display().fragment(MountPoint::Counter), Some("4"));
    }

    #[test]
    fn test_boot_falls_back_on_corrupt_state() {
        let store = MemoryStore::with_entries([(keys::CART, "{oops"), (keys::LANG, "de")]);
        let settings = EngineSettings {
            default_locale: Locale::Ru,
            ..EngineSettings::default()
        };
        let engine = boot_with(StoreAdapter::new(store), settings);
        assert!(engine.cart().is_empty());
        assert_eq!(engine.locale(), Locale::Ru);
    }

    #[test]
    fn test_boot_drops_oversized_persisted_lines() {
        let raw = r#"[{"id":"X","name":"X","price":7e28,"weightPerUnit":1,"qty":2}]"#;
        let engine = boot_with(
            StoreAdapter::new(MemoryStore::with_entries([(keys::CART, raw)])),
            EngineSettings::default(),
        );
        assert!(engine.cart().is_empty());
        assert_eq!(engine.display().fragment(MountPoint::Counter), Some("0"));
    }

    #[test]
    fn test_huge_adjustment_stays_renderable() {
        let catalog = Catalog::from_json(
            r#"{"BIG-1": {"name": "Big", "price": 1000000000000000, "weight": 1000000000000000, "category": "tech"}}"#,
        )
        .unwrap();
        let mut engine = Engine::boot(
            EngineSettings::default(),
            catalog,
            StoreAdapter::new(MemoryStore::new()),
            FragmentBuffer::all(),
            NotificationLog::new(),
        );
        let big = ProductId::from("BIG-1");
        engine.add(&big).unwrap();

        assert_eq!(engine.adjust_quantity(&big, i64::MAX), Some(MAX_QTY));
        let ceiling = Decimal::from(MAX_UNIT_VALUE) * Decimal::from(MAX_QTY);
        assert_eq!(totals(&engine), (ceiling, ceiling));
        assert_eq!(
            engine.display().fragment(MountPoint::Counter),
            Some("1000000")
        );
    }

    #[test]
    fn test_set_locale() {
        let mut engine = boot();
        assert!(!engine.set_locale("de"));
        assert_eq!(engine.locale(), Locale::En);
        assert!(engine.notifier_mut().pending().is_empty());

        assert!(engine.set_locale("ru"));
        assert_eq!(engine.locale(), Locale::Ru);
        assert_eq!(
            engine.notifier_mut().drain()[0].message,
            "Language changed to RU"
        );
        assert!(
            engine
                .display()
                .fragment(MountPoint::Items)
                .unwrap()
                .contains("Ваш список заказа пуст.")
        );
    }

    #[test]
    fn test_headless_engine() {
        let mut engine = Engine::boot(
            EngineSettings::default(),
            Catalog::builtin(),
            StoreAdapter::new(MemoryStore::new()),
            Headless,
            NotificationLog::new(),
        );
        engine.add(&ProductId::from("PX-001")).unwrap();
        assert_eq!(engine.cart().item_count(), 1);
    }
}
