//! Application state shared across handlers.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tower_sessions::Session;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::engine::{Engine, EngineSettings};
use crate::inquiry::InquiryProcessor;
use crate::notify::NotificationLog;
use crate::render::FragmentBuffer;
use crate::session::{VisitorId, visitor_id};
use crate::store::{KeyValueStore, SharedStore, StoreAdapter};

/// Engine type driven by the HTTP surface.
pub type WebEngine = Engine<FragmentBuffer, NotificationLog>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Engines are booted per
/// request over the visitor's scoped keys; a single async mutex serializes
/// them so read-modify-write cycles on the store never interleave.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    store: SharedStore,
    lock: Mutex<()>,
    inquiries: InquiryProcessor,
}

impl AppState {
    /// Build the application state over `store`.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `store` - Backing store for carts, locales and sessions
    #[must_use]
    pub fn new(config: StorefrontConfig, store: impl KeyValueStore + 'static) -> Self {
        let catalog = config.load_catalog();
        let inquiries = InquiryProcessor::new(config.inquiry_delay);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                store: SharedStore::new(store),
                lock: Mutex::new(()),
                inquiries,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the shared backing store.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.inner.store
    }

    /// Boot the engine for `visitor` and hold it for one operation.
    pub async fn engine(&self, visitor: VisitorId) -> VisitorEngine<'_> {
        let guard = self.inner.lock.lock().await;
        let engine = Engine::boot(
            EngineSettings::from(&self.inner.config),
            self.inner.catalog.clone(),
            StoreAdapter::scoped(self.inner.store.clone(), visitor.to_string()),
            FragmentBuffer::all(),
            NotificationLog::new(),
        );
        VisitorEngine {
            engine,
            _guard: guard,
        }
    }

    /// Boot the engine for the visitor behind `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or written.
    pub async fn visitor_engine(
        &self,
        session: &Session,
    ) -> Result<VisitorEngine<'_>, tower_sessions::session::Error> {
        let visitor = visitor_id(session).await?;
        Ok(self.engine(visitor).await)
    }

    /// Get the inquiry processor.
    #[must_use]
    pub fn inquiries(&self) -> &InquiryProcessor {
        &self.inner.inquiries
    }
}

/// One visitor's engine, exclusive for as long as it is held.
pub struct VisitorEngine<'a> {
    engine: WebEngine,
    _guard: MutexGuard<'a, ()>,
}

impl Deref for VisitorEngine<'_> {
    type Target = WebEngine;

    fn deref(&self) -> &WebEngine {
        &self.engine
    }
}

impl DerefMut for VisitorEngine<'_> {
    fn deref_mut(&mut self) -> &mut WebEngine {
        &mut self.engine
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use imex_core::{Locale, ProductId};

    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_visitors_are_isolated() {
        let state = AppState::new(StorefrontConfig::default(), MemoryStore::new());
        let alice = VisitorId::new();
        let bob = VisitorId::new();

        state.engine(alice).await.add(&ProductId::from("PX-001")).unwrap();
        assert!(state.engine(alice).await.set_locale("uz"));

        assert_eq!(state.engine(alice).await.cart().item_count(), 1);
        assert_eq!(state.engine(alice).await.locale(), Locale::Uz);
        assert!(state.engine(bob).await.cart().is_empty());
        assert_eq!(state.engine(bob).await.locale(), Locale::En);
    }
}
