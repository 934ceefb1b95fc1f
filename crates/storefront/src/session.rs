//! Visitor sessions.
//!
//! Every browser gets a `tower-sessions` session holding a random
//! [`VisitorId`]. The visitor id scopes that browser's inquiry list and
//! language in the shared store, so visitors never see each other's state.
//!
//! Session records live in the same store as the carts (under
//! `imex_session:<id>`), which keeps a visitor's list across restarts.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::{Duration, OffsetDateTime};
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store;
use tower_sessions::{Expiry, Session, SessionManagerLayer, SessionStore};
use uuid::Uuid;

use crate::config::StorefrontConfig;
use crate::store::{KeyValueStore, SharedStore, StoreError, keys as store_keys};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "imex_session";

/// Session expiry time in seconds (30 days).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Session keys.
pub mod keys {
    /// Key for the visitor id scoping the cart and locale.
    pub const VISITOR_ID: &str = "visitor_id";
}

/// Anonymous visitor identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitorId(Uuid);

impl VisitorId {
    /// Generate a new random visitor id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for VisitorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Get the visitor id from the session, assigning a new one on first visit.
///
/// # Errors
///
/// Returns an error if the session store cannot be read or written.
pub async fn visitor_id(session: &Session) -> Result<VisitorId, tower_sessions::session::Error> {
    if let Some(id) = session.get::<VisitorId>(keys::VISITOR_ID).await? {
        return Ok(id);
    }

    let id = VisitorId::new();
    session.insert(keys::VISITOR_ID, id).await?;
    tracing::debug!(visitor = %id, "Assigned visitor id");
    Ok(id)
}

/// Session records kept in the shared key-value store.
#[derive(Debug, Clone)]
pub struct StoredSessions {
    store: SharedStore,
}

impl StoredSessions {
    /// Keep session records in `store`.
    #[must_use]
    pub const fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

fn record_key(id: &Id) -> String {
    store_keys::scoped(store_keys::SESSION, &id.to_string())
}

fn backend(err: &StoreError) -> session_store::Error {
    session_store::Error::Backend(err.to_string())
}

#[async_trait]
impl SessionStore for StoredSessions {
    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let raw = serde_json::to_string(record)
            .map_err(|e| session_store::Error::Encode(e.to_string()))?;
        self.store
            .clone()
            .set(&record_key(&record.id), raw)
            .map_err(|e| backend(&e))
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let Some(raw) = self
            .store
            .get(&record_key(session_id))
            .map_err(|e| backend(&e))?
        else {
            return Ok(None);
        };

        match serde_json::from_str::<Record>(&raw) {
            Ok(record) if record.expiry_date > OffsetDateTime::now_utc() => Ok(Some(record)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!(error = %e, "Stored session is corrupt, starting a new one");
                Ok(None)
            }
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.store
            .clone()
            .remove(&record_key(session_id))
            .map_err(|e| backend(&e))
    }
}

/// Create the session layer over the shared store.
///
/// # Arguments
///
/// * `store` - Store holding session records
/// * `config` - Storefront configuration (for the cookie `Secure` flag)
#[must_use]
pub fn create_session_layer(
    store: SharedStore,
    config: &StorefrontConfig,
) -> SessionManagerLayer<StoredSessions> {
    SessionManagerLayer::new(StoredSessions::new(store))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(SESSION_EXPIRY_SECONDS)))
        .with_secure(config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
