//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `IMEX_HOST` - Bind address (default: 127.0.0.1)
//! - `IMEX_PORT` - Listen port (default: 3000)
//! - `IMEX_STORE_PATH` - JSON file backing the local store (default: .imex/store.json)
//! - `IMEX_DEFAULT_LANG` - Locale used when none is persisted: en, ru, uz (default: en)
//! - `IMEX_CURRENCY` - Currency code shown after amounts (default: UZS)
//! - `IMEX_UNKNOWN_PRODUCTS` - `degrade` or `reject` unknown product ids (default: degrade)
//! - `IMEX_INQUIRY_DELAY_MS` - Simulated inquiry processing delay (default: 2000)
//! - `IMEX_CATALOG_PATH` - JSON catalog replacing the built-in entries
//! - `IMEX_SECURE_COOKIES` - Mark the session cookie `Secure` (default: false)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use imex_core::{CurrencyCode, Locale};
use thiserror::Error;

use crate::catalog::{Catalog, UnknownProductPolicy};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Location of the file-backed key-value store
    pub store_path: PathBuf,
    /// Locale used when none is persisted
    pub default_locale: Locale,
    /// Currency code appended to formatted amounts
    pub currency: CurrencyCode,
    /// Treatment of product ids missing from the catalog
    pub unknown_products: UnknownProductPolicy,
    /// Simulated processing delay for inquiry submissions
    pub inquiry_delay: Duration,
    /// Optional JSON catalog replacing the built-in one
    pub catalog_path: Option<PathBuf>,
    /// Whether the session cookie is only sent over HTTPS
    pub secure_cookies: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            store_path: PathBuf::from(".imex/store.json"),
            default_locale: Locale::En,
            currency: CurrencyCode::UZS,
            unknown_products: UnknownProductPolicy::Degrade,
            inquiry_delay: Duration::from_millis(2000),
            catalog_path: None,
            secure_cookies: false,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let inquiry_delay = parse_or(&lookup, "IMEX_INQUIRY_DELAY_MS", None)?
            .map_or(defaults.inquiry_delay, Duration::from_millis);

        Ok(Self {
            host: parse_or(&lookup, "IMEX_HOST", Some(defaults.host))?.unwrap_or(defaults.host),
            port: parse_or(&lookup, "IMEX_PORT", Some(defaults.port))?.unwrap_or(defaults.port),
            store_path: lookup("IMEX_STORE_PATH").map_or(defaults.store_path, PathBuf::from),
            default_locale: parse_or(&lookup, "IMEX_DEFAULT_LANG", Some(defaults.default_locale))?
                .unwrap_or(defaults.default_locale),
            currency: parse_or(&lookup, "IMEX_CURRENCY", Some(defaults.currency))?
                .unwrap_or(defaults.currency),
            unknown_products: parse_or(
                &lookup,
                "IMEX_UNKNOWN_PRODUCTS",
                Some(defaults.unknown_products),
            )?
            .unwrap_or(defaults.unknown_products),
            inquiry_delay,
            catalog_path: lookup("IMEX_CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            secure_cookies: parse_or(&lookup, "IMEX_SECURE_COOKIES", Some(defaults.secure_cookies))?
                .unwrap_or(defaults.secure_cookies),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Load the configured catalog, falling back to the built-in one.
    ///
    /// A catalog file that cannot be loaded is logged, not fatal.
    #[must_use]
    pub fn load_catalog(&self) -> Catalog {
        let Some(path) = &self.catalog_path else {
            return Catalog::builtin();
        };

        match Catalog::from_json_file(path) {
            Ok(catalog) => {
                tracing::info!(path = %path.display(), entries = catalog.len(), "Loaded catalog file");
                catalog
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load catalog file, using built-in catalog");
                Catalog::builtin()
            }
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, returning `default` when unset or blank.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Option<T>,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        _ => Ok(default),
    }
}
