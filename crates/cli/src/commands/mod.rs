//! Command implementations.
//!
//! Each command boots a headless engine over the configured store, runs one
//! operation and reports through `tracing`.

pub mod cart;
pub mod catalog;
pub mod inquiry;
pub mod lang;

use imex_storefront::config::{ConfigError, StorefrontConfig};
use imex_storefront::engine::{Engine, EngineError, EngineSettings};
use imex_storefront::inquiry::InquiryError;
use imex_storefront::notify::TracingNotifier;
use imex_storefront::render::Headless;
use imex_storefront::store::{FileStore, StoreAdapter};
use thiserror::Error;

/// Engine type driven by the CLI.
pub type CliEngine = Engine<Headless, TracingNotifier>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Engine refused the operation.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Inquiry was invalid or not processed.
    #[error(transparent)]
    Inquiry(#[from] InquiryError),

    /// Output could not be rendered.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Locale tag is not one of `en`, `ru`, `uz`.
    #[error("Unsupported language: {0}. Valid languages: en, ru, uz")]
    UnsupportedLocale(String),
}

/// Boot a headless engine over the store named by `config`.
#[must_use]
pub fn boot(config: &StorefrontConfig) -> CliEngine {
    let store = FileStore::open(&config.store_path);
    tracing::debug!(path = %store.path().display(), "Using store file");

    Engine::boot(
        EngineSettings::from(config),
        config.load_catalog(),
        StoreAdapter::new(store),
        Headless,
        TracingNotifier,
    )
}
