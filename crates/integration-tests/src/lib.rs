//! Integration tests for the IMEX storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p imex-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Engine behavior across restarts on a real store file
//! - `http_flow` - The HTMX surface served on an ephemeral port
//!
//! Every test gets its own temporary directory, so no external services are
//! needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use imex_storefront::catalog::Catalog;
use imex_storefront::config::StorefrontConfig;
use imex_storefront::engine::{Engine, EngineSettings};
use imex_storefront::notify::NotificationLog;
use imex_storefront::render::FragmentBuffer;
use imex_storefront::routes;
use imex_storefront::state::AppState;
use imex_storefront::store::{FileStore, StoreAdapter};
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Engine with a full fragment buffer and a notification log.
pub type TestEngine = Engine<FragmentBuffer, NotificationLog>;

/// Per-test scratch space holding the store file.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a fresh context.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Location of the store file.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("store.json")
    }

    /// The scratch directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Configuration pointing at this context's store, with no inquiry delay.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            store_path: self.store_path(),
            inquiry_delay: Duration::ZERO,
            ..StorefrontConfig::default()
        }
    }

    /// Boot an engine on the store file, as a fresh process would.
    #[must_use]
    pub fn boot(&self) -> TestEngine {
        self.boot_with(EngineSettings::default())
    }

    /// Boot an engine with explicit settings.
    #[must_use]
    pub fn boot_with(&self, settings: EngineSettings) -> TestEngine {
        Engine::boot(
            settings,
            Catalog::builtin(),
            StoreAdapter::new(FileStore::open(self.store_path())),
            FragmentBuffer::all(),
            NotificationLog::new(),
        )
    }

    /// Serve the storefront on an ephemeral local port.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn serve(&self) -> io::Result<TestServer> {
        let config = self.config();
        let store = FileStore::open(&config.store_path);
        let state = AppState::new(config, store);
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, routes::app(state))
                .await
                .inspect_err(|e| tracing::error!(error = %e, %addr, "Test server stopped"))
        });

        Ok(TestServer {
            base_url: format!("http://{addr}"),
            handle,
        })
    }
}

/// A running storefront. Stopped on drop.
pub struct TestServer {
    base_url: String,
    handle: JoinHandle<io::Result<()>>,
}

impl TestServer {
    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Whether the server task is still accepting connections.
    ///
    /// A serve loop that returned an error has finished, so this turns
    /// false and the error is logged.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
