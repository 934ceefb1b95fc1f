//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /catalog?filter=        - Filtered catalog grid (fragment)
//! GET  /catalog/{id}           - Product viewer with spec blocks (fragment)
//! GET  /blueprint/{tab}        - Blueprint tab content (fragment)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Line items with out-of-band counter and totals
//! POST /cart/add               - Add one unit
//! POST /cart/update            - Change quantity by delta
//! POST /cart/remove            - Remove line
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Locale
//! POST /lang                   - Switch language (responds with HX-Refresh)
//!
//! # Inquiry
//! POST /inquiry                - Submit technical inquiry (JSON response)
//! POST /inquiry/hint           - Live hint for the description field (fragment)
//! ```
//!
//! Pending notifications are attached to responses as an `HX-Trigger`
//! header carrying an `imex:toast` event. Every visitor is identified by the
//! session cookie and sees only their own inquiry list and language.

pub mod blueprint;
pub mod cart;
pub mod catalog;
pub mod home;
pub mod inquiry;
pub mod locale;

use axum::{
    Router,
    http::HeaderValue,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::notify::Notification;
use crate::session::create_session_layer;
use crate::state::{AppState, WebEngine};

/// Client-side event name for toast notifications.
pub const TOAST_EVENT: &str = "imex:toast";

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog grid and product viewer
        .route("/catalog", get(catalog::grid))
        .route("/catalog/{id}", get(catalog::detail))
        .route("/blueprint/{tab}", get(blueprint::sheet))
        // Cart routes
        .nest("/cart", cart_routes())
        // Locale switch
        .route("/lang", post(locale::set_lang))
        // Inquiry submission
        .route("/inquiry", post(inquiry::submit))
        .route("/inquiry/hint", post(inquiry::hint))
}

/// Build the full application.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.store().clone(), state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(session_layer)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Drain the engine's notifications into an `HX-Trigger` header on `body`.
pub(crate) fn with_toasts(engine: &mut WebEngine, body: impl IntoResponse) -> Response {
    let mut response = body.into_response();
    let notifications = engine.notifier_mut().drain();
    if notifications.is_empty() {
        return response;
    }

    match toast_header(&notifications) {
        Some(value) => {
            response.headers_mut().insert("HX-Trigger", value);
        }
        None => tracing::warn!(count = notifications.len(), "Dropping undeliverable notifications"),
    }
    response
}

/// Encode notifications as an `HX-Trigger` value.
///
/// Header values must be visible ASCII, so non-ASCII characters are sent as
/// JSON `\u` escapes.
fn toast_header(notifications: &[Notification]) -> Option<HeaderValue> {
    let payload = json!({ TOAST_EVENT: notifications }).to_string();
    HeaderValue::from_str(&escape_non_ascii(&payload)).ok()
}

fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}
