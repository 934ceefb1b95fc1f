//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation responds with the line-item fragment for
//! `#cart-items-mount` plus out-of-band swaps for the counter and totals,
//! taken from the engine's fragment buffer after the render cycle.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Response};
use imex_core::ProductId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::with_toasts;
use crate::error::Result;
use crate::render::MountPoint;
use crate::state::{AppState, WebEngine};

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

/// Line items plus out-of-band counter and totals (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_update.html")]
pub struct CartFragmentsTemplate {
    pub items: String,
    pub counter: String,
    pub total_price: String,
    pub total_weight: String,
}

impl CartFragmentsTemplate {
    /// Collect the fragments last written to the engine's display.
    #[must_use]
    pub fn from_display(engine: &WebEngine) -> Self {
        let fragment = |point: MountPoint| {
            engine
                .display()
                .fragment(point)
                .unwrap_or_default()
                .to_owned()
        };
        Self {
            items: fragment(MountPoint::Items),
            counter: fragment(MountPoint::Counter),
            total_price: fragment(MountPoint::TotalPrice),
            total_weight: fragment(MountPoint::TotalWeight),
        }
    }
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

fn fragments(engine: &mut WebEngine) -> Response {
    let body = CartFragmentsTemplate::from_display(engine);
    with_toasts(engine, body)
}

/// Display the cart drawer contents.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let mut engine = state.visitor_engine(&session).await?;
    Ok(fragments(&mut engine))
}

/// Add one unit of a product (HTMX).
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let mut engine = state.visitor_engine(&session).await?;
    engine.add(&ProductId::from(form.id))?;
    Ok(fragments(&mut engine))
}

/// Change a line's quantity by `delta` (HTMX).
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let mut engine = state.visitor_engine(&session).await?;
    if engine
        .adjust_quantity(&ProductId::from(form.id), form.delta)
        .is_none()
    {
        tracing::debug!("Quantity change for an item not in the cart");
    }
    Ok(fragments(&mut engine))
}

/// Remove a line (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut engine = state.visitor_engine(&session).await?;
    engine.remove(&ProductId::from(form.id));
    Ok(fragments(&mut engine))
}

/// Get cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<CartCountTemplate> {
    let count = state.visitor_engine(&session).await?.cart().item_count();
    Ok(CartCountTemplate { count })
}
