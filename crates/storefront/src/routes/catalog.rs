//! Catalog grid and product viewer route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use imex_core::{Price, ProductId, Weight};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::blueprint::{SPEC_BLOCKS, SpecBlock};
use crate::engine::EngineError;
use crate::error::Result;
use crate::filter::CategoryFilter;
use crate::state::{AppState, WebEngine};

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct CatalogCardView {
    pub id: String,
    pub name: String,
    pub category: &'static str,
    pub price: String,
    pub weight: String,
}

/// Cards for every catalog entry matching `filter`, in display order.
#[must_use]
pub fn catalog_cards(engine: &WebEngine, filter: &CategoryFilter) -> Vec<CatalogCardView> {
    let ctx = engine.render_context();
    engine
        .catalog()
        .filtered(filter)
        .into_iter()
        .map(|(id, entry)| CatalogCardView {
            id: id.to_string(),
            name: entry.name.clone(),
            category: entry.category.map_or("", |c| c.slug()),
            price: Price::new(entry.price, ctx.currency).localized(ctx.locale),
            weight: Weight::from_kilograms(entry.weight).to_string(),
        })
        .collect()
}

/// Catalog query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub filter: Option<String>,
}

/// Catalog grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/catalog_grid.html")]
pub struct CatalogGridTemplate {
    pub cards: Vec<CatalogCardView>,
    pub filter: String,
}

/// Product viewer fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_detail.html")]
pub struct ProductDetailTemplate {
    pub id: String,
    pub name: String,
    /// Upper-case category tag; empty for the sentinel entry.
    pub tag: String,
    pub price: String,
    pub weight: String,
    pub specs: &'static [SpecBlock],
    /// Quantity already on the visitor's inquiry list.
    pub in_cart: u32,
}

/// Filtered catalog grid.
///
/// A missing filter shows everything; an unknown one shows nothing.
#[instrument(skip(state, session))]
pub async fn grid(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> Result<CatalogGridTemplate> {
    let filter = query
        .filter
        .as_deref()
        .map_or(CategoryFilter::All, CategoryFilter::parse);
    let engine = state.visitor_engine(&session).await?;
    Ok(CatalogGridTemplate {
        cards: catalog_cards(&engine, &filter),
        filter: filter.as_str().to_owned(),
    })
}

/// Product viewer with material properties and an add button.
///
/// Unknown ids show the sentinel entry, or 404 under the reject policy.
#[instrument(skip(state, session))]
pub async fn detail(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<ProductDetailTemplate> {
    let engine = state.visitor_engine(&session).await?;
    let id = ProductId::from(id);
    let entry = engine
        .catalog()
        .resolve(&id, engine.settings().unknown_products)
        .map_err(EngineError::from)?;
    let ctx = engine.render_context();

    Ok(ProductDetailTemplate {
        name: entry.name,
        tag: entry
            .category
            .map(|c| c.slug().to_uppercase())
            .unwrap_or_default(),
        price: Price::new(entry.price, ctx.currency).localized(ctx.locale),
        weight: Weight::from_kilograms(entry.weight).to_string(),
        specs: &SPEC_BLOCKS,
        in_cart: engine.cart().get(&id).map_or(0, |line| line.qty),
        id: id.to_string(),
    })
}
