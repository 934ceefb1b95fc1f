//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use imex_core::{Category, Locale};
use tower_sessions::Session;
use tracing::instrument;

use super::cart::CartFragmentsTemplate;
use super::catalog::{CatalogCardView, catalog_cards};
use crate::blueprint::{BlueprintSheet, BlueprintTab};
use crate::error::Result;
use crate::filter::CategoryFilter;
use crate::i18n::Strings;
use crate::state::AppState;

/// Locale switcher entry.
#[derive(Debug, Clone, Copy)]
pub struct LocaleOption {
    pub tag: &'static str,
    pub active: bool,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub t: &'static Strings,
    pub lang: &'static str,
    pub locales: Vec<LocaleOption>,
    pub categories: [&'static str; 3],
    pub cards: Vec<CatalogCardView>,
    pub filter: String,
    pub drawer: CartFragmentsTemplate,
    pub tabs: [&'static str; 3],
    /// Blueprint tab shown before any tab is clicked.
    pub tab: BlueprintTab,
    pub sheet: BlueprintSheet,
}

/// Display home page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let engine = state.visitor_engine(&session).await?;
    let filter = CategoryFilter::All;
    let current = engine.locale();

    Ok(HomeTemplate {
        t: Strings::for_locale(current),
        lang: current.tag(),
        locales: Locale::ALL
            .into_iter()
            .map(|locale| LocaleOption {
                tag: locale.tag(),
                active: locale == current,
            })
            .collect(),
        categories: Category::ALL.map(Category::slug),
        cards: catalog_cards(&engine, &filter),
        filter: filter.as_str().to_owned(),
        drawer: CartFragmentsTemplate::from_display(&engine),
        tabs: BlueprintTab::ALL.map(BlueprintTab::slug),
        tab: BlueprintTab::default(),
        sheet: BlueprintTab::default().sheet(),
    })
}
