//! Catalog commands.

use imex_core::{Price, Weight};
use imex_storefront::filter::CategoryFilter;

use super::CliEngine;

/// List catalog entries matching `filter`.
pub fn list(engine: &CliEngine, filter: &str) {
    let filter = CategoryFilter::parse(filter);
    let ctx = engine.render_context();
    let entries = engine.catalog().filtered(&filter);

    if entries.is_empty() {
        tracing::info!("No products match filter '{}'", filter.as_str());
        return;
    }

    for (id, entry) in entries {
        tracing::info!(
            "{id}  {}  [{}]  {}  {}",
            entry.name,
            entry.category.map_or("-", |c| c.slug()),
            Price::new(entry.price, ctx.currency).localized(ctx.locale),
            Weight::from_kilograms(entry.weight)
        );
    }
}
