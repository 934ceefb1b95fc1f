//! Inquiry list commands.
//!
//! # Usage
//!
//! ```bash
//! imex cart add PX-001
//! imex cart qty PX-001 3
//! imex cart remove PX-001
//! imex cart show
//! ```

use askama::Template;
use imex_core::ProductId;
use imex_storefront::render::CartSummaryText;

use super::{CliEngine, CommandError};

/// Add one unit of `id`.
///
/// # Errors
///
/// Returns `CommandError::Engine` if the id is unknown and unknown products
/// are rejected.
pub fn add(engine: &mut CliEngine, id: &str) -> Result<(), CommandError> {
    engine.add(&ProductId::from(id))?;
    report_totals(engine);
    Ok(())
}

/// Remove the line for `id`.
pub fn remove(engine: &mut CliEngine, id: &str) {
    if engine.remove(&ProductId::from(id)) {
        tracing::info!("Removed {id}");
    } else {
        tracing::info!("{id} is not in the inquiry list");
    }
    report_totals(engine);
}

/// Change the quantity of `id` by `delta`.
pub fn adjust(engine: &mut CliEngine, id: &str, delta: i64) {
    match engine.adjust_quantity(&ProductId::from(id), delta) {
        Some(qty) => tracing::info!("{id} quantity is now {qty}"),
        None => tracing::info!("{id} is not in the inquiry list"),
    }
    report_totals(engine);
}

/// Print lines and totals.
///
/// # Errors
///
/// Returns `CommandError::Render` if the summary cannot be rendered.
pub fn show(engine: &CliEngine) -> Result<(), CommandError> {
    let view = engine.view();
    let summary = CartSummaryText { cart: &view }.render()?;
    tracing::info!("\n{}", summary.trim_end());
    Ok(())
}

fn report_totals(engine: &CliEngine) {
    let view = engine.view();
    tracing::info!(
        "{} item(s), {}, {}",
        view.item_count,
        view.total_price,
        view.total_weight
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use super::*;
    use crate::commands::tests::engine_at;

    #[test]
    fn test_commands_persist_between_runs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        add(&mut engine_at(&path), "PX-001").unwrap();
        add(&mut engine_at(&path), "PX-001").unwrap();
        adjust(&mut engine_at(&path), "PX-001", -1);
        add(&mut engine_at(&path), "VL-099").unwrap();
        remove(&mut engine_at(&path), "VL-099");

        let engine = engine_at(&path);
        assert_eq!(engine.cart().item_count(), 1);
        assert_eq!(engine.totals().price, Decimal::from(1_450_000));
        show(&engine).unwrap();
    }
}
