//! Render projector.
//!
//! Rendering is split in two steps:
//!
//! 1. [`CartView::project`] is a pure projection of cart state into display
//!    strings (counter, per-line views, formatted totals, empty state).
//! 2. [`render_cart`] writes that view to the mount points of a
//!    [`DisplaySurface`]. Mounts the surface does not have are skipped, so a
//!    [`Headless`] surface turns rendering into a no-op.
//!
//! The engine re-runs both steps after every mutation and once at startup.

use std::collections::HashMap;

use askama::Template;
use imex_core::{CurrencyCode, Locale, Price};

use crate::cart::{Cart, LineItem};
use crate::i18n::Strings;

/// Named display slot written by the projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountPoint {
    /// Badge showing the sum of quantities.
    Counter,
    /// Line-item list container.
    Items,
    /// Formatted total price.
    TotalPrice,
    /// Formatted total weight.
    TotalWeight,
}

impl MountPoint {
    /// All mount points, in write order.
    pub const ALL: [Self; 4] = [Self::Counter, Self::Items, Self::TotalPrice, Self::TotalWeight];

    /// DOM element id the fragment is swapped into.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::Counter => "cart-counter",
            Self::Items => "cart-items-mount",
            Self::TotalPrice => "total-price",
            Self::TotalWeight => "total-weight",
        }
    }
}

/// A display target with zero or more mount points.
pub trait DisplaySurface: Send {
    /// Whether the surface has a slot for `point`.
    fn has_mount(&self, point: MountPoint) -> bool;

    /// Replace the content of `point`.
    fn write(&mut self, point: MountPoint, content: String);
}

/// Surface without any mount points.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl DisplaySurface for Headless {
    fn has_mount(&self, _point: MountPoint) -> bool {
        false
    }

    fn write(&mut self, _point: MountPoint, _content: String) {}
}

/// Surface that keeps the latest fragment written to each mount.
#[derive(Debug, Clone)]
pub struct FragmentBuffer {
    mounts: Vec<MountPoint>,
    fragments: HashMap<MountPoint, String>,
}

impl FragmentBuffer {
    /// A buffer with every mount point.
    #[must_use]
    pub fn all() -> Self {
        Self::with_mounts(MountPoint::ALL)
    }

    /// A buffer with only the given mount points.
    #[must_use]
    pub fn with_mounts(mounts: impl IntoIterator<Item = MountPoint>) -> Self {
        Self {
            mounts: mounts.into_iter().collect(),
            fragments: HashMap::new(),
        }
    }

    /// The latest fragment written to `point`.
    #[must_use]
    pub fn fragment(&self, point: MountPoint) -> Option<&str> {
        self.fragments.get(&point).map(String::as_str)
    }
}

impl DisplaySurface for FragmentBuffer {
    fn has_mount(&self, point: MountPoint) -> bool {
        self.mounts.contains(&point)
    }

    fn write(&mut self, point: MountPoint, content: String) {
        self.fragments.insert(point, content);
    }
}

/// Formatting inputs for a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub locale: Locale,
    pub currency: CurrencyCode,
}

/// Display data for one line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub category: Option<&'static str>,
    pub quantity: u32,
    /// Unit weight as a bare number, e.g. `12.5`.
    pub unit_weight: String,
    pub unit_price: String,
    pub line_price: String,
}

impl CartItemView {
    fn project(item: &LineItem, ctx: &RenderContext) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            category: item.category.map(|c| c.slug()),
            quantity: item.qty,
            unit_weight: item.weight_per_unit.normalize().to_string(),
            unit_price: Price::new(item.price, ctx.currency).localized(ctx.locale),
            line_price: Price::new(item.line_price(), ctx.currency).localized(ctx.locale),
        }
    }
}

/// Display data for the whole inquiry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Sum of quantities.
    pub item_count: u64,
    /// Locale-formatted total price with currency code.
    pub total_price: String,
    /// Total weight with two decimals, e.g. `25.00 kg`.
    pub total_weight: String,
    /// Localized message shown when there are no items.
    pub empty_message: &'static str,
}

impl CartView {
    /// Project cart state into display strings.
    #[must_use]
    pub fn project(cart: &Cart, ctx: &RenderContext) -> Self {
        let totals = cart.totals();
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView::project(item, ctx))
                .collect(),
            item_count: cart.item_count(),
            total_price: Price::new(totals.price, ctx.currency).localized(ctx.locale),
            total_weight: totals.weight.to_string(),
            empty_message: Strings::for_locale(ctx.locale).cart_empty,
        }
    }

    /// Whether the projection is of an empty cart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// HTML for the line-item list (or its empty state).
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
}

/// Plain-text summary of the inquiry list.
#[derive(Template)]
#[template(path = "cart/summary.txt")]
pub struct CartSummaryText<'a> {
    pub cart: &'a CartView,
}

/// Write `view` to every mount point `surface` has.
pub fn render_cart<D: DisplaySurface + ?Sized>(view: &CartView, surface: &mut D) {
    for point in MountPoint::ALL {
        if !surface.has_mount(point) {
            continue;
        }
        let content = match point {
            MountPoint::Counter => view.item_count.to_string(),
            MountPoint::Items => match (CartItemsTemplate { cart: view }).render() {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to render cart items");
                    continue;
                }
            },
            MountPoint::TotalPrice => view.total_price.clone(),
            MountPoint::TotalWeight => view.total_weight.clone(),
        };
        surface.write(point, content);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use imex_core::ProductId;

    use super::*;
    use crate::catalog::Catalog;

    const EN_UZS: RenderContext = RenderContext {
        locale: Locale::En,
        currency: CurrencyCode::UZS,
    };

    fn cart_with(ids: &[&str]) -> Cart {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        for id in ids {
            let id = ProductId::from(*id);
            cart.add(&id, &catalog.find_or_sentinel(&id));
        }
        cart
    }

    #[test]
    fn test_project_totals_and_counter() {
        let view = CartView::project(&cart_with(&["PX-001", "PX-001", "BM-442"]), &EN_UZS);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.total_price, "12,700,000 UZS");
        assert_eq!(view.total_weight, "70.00 kg");
        assert_eq!(view.items.len(), 2);

        let pipe = &view.items[0];
        assert_eq!(pipe.quantity, 2);
        assert_eq!(pipe.unit_weight, "12.5");
        assert_eq!(pipe.unit_price, "1,450,000 UZS");
        assert_eq!(pipe.line_price, "2,900,000 UZS");
        assert_eq!(pipe.category, Some("pipes"));
    }

    #[test]
    fn test_project_empty_is_localized() {
        let view = CartView::project(
            &Cart::new(),
            &RenderContext {
                locale: Locale::Ru,
                currency: CurrencyCode::UZS,
            },
        );
        assert!(view.is_empty());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.total_price, "0 UZS");
        assert_eq!(view.total_weight, "0.00 kg");
        assert_eq!(view.empty_message, "Ваш список заказа пуст.");
    }

    #[test]
    fn test_projection_is_idempotent() {
        let cart = cart_with(&["VL-099", "NON-EXISTENT"]);
        assert_eq!(
            CartView::project(&cart, &EN_UZS),
            CartView::project(&cart, &EN_UZS)
        );
    }

    #[test]
    fn test_render_to_full_buffer() {
        let view = CartView::project(&cart_with(&["VL-099"]), &EN_UZS);
        let mut buffer = FragmentBuffer::all();
        render_cart(&view, &mut buffer);

        assert_eq!(buffer.fragment(MountPoint::Counter), Some("1"));
        assert_eq!(buffer.fragment(MountPoint::TotalPrice), Some("3,250,000 UZS"));
        assert_eq!(buffer.fragment(MountPoint::TotalWeight), Some("8.20 kg"));

        let items = buffer.fragment(MountPoint::Items).unwrap();
        assert!(items.contains("Ball Valve PN40"));
        assert!(items.contains("SKU: VL-099 | 8.2 kg/u"));
        assert!(items.contains("value=\"1\""));
    }

    #[test]
    fn test_render_empty_state() {
        let view = CartView::project(&Cart::new(), &EN_UZS);
        let mut buffer = FragmentBuffer::all();
        render_cart(&view, &mut buffer);

        let items = buffer.fragment(MountPoint::Items).unwrap();
        assert!(items.contains("empty-state"));
        assert!(items.contains("Your industrial inquiry list is empty."));
    }

    #[test]
    fn test_render_escapes_names() {
        let id = ProductId::from("X-1");
        let mut cart = Cart::new();
        let mut entry = Catalog::builtin().find_or_sentinel(&id);
        entry.name = "<script>alert(1)</script>".to_owned();
        cart.add(&id, &entry);

        let mut buffer = FragmentBuffer::with_mounts([MountPoint::Items]);
        render_cart(&CartView::project(&cart, &EN_UZS), &mut buffer);
        let items = buffer.fragment(MountPoint::Items).unwrap();
        assert!(!items.contains("<script>"));
    }

    #[test]
    fn test_missing_mounts_are_skipped() {
        let view = CartView::project(&cart_with(&["PX-001"]), &EN_UZS);

        let mut partial = FragmentBuffer::with_mounts([MountPoint::Counter]);
        render_cart(&view, &mut partial);
        assert_eq!(partial.fragment(MountPoint::Counter), Some("1"));
        assert_eq!(partial.fragment(MountPoint::Items), None);
        assert_eq!(partial.fragment(MountPoint::TotalPrice), None);

        render_cart(&view, &mut Headless);
    }

    #[test]
    fn test_summary_text() {
        let view = CartView::project(&cart_with(&["BM-442"]), &EN_UZS);
        let text = CartSummaryText { cart: &view }.render().unwrap();
        assert!(text.contains("BM-442"));
        assert!(text.contains("9,800,000 UZS"));
        assert!(text.contains("45.00 kg"));
    }
}
