//! Catalog category filter.

use imex_core::Category;

/// Filter applied to the catalog grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Show every entry.
    #[default]
    All,
    /// Show entries in one category.
    Only(Category),
    /// A filter value that names no category; matches nothing.
    Unmatched(String),
}

impl CategoryFilter {
    /// Parse a filter pill value (`all`, `pipes`, `structural`, `tech`).
    ///
    /// Unknown values do not fall back to `All`; they hide every card.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value == "all" {
            return Self::All;
        }
        value
            .parse::<Category>()
            .map_or_else(|_| Self::Unmatched(value.to_owned()), Self::Only)
    }

    /// Whether an entry with `category` passes the filter.
    #[must_use]
    pub fn matches(&self, category: Option<Category>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => category == Some(*wanted),
            Self::Unmatched(_) => false,
        }
    }

    /// The pill value this filter was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.slug(),
            Self::Unmatched(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use imex_core::ProductId;

    use super::*;
    use crate::catalog::Catalog;

    fn ids(filter: &CategoryFilter) -> Vec<String> {
        Catalog::builtin()
            .filtered(filter)
            .into_iter()
            .map(|(id, _)| id.to_string())
            .collect()
    }

    #[test]
    fn test_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse(" tech "),
            CategoryFilter::Only(Category::Tech)
        );
        assert_eq!(
            CategoryFilter::parse("furniture"),
            CategoryFilter::Unmatched("furniture".to_owned())
        );
    }

    #[test]
    fn test_all_keeps_catalog_order() {
        assert_eq!(ids(&CategoryFilter::All), ["PX-001", "BM-442", "VL-099"]);
    }

    #[test]
    fn test_single_category() {
        assert_eq!(ids(&CategoryFilter::parse("structural")), ["BM-442"]);
        assert_eq!(ids(&CategoryFilter::parse("pipes")), ["PX-001"]);
    }

    #[test]
    fn test_unmatched_hides_everything() {
        assert!(ids(&CategoryFilter::parse("furniture")).is_empty());
    }

    #[test]
    fn test_sentinel_only_passes_all() {
        let sentinel = Catalog::builtin().find_or_sentinel(&ProductId::from("??"));
        assert!(CategoryFilter::All.matches(sentinel.category));
        assert!(!CategoryFilter::Only(Category::Pipes).matches(sentinel.category));
    }
}
