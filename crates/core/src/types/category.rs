//! Product categories used by the catalog filter.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned for an unrecognized category name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown product category: {0}")]
pub struct CategoryError(pub String);

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Seamless and welded pipes.
    Pipes,
    /// Beams, channels and other structural steel.
    Structural,
    /// Valves, fittings and technical equipment.
    Tech,
}

impl Category {
    /// All categories, in filter-bar order.
    pub const ALL: [Self; 3] = [Self::Pipes, Self::Structural, Self::Tech];

    /// Lowercase slug used in filter queries and persisted carts.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Pipes => "pipes",
            Self::Structural => "structural",
            Self::Tech => "tech",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pipes" => Ok(Self::Pipes),
            "structural" => Ok(Self::Structural),
            "tech" => Ok(Self::Tech),
            _ => Err(CategoryError(s.to_owned())),
        }
    }
}
