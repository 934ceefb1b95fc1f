//! Technical reference content for the product viewer.
//!
//! Product detail views show [`SPEC_BLOCKS`]; the blueprint section has one
//! [`BlueprintSheet`] per [`BlueprintTab`]. All of it is compiled in.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A labelled technical property shown in the product viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecBlock {
    pub label: &'static str,
    pub value: &'static str,
}

/// Material properties listed for every product.
pub const SPEC_BLOCKS: [SpecBlock; 2] = [
    SpecBlock {
        label: "Chemical Composition",
        value: "C: 0.17-0.24% | Si: 0.17-0.37% | Mn: 0.35-0.65%",
    },
    SpecBlock {
        label: "Mechanical Properties",
        value: "Tensile Strength: 410 MPa | Yield Point: 245 MPa",
    },
];

/// Blueprint section tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlueprintTab {
    #[default]
    Tolerances,
    Chemistry,
    Mechanics,
}

/// Error for an unrecognized tab name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown blueprint tab: {0}")]
pub struct UnknownTab(pub String);

/// Description and feature list shown under a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlueprintSheet {
    pub description: &'static str,
    pub features: &'static [&'static str],
}

impl BlueprintTab {
    /// All tabs in display order.
    pub const ALL: [Self; 3] = [Self::Tolerances, Self::Chemistry, Self::Mechanics];

    /// Identifier used in URLs.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Tolerances => "tolerances",
            Self::Chemistry => "chemistry",
            Self::Mechanics => "mechanics",
        }
    }

    /// Content for this tab.
    #[must_use]
    pub const fn sheet(self) -> BlueprintSheet {
        match self {
            Self::Tolerances => BlueprintSheet {
                description: "Our products undergo strict ultrasonic testing (UT). Tolerance limits: ±0.05mm for high-precision alloys.",
                features: &["Zero Defect Policy", "ISO 9001:2026", "Hydrostatic Tests"],
            },
            Self::Chemistry => BlueprintSheet {
                description: "Full heat traceability. Each batch is verified for Carbon, Silicon, and Manganese levels according to EN 10210.",
                features: &[
                    "Batch Certification",
                    "Spectrometric Analysis",
                    "Heat Number Tracking",
                ],
            },
            Self::Mechanics => BlueprintSheet {
                description: "Tensile and Yield strength verification in certified labs. Impact testing at -40°C available.",
                features: &[
                    "Tensile Strength: 410-550 MPa",
                    "Elongation: >22%",
                    "SGS Inspection Ready",
                ],
            },
        }
    }
}

impl fmt::Display for BlueprintTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for BlueprintTab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.slug() == s.trim())
            .ok_or_else(|| UnknownTab(s.to_owned()))
    }
}
