//! Density profiles and absorption model
//!
//! All density profiles implement the [`DensityProfile`](crate::physics::DensityProfile)
//! trait, the absorption model implements
//! [`AbsorptionModel`](crate::physics::AbsorptionModel). The engine calls the
//! profiles at every line-of-sight sample and the absorption model once per
//! species. Models own the physics; geometry and integration live in the
//! engine.
//!
//! # Available Profiles
//!
//! | Scenario      | Profile            | Coordinate              | `chi` means        |
//! |---------------|--------------------|-------------------------|--------------------|
//! | `barometric`  | [`Barometric`]     | distance from planet    | mixing ratio       |
//! | `hydrostatic` | [`Hydrostatic`]    | distance from planet    | mixing ratio       |
//! | `escaping`    | [`Escaping`]       | distance from planet    | number of absorbers|
//! | `exomoon`     | [`MoonExosphere`]  | distance from moon      | number of absorbers|
//! | `torus`       | [`Torus`]          | torus (a, z)            | number of absorbers|

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod absorption;
pub mod atmosphere;
pub mod exosphere;
pub mod torus;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use absorption::VoigtAbsorption;
pub use atmosphere::{Barometric, Hydrostatic};
pub use exosphere::{Escaping, MoonExosphere};
pub use torus::Torus;

use std::fmt;

/// Named physical regime for the spatial distribution of absorbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    Barometric,
    Hydrostatic,
    Escaping,
    Exomoon,
    Torus,
}

impl ScenarioKind {
    /// All scenario kinds, in setup-file order
    pub const ALL: [ScenarioKind; 5] = [
        ScenarioKind::Barometric,
        ScenarioKind::Hydrostatic,
        ScenarioKind::Escaping,
        ScenarioKind::Exomoon,
        ScenarioKind::Torus,
    ];

    /// Name used in the setup file
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Barometric => "barometric",
            ScenarioKind::Hydrostatic => "hydrostatic",
            ScenarioKind::Escaping => "escaping",
            ScenarioKind::Exomoon => "exomoon",
            ScenarioKind::Torus => "torus",
        }
    }

    /// Parse a setup-file name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether the absorbers are bound to the rotating planet
    pub fn is_atmospheric(&self) -> bool {
        matches!(
            self,
            ScenarioKind::Barometric | ScenarioKind::Hydrostatic | ScenarioKind::Escaping
        )
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for kind in ScenarioKind::ALL {
            assert_eq!(ScenarioKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ScenarioKind::from_name("ionosphere"), None);
    }

    #[test]
    fn test_atmospheric_kinds() {
        assert!(ScenarioKind::Escaping.is_atmospheric());
        assert!(!ScenarioKind::Exomoon.is_atmospheric());
        assert!(!ScenarioKind::Torus.is_atmospheric());
    }
}
