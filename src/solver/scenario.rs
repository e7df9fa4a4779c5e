//! Absorbing scenario definition
//!
//! A scenario combines a density profile with the species it hosts:
//! - Density profile (where the absorbers are)
//! - Species (what absorbs, with mixing ratio or count and temperature)
//! - Rayleigh scattering switch
//!
//! Scenarios are a tagged union over the five physical regimes so that the
//! hot loop dispatches with a `match`, not a string lookup.

use nalgebra::DVector;

use crate::geometry::BodyFrame;
use crate::models::{Barometric, Escaping, Hydrostatic, MoonExosphere, ScenarioKind, Torus};
use crate::physics::{AbsorptionModel, DensityProfile, LineParameters, SampleCoordinates};

/// Absorbing species hosted by a scenario
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    /// Species name, matched against the line catalogue (e.g. `"sodium"`)
    pub name: String,
    /// Mixing ratio (bound atmospheres) or number of absorbers (exospheres, torus)
    pub chi: f64,
    /// Absorption temperature \[K\]
    pub temperature: f64,
}

impl Species {
    pub fn new(name: impl Into<String>, chi: f64, temperature: f64) -> Self {
        Self {
            name: name.into(),
            chi,
            temperature,
        }
    }
}

/// Density profile of one scenario, with its parameter payload
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioProfile {
    Barometric(Barometric),
    Hydrostatic(Hydrostatic),
    Escaping(Escaping),
    Exomoon(MoonExosphere),
    Torus(Torus),
}

impl ScenarioProfile {
    /// Scenario kind of this profile
    pub fn kind(&self) -> ScenarioKind {
        match self {
            ScenarioProfile::Barometric(_) => ScenarioKind::Barometric,
            ScenarioProfile::Hydrostatic(_) => ScenarioKind::Hydrostatic,
            ScenarioProfile::Escaping(_) => ScenarioKind::Escaping,
            ScenarioProfile::Exomoon(_) => ScenarioKind::Exomoon,
            ScenarioProfile::Torus(_) => ScenarioKind::Torus,
        }
    }

    /// Coordinate of a Cartesian chord-frame sample in the scenario's geometry
    ///
    /// `None` for the exomoon scenario when the frame carries no moon.
    #[inline]
    pub fn coordinates(&self, frame: &BodyFrame, x: f64, y: f64, z: f64) -> Option<SampleCoordinates> {
        match self {
            ScenarioProfile::Barometric(_) | ScenarioProfile::Hydrostatic(_) | ScenarioProfile::Escaping(_) => {
                Some(SampleCoordinates::Radial(frame.distance_from_planet(x, y, z)))
            }
            ScenarioProfile::Exomoon(_) => frame.distance_from_moon(x, y, z).map(SampleCoordinates::Radial),
            ScenarioProfile::Torus(_) => {
                let (a, z) = frame.torus_coordinates(x, y, z);
                Some(SampleCoordinates::Torus { a, z })
            }
        }
    }
}

impl DensityProfile for ScenarioProfile {
    #[inline]
    fn number_density(&self, coords: SampleCoordinates) -> f64 {
        match self {
            ScenarioProfile::Barometric(profile) => profile.number_density(coords),
            ScenarioProfile::Hydrostatic(profile) => profile.number_density(coords),
            ScenarioProfile::Escaping(profile) => profile.number_density(coords),
            ScenarioProfile::Exomoon(profile) => profile.number_density(coords),
            ScenarioProfile::Torus(profile) => profile.number_density(coords),
        }
    }

    fn name(&self) -> &str {
        self.kind().name()
    }

    fn description(&self) -> Option<&str> {
        match self {
            ScenarioProfile::Barometric(profile) => profile.description(),
            ScenarioProfile::Hydrostatic(profile) => profile.description(),
            ScenarioProfile::Escaping(profile) => profile.description(),
            ScenarioProfile::Exomoon(profile) => profile.description(),
            ScenarioProfile::Torus(profile) => profile.description(),
        }
    }
}

/// Absorbing scenario
///
/// # Design
///
/// The optical depths of all scenarios of a run add; each scenario
/// contributes `σ(λ)·N` where `N` is its column density along a chord and
/// `σ` the summed cross section of its species.
///
/// # Examples
///
/// ```rust
/// use transit_rs::models::Escaping;
/// use transit_rs::solver::{Scenario, ScenarioProfile, Species};
///
/// let profile = ScenarioProfile::Escaping(Escaping::new(5.0, 7e9).unwrap());
/// let scenario = Scenario::new(profile, vec![Species::new("sodium", 1e34, 1000.0)]);
/// assert_eq!(scenario.kind().name(), "escaping");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub profile: ScenarioProfile,
    pub species: Vec<Species>,
    pub rayleigh_scattering: bool,
}

impl Scenario {
    /// Create a scenario without Rayleigh scattering
    pub fn new(profile: ScenarioProfile, species: Vec<Species>) -> Self {
        Self {
            profile,
            species,
            rayleigh_scattering: false,
        }
    }

    /// Builder pattern: switch Rayleigh scattering on or off
    pub fn with_rayleigh_scattering(mut self, enabled: bool) -> Self {
        self.rayleigh_scattering = enabled;
        self
    }

    /// Get scenario kind
    pub fn kind(&self) -> ScenarioKind {
        self.profile.kind()
    }

    /// Total cross section per absorber of this scenario \[cm²\]
    ///
    /// Sum of the species' line cross sections, plus Rayleigh scattering
    /// when switched on.
    pub fn cross_section(
        &self,
        model: &dyn AbsorptionModel,
        wavelengths: &DVector<f64>,
        lines: &[LineParameters],
    ) -> DVector<f64> {
        let mut sigma = DVector::zeros(wavelengths.len());

        for species in &self.species {
            sigma += model.absorption_cross_section(
                wavelengths,
                species.chi,
                species.temperature,
                &species.name,
                lines,
            );
        }

        if self.rayleigh_scattering {
            sigma += model.rayleigh_scattering(wavelengths);
        }

        sigma
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VoigtAbsorption;
    use crate::physics::constants::{catalogue_line, M_JUPITER, R_JUPITER};

    fn create_frame(moon: Option<(f64, f64)>) -> BodyFrame {
        BodyFrame {
            x_p: 5e11,
            y_p: 0.0,
            moon,
            r_0: R_JUPITER,
            r_moon: 1e8,
        }
    }

    #[test]
    fn test_scenario_creation() {
        let profile = ScenarioProfile::Torus(Torus::new(1e10, 2e5, M_JUPITER).unwrap());
        let scenario = Scenario::new(profile, vec![Species::new("sodium", 1e33, 1000.0)]);
        assert_eq!(scenario.kind(), ScenarioKind::Torus);
        assert!(!scenario.rayleigh_scattering);
        assert_eq!(scenario.profile.name(), "torus");
    }

    #[test]
    fn test_coordinates_per_kind() {
        let frame = create_frame(Some((3e10, 0.0)));

        let escaping = ScenarioProfile::Escaping(Escaping::new(5.0, R_JUPITER).unwrap());
        assert_eq!(
            escaping.coordinates(&frame, 3.0, 4.0, 0.0),
            Some(SampleCoordinates::Radial(5.0))
        );

        let moon = ScenarioProfile::Exomoon(MoonExosphere::new(5.0, 1e8).unwrap());
        assert_eq!(
            moon.coordinates(&frame, 3e10, 0.0, 0.0),
            Some(SampleCoordinates::Radial(0.0))
        );

        let torus = ScenarioProfile::Torus(Torus::new(1e10, 2e5, M_JUPITER).unwrap());
        assert_eq!(
            torus.coordinates(&frame, 3.0, 4.0, 2.0),
            Some(SampleCoordinates::Torus { a: 5.0, z: 2.0 })
        );
    }

    #[test]
    fn test_exomoon_without_moon_has_no_coordinates() {
        let frame = create_frame(None);
        let moon = ScenarioProfile::Exomoon(MoonExosphere::new(5.0, 1e8).unwrap());
        assert!(moon.coordinates(&frame, 0.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_cross_section_sums_species_and_rayleigh() {
        let model = VoigtAbsorption::new();
        let lines = vec![catalogue_line("Na_D2").unwrap(), catalogue_line("K_D2").unwrap()];
        let wavelengths = DVector::from_vec(vec![5889.95e-8, 7667.01e-8]);
        let profile = ScenarioProfile::Barometric(Barometric::new(1000.0, 1e3, 2.3, R_JUPITER, M_JUPITER).unwrap());

        let sodium = Scenario::new(profile.clone(), vec![Species::new("sodium", 1e-6, 1000.0)]);
        let both = Scenario::new(
            profile.clone(),
            vec![Species::new("sodium", 1e-6, 1000.0), Species::new("potassium", 1e-7, 1000.0)],
        );
        let scattering = Scenario::new(profile, vec![]).with_rayleigh_scattering(true);

        let sigma_sodium = sodium.cross_section(&model, &wavelengths, &lines);
        let sigma_both = both.cross_section(&model, &wavelengths, &lines);
        let sigma_rayleigh = scattering.cross_section(&model, &wavelengths, &lines);

        assert!(sigma_both[1] > sigma_sodium[1]);
        assert!(sigma_both[0] >= sigma_sodium[0]);
        assert!(sigma_rayleigh.iter().all(|s| *s > 0.0));
    }
}
