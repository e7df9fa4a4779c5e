//! Capability traits for the pluggable physics
//!
//! This module defines the seams between the integration engine and the
//! physics it integrates:
//! - `DensityProfile`: number density of absorbers at a sample point
//! - `AbsorptionModel`: cross section per absorber as a function of wavelength
//! - `SampleCoordinates`: the coordinate a density profile is evaluated at

use nalgebra::DVector;

use crate::physics::constants::LineParameters;

// =================================================================================================
// Sample coordinates
// =================================================================================================

/// Coordinate at which a density profile is evaluated
///
/// The engine converts each line-of-sight sample into the natural geometry of
/// the scenario before calling [`DensityProfile::number_density`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleCoordinates {
    /// Distance from the centre of the host body (planet or moon) \[cm\]
    Radial(f64),

    /// Cylindrical coordinates around the planet's orbital axis \[cm\]
    ///
    /// `a` is the distance from the axis in the orbital plane, `z` the height
    /// above that plane.
    Torus { a: f64, z: f64 },
}

impl SampleCoordinates {
    /// Radial distance, or the 3-D distance from the planet for torus coordinates
    pub fn radius(&self) -> f64 {
        match self {
            SampleCoordinates::Radial(r) => *r,
            SampleCoordinates::Torus { a, z } => a.hypot(*z),
        }
    }
}

// =================================================================================================
// Density profile
// =================================================================================================

/// Number density of absorbers as a function of position
///
/// # Responsibility
///
/// Maps a sample coordinate to a number density \[cm⁻³\]. Does NOT handle
/// occlusion by the planet or moon, nor the far side of the star: the engine
/// applies those masks.
///
/// # Contract
///
/// Implementations must return finite, non-negative values for every
/// coordinate. The engine clamps anything else to zero and reports it.
pub trait DensityProfile: Send + Sync {
    /// Number density at the given coordinate \[cm⁻³\]
    fn number_density(&self, coords: SampleCoordinates) -> f64;

    /// Name of the profile (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the profile (option)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Absorption model
// =================================================================================================

/// Cross section per absorber as a function of wavelength
///
/// Wavelengths are vacuum wavelengths in cm, cross sections are returned in cm².
pub trait AbsorptionModel: Send + Sync {
    /// Line absorption of one species
    ///
    /// # Arguments
    ///
    /// * `wavelengths` - Sample wavelengths \[cm\]
    /// * `chi` - Mixing ratio or number of absorbers, scales the result linearly
    /// * `temperature` - Absorption temperature \[K\] (Doppler broadening)
    /// * `species` - Species name, selects the lines it owns
    /// * `lines` - Active absorption lines
    fn absorption_cross_section(
        &self,
        wavelengths: &DVector<f64>,
        chi: f64,
        temperature: f64,
        species: &str,
        lines: &[LineParameters],
    ) -> DVector<f64>;

    /// Rayleigh scattering cross section \[cm²\]
    fn rayleigh_scattering(&self, wavelengths: &DVector<f64>) -> DVector<f64>;

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================
