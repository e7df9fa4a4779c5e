//! Escaping exospheres
//!
//! Power-law density profiles `n ∝ (R/r)^q` outside a body of radius `R`,
//! normalised so that the volume integral from `R` to infinity is one
//! absorber:
//!
//! ```text
//! n(r) = (q − 3) / (4π·R³) · (R/r)^q        r ≥ R, q > 3
//! ```
//!
//! The number of absorbers enters through the species' `chi`.
//!
//! - [`Escaping`]: exosphere of the planet (`R = R_0`)
//! - [`MoonExosphere`]: exosphere of the moon (`R = R_moon`), evaluated at
//!   the distance from the moon centre

use std::f64::consts::PI;

use crate::physics::{DensityProfile, SampleCoordinates};

/// Normalised power law, shared by both exospheres
#[derive(Debug, Clone, PartialEq)]
struct PowerLaw {
    radius: f64,
    exponent: f64,
    normalisation: f64,
}

impl PowerLaw {
    fn new(radius: f64, exponent: f64) -> Result<Self, String> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(format!("exosphere base radius must be strictly positive, got {radius}."));
        }
        if !(exponent.is_finite() && exponent > 3.0) {
            return Err(format!("power-law exponent must be greater than 3, got {exponent}."));
        }

        Ok(Self {
            radius,
            exponent,
            normalisation: (exponent - 3.0) / (4.0 * PI * radius.powi(3)),
        })
    }

    #[inline]
    fn evaluate(&self, r: f64) -> f64 {
        self.normalisation * (self.radius / r).powf(self.exponent)
    }
}

// =================================================================================================
// Planetary exosphere
// =================================================================================================

/// Escaping exosphere around the planet
#[derive(Debug, Clone, PartialEq)]
pub struct Escaping {
    profile: PowerLaw,
}

impl Escaping {
    /// Creates a planetary exosphere
    ///
    /// # Arguments
    ///
    /// * `exponent` - Power-law index q (> 3)
    /// * `r_0` - Reference radius of the planet \[cm\]
    pub fn new(exponent: f64, r_0: f64) -> Result<Self, String> {
        Ok(Self {
            profile: PowerLaw::new(r_0, exponent)?,
        })
    }
}

impl DensityProfile for Escaping {
    fn number_density(&self, coords: SampleCoordinates) -> f64 {
        self.profile.evaluate(coords.radius())
    }

    fn name(&self) -> &str {
        "escaping"
    }

    fn description(&self) -> Option<&str> {
        Some("Power-law exosphere around the planet, one absorber in total")
    }
}

// =================================================================================================
// Moon exosphere
// =================================================================================================

/// Escaping exosphere around the moon
#[derive(Debug, Clone, PartialEq)]
pub struct MoonExosphere {
    profile: PowerLaw,
}

impl MoonExosphere {
    /// Creates a moon exosphere
    ///
    /// # Arguments
    ///
    /// * `exponent` - Power-law index q (> 3)
    /// * `r_moon` - Moon radius \[cm\]
    pub fn new(exponent: f64, r_moon: f64) -> Result<Self, String> {
        Ok(Self {
            profile: PowerLaw::new(r_moon, exponent)?,
        })
    }
}

impl DensityProfile for MoonExosphere {
    fn number_density(&self, coords: SampleCoordinates) -> f64 {
        self.profile.evaluate(coords.radius())
    }

    fn name(&self) -> &str {
        "exomoon"
    }

    fn description(&self) -> Option<&str> {
        Some("Power-law exosphere around the moon, one absorber in total")
    }
}

// =================================================================================================
// Tests
// =================================================================================================
