//! Gas torus around the planet
//!
//! Material ejected from a satellite at `a_torus` with speed `v_ej` spreads
//! into a torus whose cross-section is a Gaussian of width
//! `H = a_torus·v_ej / v_orb`, with `v_orb = sqrt(G·M_p/a_torus)` the
//! orbital velocity at the torus radius. Normalised to one absorber:
//!
//! ```text
//! n(a, z) = exp(−((a − a_torus)² + z²) / H²) / (2π²·a_torus·H²)
//! ```

use std::f64::consts::PI;

use crate::physics::constants::G_GRAV;
use crate::physics::{DensityProfile, SampleCoordinates};

/// Gaussian torus in the orbital plane of the planet
#[derive(Debug, Clone, PartialEq)]
pub struct Torus {
    /// Radius of the torus centre line \[cm\]
    a_torus: f64,
    /// Gaussian width of the cross-section \[cm\]
    width: f64,
    normalisation: f64,
}

impl Torus {
    /// Creates a torus
    ///
    /// # Arguments
    ///
    /// * `a_torus` - Distance of the torus centre line from the planet \[cm\]
    /// * `v_ej` - Ejection velocity of the source \[cm/s\]
    /// * `m_p` - Planetary mass \[g\]
    pub fn new(a_torus: f64, v_ej: f64, m_p: f64) -> Result<Self, String> {
        if !(a_torus.is_finite() && a_torus > 0.0) {
            return Err(format!("torus radius must be strictly positive, got {a_torus}."));
        }
        if !(v_ej.is_finite() && v_ej > 0.0) {
            return Err(format!("ejection velocity must be strictly positive, got {v_ej}."));
        }
        if !(m_p.is_finite() && m_p > 0.0) {
            return Err(format!("planetary mass must be strictly positive, got {m_p}."));
        }

        let v_orbit = (G_GRAV * m_p / a_torus).sqrt();
        let width = a_torus * v_ej / v_orbit;

        Ok(Self {
            a_torus,
            width,
            normalisation: 1.0 / (2.0 * PI * PI * a_torus * width * width),
        })
    }

    /// Get the Gaussian width of the cross-section \[cm\]
    pub fn width(&self) -> f64 {
        self.width
    }
}

impl DensityProfile for Torus {
    fn number_density(&self, coords: SampleCoordinates) -> f64 {
        let (a, z) = match coords {
            SampleCoordinates::Torus { a, z } => (a, z),
            // A bare radius is read as a point in the orbital plane
            SampleCoordinates::Radial(r) => (r, 0.0),
        };

        let da = a - self.a_torus;
        self.normalisation * (-(da * da + z * z) / (self.width * self.width)).exp()
    }

    fn name(&self) -> &str {
        "torus"
    }

    fn description(&self) -> Option<&str> {
        Some("Gaussian gas torus, one absorber in total")
    }
}
