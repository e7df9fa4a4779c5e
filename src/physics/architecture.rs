//! System architecture
//!
//! The immutable description of the star, the transiting planet and the
//! optional moon, stellar rotation, planetary rotation and limb darkening.
//! One `Architecture` is built per run and passed by reference to the
//! geometry and the engine.

use crate::physics::constants::PlanetPreset;

/// Moon orbiting the planet on a circular orbit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonOrbit {
    /// Moon radius \[cm\]
    pub radius: f64,
    /// Semi-major axis of the moon around the planet \[cm\]
    pub semi_major_axis: f64,
    /// Orbital phase of the moon at planetary phase 0 \[rad\]
    pub starting_phase: f64,
}

/// Rigid stellar rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StellarRotation {
    /// Inclination of the rotation axis against the line-of-sight frame z axis \[rad\]
    pub inclination: f64,
    /// Azimuth of the rotation axis \[rad\]
    pub azimuth: f64,
    /// Rotation period \[s\]
    pub period: f64,
}

/// Quadratic limb darkening coefficients
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LimbDarkening {
    pub u1: f64,
    pub u2: f64,
}

impl LimbDarkening {
    /// Relative intensity at impact parameter `rho` on a star of radius `r_star`
    ///
    /// `CLV(rho) = 1 − u1(1−μ) − u2(1−μ)²` with `μ = sqrt(1 − rho²/R²)`.
    pub fn intensity(&self, rho: f64, r_star: f64) -> f64 {
        let arg = 1.0 - (1.0 - rho * rho / (r_star * r_star)).sqrt();
        1.0 - self.u1 * arg - self.u2 * arg * arg
    }

    /// Smallest intensity over the disk, `1 − u1·t − u2·t²` minimised over `t = 1 − μ ∈ [0, 1]`
    pub fn minimum_intensity(&self) -> f64 {
        let at = |t: f64| 1.0 - self.u1 * t - self.u2 * t * t;
        let mut minimum = at(0.0).min(at(1.0));
        // Interior minimum only for a convex polynomial
        if self.u2 < 0.0 {
            let vertex = -self.u1 / (2.0 * self.u2);
            if vertex > 0.0 && vertex < 1.0 {
                minimum = minimum.min(at(vertex));
            }
        }
        minimum
    }

    /// Checks that both coefficients are finite and the intensity is non-negative everywhere
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("u1", self.u1), ("u2", self.u2)] {
            if !value.is_finite() {
                return Err(format!("{name} must be finite, got {value}."));
            }
        }
        let minimum = self.minimum_intensity();
        if minimum < 0.0 {
            return Err(format!(
                "u1 = {}, u2 = {} give a negative intensity ({minimum}) on the stellar disk.",
                self.u1, self.u2
            ));
        }
        Ok(())
    }
}

/// Star–planet(–moon) system
#[derive(Debug, Clone, PartialEq)]
pub struct Architecture {
    /// Stellar radius \[cm\]
    pub r_star: f64,
    /// Stellar mass \[g\]
    pub m_star: f64,
    /// Reference radius of the opaque planetary body \[cm\]
    pub r_0: f64,
    /// Planetary mass \[g\]
    pub m_p: f64,
    /// Semi-major axis of the planet \[cm\]
    pub a_p: f64,

    pub moon: Option<MoonOrbit>,
    pub stellar_rotation: Option<StellarRotation>,
    /// Planetary rotation period \[s\]
    pub planet_rotation_period: Option<f64>,
    pub limb_darkening: Option<LimbDarkening>,
}

impl Architecture {
    /// Create a star–planet system without moon, rotation or limb darkening
    ///
    /// # Errors
    ///
    /// Returns `Err(String)` when a radius, mass or semi-major axis is
    /// non-physical. The reference radius may be zero (no opaque body).
    pub fn new(r_star: f64, m_star: f64, r_0: f64, m_p: f64, a_p: f64) -> Result<Self, String> {
        if !(r_star.is_finite() && r_star > 0.0) {
            return Err(format!("stellar radius must be strictly positive, got {r_star}."));
        }
        if !(m_star.is_finite() && m_star > 0.0) {
            return Err(format!("stellar mass must be strictly positive, got {m_star}."));
        }
        if !(r_0.is_finite() && r_0 >= 0.0) {
            return Err(format!("reference radius must be non-negative, got {r_0}."));
        }
        if !(m_p.is_finite() && m_p > 0.0) {
            return Err(format!("planetary mass must be strictly positive, got {m_p}."));
        }
        if !(a_p.is_finite() && a_p > 0.0) {
            return Err(format!("semi-major axis must be strictly positive, got {a_p}."));
        }

        Ok(Self {
            r_star,
            m_star,
            r_0,
            m_p,
            a_p,
            moon: None,
            stellar_rotation: None,
            planet_rotation_period: None,
            limb_darkening: None,
        })
    }

    /// Create a system from a named preset (stellar radius, reference radius, planet mass)
    pub fn from_preset(preset: &PlanetPreset, m_star: f64, a_p: f64) -> Result<Self, String> {
        Self::new(preset.r_star, m_star, preset.r_0, preset.m_p, a_p)
    }

    /// Builder pattern: add a moon
    pub fn with_moon(mut self, moon: MoonOrbit) -> Result<Self, String> {
        if !(moon.radius.is_finite() && moon.radius >= 0.0) {
            return Err(format!("moon radius must be non-negative, got {}.", moon.radius));
        }
        if !(moon.semi_major_axis.is_finite() && moon.semi_major_axis > 0.0) {
            return Err(format!(
                "moon semi-major axis must be strictly positive, got {}.",
                moon.semi_major_axis
            ));
        }
        self.moon = Some(moon);
        Ok(self)
    }

    /// Builder pattern: add stellar rotation
    pub fn with_stellar_rotation(mut self, rotation: StellarRotation) -> Result<Self, String> {
        if !(rotation.period.is_finite() && rotation.period > 0.0) {
            return Err(format!(
                "stellar rotation period must be strictly positive, got {}.",
                rotation.period
            ));
        }
        self.stellar_rotation = Some(rotation);
        Ok(self)
    }

    /// Builder pattern: add planetary rotation
    pub fn with_planet_rotation(mut self, period: f64) -> Result<Self, String> {
        if !(period.is_finite() && period > 0.0) {
            return Err(format!("planetary rotation period must be strictly positive, got {period}."));
        }
        self.planet_rotation_period = Some(period);
        Ok(self)
    }

    /// Builder pattern: add quadratic limb darkening
    pub fn with_limb_darkening(mut self, limb_darkening: LimbDarkening) -> Self {
        self.limb_darkening = Some(limb_darkening);
        self
    }
}
