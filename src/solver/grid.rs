//! Sampling grids
//!
//! Every grid of the engine is an offset-midpoint grid: `steps` cells of
//! equal width over `[lower, upper]`, sampled at the cell centres. The
//! rectangle rule on such a grid is the midpoint rule.

use std::f64::consts::PI;

use nalgebra::DVector;

/// Cell centres of `steps` equal cells over `[lower, upper]`
///
/// # Example
///
/// ```rust
/// use transit_rs::solver::midpoint_grid;
///
/// assert_eq!(midpoint_grid(0.0, 4.0, 4), vec![0.5, 1.5, 2.5, 3.5]);
/// ```
pub fn midpoint_grid(lower: f64, upper: f64, steps: usize) -> Vec<f64> {
    let width = (upper - lower) / steps as f64;
    (0..steps).map(|i| lower + (i as f64 + 0.5) * width).collect()
}

/// Discretisation of wavelength, orbital phase and the three spatial axes
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Sample wavelengths \[cm\]
    wavelengths: DVector<f64>,
    /// Half range of the orbital phase grid \[rad\]
    orbphase_border: f64,
    orbphase_steps: usize,
    /// Half range of the line-of-sight grid \[cm\]
    x_border: f64,
    x_steps: usize,
    /// Number of impact-parameter cells over the stellar radius
    z_steps: usize,
    /// Number of azimuth cells over 2π
    phi_steps: usize,
}

impl Grid {
    /// Creates a grid
    ///
    /// # Errors
    ///
    /// Returns `Err(String)` for an empty or non-positive wavelength list, a
    /// negative phase border, a non-positive line-of-sight border, any step
    /// count of zero, or a chord grid whose sample count overflows `usize`.
    pub fn new(
        wavelengths: Vec<f64>,
        orbphase_border: f64,
        orbphase_steps: usize,
        x_border: f64,
        x_steps: usize,
        z_steps: usize,
        phi_steps: usize,
    ) -> Result<Self, String> {
        if wavelengths.is_empty() {
            return Err("wavelength grid must not be empty.".to_string());
        }
        if let Some(bad) = wavelengths.iter().find(|w| !(w.is_finite() && **w > 0.0)) {
            return Err(format!("wavelengths must be strictly positive, got {bad}."));
        }
        if !(orbphase_border.is_finite() && orbphase_border >= 0.0) {
            return Err(format!("orbital phase border must be non-negative, got {orbphase_border}."));
        }
        if !(x_border.is_finite() && x_border > 0.0) {
            return Err(format!("line-of-sight border must be strictly positive, got {x_border}."));
        }
        for (name, steps) in [
            ("orbphase_steps", orbphase_steps),
            ("x_steps", x_steps),
            ("z_steps", z_steps),
            ("phi_steps", phi_steps),
        ] {
            if steps == 0 {
                return Err(format!("{name} must be greater than 0."));
            }
        }
        if x_steps.checked_mul(z_steps).and_then(|n| n.checked_mul(phi_steps)).is_none() {
            return Err(format!("{x_steps} × {z_steps} × {phi_steps} chord samples overflow usize."));
        }

        Ok(Self {
            wavelengths: DVector::from_vec(wavelengths),
            orbphase_border,
            orbphase_steps,
            x_border,
            x_steps,
            z_steps,
            phi_steps,
        })
    }

    /// Get sample wavelengths \[cm\]
    pub fn wavelengths(&self) -> &DVector<f64> {
        &self.wavelengths
    }

    /// Orbital phases, symmetric about mid-transit \[rad\]
    pub fn orbital_phases(&self) -> Vec<f64> {
        midpoint_grid(-self.orbphase_border, self.orbphase_border, self.orbphase_steps)
    }

    /// Line-of-sight samples over `[-x_border, x_border]` \[cm\]
    pub fn line_of_sight(&self) -> Vec<f64> {
        midpoint_grid(-self.x_border, self.x_border, self.x_steps)
    }

    /// Line-of-sight cell width \[cm\]
    pub fn delta_x(&self) -> f64 {
        2.0 * self.x_border / self.x_steps as f64
    }

    /// Azimuth samples over `[0, 2π)` \[rad\]
    pub fn azimuth(&self) -> Vec<f64> {
        midpoint_grid(0.0, 2.0 * PI, self.phi_steps)
    }

    /// Azimuth cell width \[rad\]
    pub fn delta_phi(&self) -> f64 {
        2.0 * PI / self.phi_steps as f64
    }

    /// Impact-parameter samples over `[0, r_star]` \[cm\]
    pub fn impact_parameter(&self, r_star: f64) -> Vec<f64> {
        midpoint_grid(0.0, r_star, self.z_steps)
    }

    /// Impact-parameter cell width \[cm\]
    pub fn delta_rho(&self, r_star: f64) -> f64 {
        r_star / self.z_steps as f64
    }

    /// Chord grid step counts `(x_steps, z_steps, phi_steps)`
    pub fn steps(&self) -> (usize, usize, usize) {
        (self.x_steps, self.z_steps, self.phi_steps)
    }

    /// Number of chords × line-of-sight samples evaluated per orbital phase
    pub fn samples_per_phase(&self) -> usize {
        self.x_steps * self.z_steps * self.phi_steps
    }
}

// =================================================================================================
// Tests
// =================================================================================================
