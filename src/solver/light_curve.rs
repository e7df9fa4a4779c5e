//! Transit light curve
//!
//! Fractional stellar flux remaining, indexed `[phase, wavelength]`, together
//! with the phase and wavelength axes it was computed on.

use std::f64::consts::PI;

use nalgebra::DVector;
use ndarray::{Array2, ArrayView1};

/// Wavelength- and phase-resolved transit depth
#[derive(Debug, Clone, PartialEq)]
pub struct LightCurve {
    /// Orbital phases \[rad\]
    phases: Vec<f64>,
    /// Wavelengths \[cm\]
    wavelengths: DVector<f64>,
    /// Flux remaining, `[phase, wavelength]`
    depth: Array2<f64>,
}

impl LightCurve {
    /// Creates a light curve
    ///
    /// # Errors
    ///
    /// Returns `Err(String)` when the shape of `depth` does not match
    /// `(phases.len(), wavelengths.len())`.
    pub fn new(phases: Vec<f64>, wavelengths: DVector<f64>, depth: Array2<f64>) -> Result<Self, String> {
        let expected = (phases.len(), wavelengths.len());
        if depth.dim() != expected {
            return Err(format!(
                "light curve shape {:?} does not match {} phases × {} wavelengths.",
                depth.dim(),
                expected.0,
                expected.1
            ));
        }

        Ok(Self {
            phases,
            wavelengths,
            depth,
        })
    }

    /// Get orbital phases \[rad\]
    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    /// Orbital phases as fractions of one orbit (`phase/2π`)
    pub fn orbit_fractions(&self) -> Vec<f64> {
        self.phases.iter().map(|phase| phase / (2.0 * PI)).collect()
    }

    /// Get wavelengths \[cm\]
    pub fn wavelengths(&self) -> &DVector<f64> {
        &self.wavelengths
    }

    /// Get the `[phase, wavelength]` table
    pub fn depth(&self) -> &Array2<f64> {
        &self.depth
    }

    /// Flux remaining at every wavelength for one phase index
    pub fn at_phase(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.phases.len()).then(|| self.depth.row(index))
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Smallest flux remaining over all phases and wavelengths
    pub fn min(&self) -> f64 {
        self.depth.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest flux remaining over all phases and wavelengths
    pub fn max(&self) -> f64 {
        self.depth.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Maximal flux decrease in percent, `100·(1 − min)`
    pub fn max_flux_decrease_percent(&self) -> f64 {
        (100.0 * (1.0 - self.min())).abs()
    }

    /// Minimal flux decrease in percent, `100·(1 − max)`
    pub fn min_flux_decrease_percent(&self) -> f64 {
        (100.0 * (1.0 - self.max())).abs()
    }
}
