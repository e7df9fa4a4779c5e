//! Optical depth and transit depth integration
//!
//! # Algorithm
//!
//! For every orbital phase the engine fixes the body positions
//! ([`BodyFrame`]) and walks all chords `(phi, rho)` of the stellar disk:
//!
//! 1. Chords crossing the planet disk (or the moon disk) with at least one
//!    line-of-sight sample in front of the star are opaque, `τ = +∞`.
//! 2. Otherwise every scenario integrates its density along the chord,
//!    skipping samples behind the star (`x + x_p < 0`), to a column density
//!    `N = Δx·Σ n`.
//! 3. `τ(λ) += σ(λ)·N` per scenario, `σ` being the scenario's summed cross
//!    section.
//!
//! The transit depth then integrates `exp(−τ)` over the disk with the
//! rectangle rule, weighted by `rho` and the limb-darkening law, and
//! normalises by the same quadrature of the unobstructed disk.
//!
//! # Parallelism
//!
//! With the `parallel` feature the phases are distributed over the rayon pool
//! once [`Grid::samples_per_phase`] exceeds [`parallel_threshold`]. Each phase
//! slab uses the same sequential reduction, so the result does not depend on
//! the schedule.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info, warn};
use nalgebra::DVector;
use ndarray::{s, Array2, Array3, Array4};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::geometry::{cylinder_to_cartesian, BodyFrame, Geometry};
use crate::models::VoigtAbsorption;
use crate::physics::{AbsorptionModel, Architecture, DensityProfile, LineParameters, SampleCoordinates};
#[cfg(feature = "parallel")]
use crate::solver::parallel_threshold;
use crate::solver::{Grid, LightCurve, Scenario, SolverError};

/// Light-curve engine for one star–planet(–moon) system
///
/// # Example
///
/// ```rust
/// use transit_rs::physics::Architecture;
/// use transit_rs::solver::{Grid, LightCurveEngine};
///
/// let architecture = Architecture::new(7e10, 2e33, 0.0, 1.9e30, 5e11).unwrap();
/// let grid = Grid::new(vec![5889.95e-8], 0.0, 1, 1e10, 10, 10, 6).unwrap();
///
/// let engine = LightCurveEngine::new(&architecture, &grid, &[], &[]);
/// let curve = engine.run().unwrap();
/// assert_eq!(curve.depth()[[0, 0]], 1.0);
/// ```
pub struct LightCurveEngine<'a> {
    architecture: &'a Architecture,
    grid: &'a Grid,
    scenarios: &'a [Scenario],
    lines: &'a [LineParameters],
    absorption: Box<dyn AbsorptionModel>,
}

impl<'a> LightCurveEngine<'a> {
    /// Creates an engine with the Voigt absorption model
    pub fn new(
        architecture: &'a Architecture,
        grid: &'a Grid,
        scenarios: &'a [Scenario],
        lines: &'a [LineParameters],
    ) -> Self {
        Self {
            architecture,
            grid,
            scenarios,
            lines,
            absorption: Box::new(VoigtAbsorption::new()),
        }
    }

    /// Builder pattern: replace the absorption model
    pub fn with_absorption_model(mut self, absorption: Box<dyn AbsorptionModel>) -> Self {
        self.absorption = absorption;
        self
    }

    /// Get the absorption model
    pub fn absorption_model(&self) -> &dyn AbsorptionModel {
        self.absorption.as_ref()
    }

    /// Light curve on the grid's wavelengths and orbital phases
    pub fn run(&self) -> Result<LightCurve, SolverError> {
        let phases = self.grid.orbital_phases();
        self.transit_depth(self.grid.wavelengths(), &phases)
    }

    /// Optical depth tensor `[wavelength, phi, rho, phase]`
    ///
    /// Opaque chords hold `f64::INFINITY` at every wavelength.
    pub fn optical_depth(
        &self,
        wavelengths: &DVector<f64>,
        phi: &[f64],
        rho: &[f64],
        phases: &[f64],
    ) -> Array4<f64> {
        let x = self.grid.line_of_sight();
        let cross_sections: Vec<DVector<f64>> = self
            .scenarios
            .iter()
            .map(|scenario| scenario.cross_section(self.absorption.as_ref(), wavelengths, self.lines))
            .collect();

        let clamped = AtomicUsize::new(0);
        let slab = |phase: &f64| self.phase_slab(*phase, wavelengths.len(), phi, rho, &x, &cross_sections, &clamped);

        #[cfg(feature = "parallel")]
        let slabs: Vec<Array3<f64>> = if self.grid.samples_per_phase() > parallel_threshold() && phases.len() > 1 {
            debug!("Integrating {} phases in parallel", phases.len());
            phases.par_iter().map(slab).collect()
        } else {
            phases.iter().map(slab).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let slabs: Vec<Array3<f64>> = phases.iter().map(slab).collect();

        let clamped = clamped.load(Ordering::Relaxed);
        if clamped > 0 {
            warn!("{clamped} density samples were negative or not finite and were set to zero");
        }

        let mut tau = Array4::zeros((wavelengths.len(), phi.len(), rho.len(), phases.len()));
        for (p, slab) in slabs.iter().enumerate() {
            tau.slice_mut(s![.., .., .., p]).assign(slab);
        }

        tau
    }

    /// Fractional flux remaining, `[phase, wavelength]`
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NonFiniteDepth`] when the integration produces
    /// a NaN, which only happens for non-physical cross sections.
    pub fn transit_depth(&self, wavelengths: &DVector<f64>, phases: &[f64]) -> Result<LightCurve, SolverError> {
        let r_star = self.architecture.r_star;
        let phi = self.grid.azimuth();
        let rho = self.grid.impact_parameter(r_star);
        let delta_phi = self.grid.delta_phi();
        let delta_rho = self.grid.delta_rho(r_star);

        info!(
            "Integrating {} phases × {} wavelengths over {} chords",
            phases.len(),
            wavelengths.len(),
            phi.len() * rho.len()
        );
        debug!(
            "Line of sight: {} samples of {:.3e} cm, {} scenarios",
            self.grid.line_of_sight().len(),
            self.grid.delta_x(),
            self.scenarios.len()
        );

        let tau = self.optical_depth(wavelengths, &phi, &rho, phases);

        let weights: Vec<f64> = match self.architecture.limb_darkening {
            Some(law) => rho.iter().map(|&r| r * law.intensity(r, r_star)).collect(),
            None => rho.clone(),
        };

        // Same quadrature over the unobstructed disk
        let full_chord = delta_phi * phi.len() as f64;
        let denominator = delta_rho * weights.iter().map(|w| w * full_chord).sum::<f64>();

        let mut depth = Array2::zeros((phases.len(), wavelengths.len()));
        for p in 0..phases.len() {
            for w in 0..wavelengths.len() {
                let mut sum_over_chords = 0.0;
                for (j, weight) in weights.iter().enumerate() {
                    let transmitted: f64 = (0..phi.len()).map(|i| (-tau[[w, i, j, p]]).exp()).sum();
                    sum_over_chords += weight * (delta_phi * transmitted);
                }

                let value = delta_rho * sum_over_chords / denominator;
                if value.is_nan() {
                    return Err(SolverError::NonFiniteDepth {
                        phase: phases[p],
                        wavelength: wavelengths[w],
                    });
                }
                depth[[p, w]] = value;
            }
        }

        LightCurve::new(phases.to_vec(), wavelengths.clone(), depth).map_err(SolverError::Shape)
    }

    /// Optical depth `[wavelength, phi, rho]` at one orbital phase
    #[allow(clippy::too_many_arguments)]
    fn phase_slab(
        &self,
        phase: f64,
        n_wavelengths: usize,
        phi: &[f64],
        rho: &[f64],
        x: &[f64],
        cross_sections: &[DVector<f64>],
        clamped: &AtomicUsize,
    ) -> Array3<f64> {
        let frame = Geometry::new(self.architecture).frame(phase);
        let delta_x = self.grid.delta_x();
        let in_front = x.last().is_some_and(|&x_max| !frame.behind_star(x_max));

        let mut tau = Array3::zeros((n_wavelengths, phi.len(), rho.len()));
        let mut rejected = 0;

        for (i, &phi_i) in phi.iter().enumerate() {
            for (j, &rho_j) in rho.iter().enumerate() {
                let (_, y, z) = cylinder_to_cartesian(0.0, phi_i, rho_j);

                if in_front && (frame.planet_blocks(y, z) || frame.moon_blocks(y, z)) {
                    tau.slice_mut(s![.., i, j]).fill(f64::INFINITY);
                    continue;
                }

                for (scenario, sigma) in self.scenarios.iter().zip(cross_sections) {
                    let profile = &scenario.profile;
                    let coordinates = |x_k: f64| profile.coordinates(&frame, x_k, y, z);
                    let column = column_density(profile, &frame, x, coordinates, &mut rejected) * delta_x;
                    if column == 0.0 {
                        continue;
                    }
                    for (k, &sigma_k) in sigma.iter().enumerate() {
                        tau[[k, i, j]] += sigma_k * column;
                    }
                }
            }
        }

        if rejected > 0 {
            clamped.fetch_add(rejected, Ordering::Relaxed);
        }

        tau
    }
}

/// Sum of a density over the in-front samples of one chord
///
/// `coordinates` maps a line-of-sight position to the profile's coordinate,
/// `None` meaning the profile has no source in this frame. Negative or
/// non-finite densities count as zero and are tallied in `rejected`.
fn column_density<P, C>(profile: &P, frame: &BodyFrame, x: &[f64], coordinates: C, rejected: &mut usize) -> f64
where
    P: DensityProfile + ?Sized,
    C: Fn(f64) -> Option<SampleCoordinates>,
{
    let mut sum = 0.0;
    for &x_k in x {
        if frame.behind_star(x_k) {
            continue;
        }
        let Some(coords) = coordinates(x_k) else {
            return 0.0;
        };

        let n = profile.number_density(coords);
        if n.is_finite() && n >= 0.0 {
            sum += n;
        } else {
            *rejected += 1;
        }
    }
    sum
}

// =================================================================================================
// Tests
// =================================================================================================
