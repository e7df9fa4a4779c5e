//! Light-curve engine
//!
//! This module turns an [`Architecture`](crate::physics::Architecture), a set
//! of absorbing [`Scenario`]s and a sampling [`Grid`] into a [`LightCurve`].
//!
//! # Module Organization
//!
//! - **`grid`**: offset-midpoint grids for wavelength, phase and the chord axes
//! - **`scenario`**: density profile + species + Rayleigh switch
//! - **`engine`**: optical depth tensor and transit depth integration
//! - **`light_curve`**: the `[phase, wavelength]` result
//!
//! # Quick Start Example
//!
//! ```rust
//! use transit_rs::models::Escaping;
//! use transit_rs::physics::Architecture;
//! use transit_rs::physics::constants::{catalogue_line, M_JUPITER, R_JUPITER, R_SUN};
//! use transit_rs::solver::{Grid, LightCurveEngine, Scenario, ScenarioProfile, Species};
//!
//! let architecture = Architecture::new(R_SUN, 2e33, R_JUPITER, M_JUPITER, 7e11).unwrap();
//! let scenarios = vec![Scenario::new(
//!     ScenarioProfile::Escaping(Escaping::new(5.0, R_JUPITER).unwrap()),
//!     vec![Species::new("sodium", 1e32, 1000.0)],
//! )];
//! let lines = vec![catalogue_line("Na_D2").unwrap()];
//! let grid = Grid::new(vec![5889.95e-8, 5800.0e-8], 0.05, 3, 1e11, 50, 20, 12).unwrap();
//!
//! let curve = LightCurveEngine::new(&architecture, &grid, &scenarios, &lines).run()?;
//! assert!(curve.depth()[[1, 0]] < curve.depth()[[1, 1]]);
//! # Ok::<(), transit_rs::solver::SolverError>(())
//! ```
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────┐
//! │ Architecture │   │ Scenarios     │   │ Grid     │
//! └──────┬───────┘   └──────┬────────┘   └────┬─────┘
//!        │                  │                 │
//!        └──────────┬───────┴─────────────────┘
//!                   │
//!          ┌────────▼─────────┐
//!          │ optical_depth    │ τ[λ, φ, ρ, phase]
//!          └────────┬─────────┘
//!                   │
//!          ┌────────▼─────────┐
//!          │ transit_depth    │ ∫∫ exp(−τ)·ρ·CLV dφ dρ
//!          └────────┬─────────┘
//!                   │
//!          ┌────────▼─────────┐
//!          │ LightCurve       │ [phase, λ]
//!          └──────────────────┘
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================
mod engine;
mod grid;
mod light_curve;
mod scenario;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Phases are the unit of parallel work. Whether a run fans out is decided
// once per `optical_depth` call from the samples per phase; the value is a
// tuning hint only, so relaxed atomics suffice.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of line-of-sight samples per phase above which
/// [`LightCurveEngine`] distributes the phases over the rayon pool.
///
/// Below ~20 000 samples (e.g. 20 × 20 × 50) a phase finishes faster than the
/// thread-pool dispatch.
const DEFAULT_PARALLEL_THRESHOLD: usize = 20_000;

/// Current threshold, see [`parallel_threshold()`]
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Samples per phase above which the engine integrates phases in parallel
///
/// Only consulted when the crate is built with the `parallel` feature;
/// compare with [`Grid::samples_per_phase`].
///
/// # Example
///
/// ```rust
/// use transit_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Change the parallel threshold for the rest of the process
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use transit_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Test-only override of the threshold, restored on drop
///
/// Holds a global lock for its lifetime: tests that change the threshold
/// run one at a time.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Errors
// =================================================================================================

/// Failure of a light-curve integration
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("transit depth is not a number at orbital phase {phase} rad, wavelength {wavelength} cm")]
    NonFiniteDepth { phase: f64, wavelength: f64 },

    #[error("inconsistent light curve: {0}")]
    Shape(String),
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use engine::LightCurveEngine;
pub use grid::{midpoint_grid, Grid};
pub use light_curve::LightCurve;
pub use scenario::{Scenario, ScenarioProfile, Species};

// =================================================================================================
// Tests
// =================================================================================================
