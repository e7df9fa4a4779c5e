//! Helper functions for integration tests

use transit_rs::models::Escaping;
use transit_rs::physics::constants::{catalogue_line, M_JUPITER, R_JUPITER, R_SUN};
use transit_rs::physics::{Architecture, LineParameters};
use transit_rs::solver::{Grid, LightCurve, Scenario, ScenarioProfile, Species};

/// Semi-major axis shared by the test systems \[cm\]
pub const A_P: f64 = 5.6e11;

/// Sun-like star with a planet of reference radius `r_0`
pub fn create_architecture(r_0: f64) -> Architecture {
    Architecture::new(R_SUN, 2e33, r_0, M_JUPITER, A_P).unwrap()
}

/// Small grid around the sodium doublet plus one continuum wavelength
pub fn create_grid(orbphase_border: f64, orbphase_steps: usize) -> Grid {
    Grid::new(
        vec![5889.95e-8, 5895.92e-8, 5800.0e-8],
        orbphase_border,
        orbphase_steps,
        2.0 * R_SUN,
        40,
        16,
        12,
    )
    .unwrap()
}

pub fn sodium_lines() -> Vec<LineParameters> {
    vec![catalogue_line("Na_D2").unwrap(), catalogue_line("Na_D1").unwrap()]
}

/// Escaping sodium exosphere with `chi` atoms at the reference radius
pub fn escaping_sodium(chi: f64) -> Scenario {
    Scenario::new(
        ScenarioProfile::Escaping(Escaping::new(5.0, R_JUPITER).unwrap()),
        vec![Species::new("sodium", chi, 1000.0)],
    )
}

/// Assert that every transit depth lies in [0, 1]
pub fn assert_within_unit_interval(curve: &LightCurve, message: &str) {
    for ((p, w), &value) in curve.depth().indexed_iter() {
        assert!(
            (0.0..=1.0).contains(&value),
            "{}: depth at phase {} / wavelength {} is {}",
            message, p, w, value
        );
    }
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }
}
