//! Setup file loading and validation
//!
//! A run is described by one JSON setup file. Loading happens in two steps:
//! `serde` deserialises the file into the raw structs below, then
//! [`validation`] checks every value and builds the immutable [`RunSetup`].
//! All errors surface here, before any integration starts.
//!
//! ## Setup File Structure
//!
//! ```json
//! {
//!     "ExomoonSource": false,
//!     "CLV_variations": true,
//!     "Architecture": {
//!         "preset": "WASP-49b",
//!         "M_star": 2.0e33, "a_p": 5.5e11,
//!         "u1": 0.4, "u2": 0.2
//!     },
//!     "Scenarios": {
//!         "barometric": { "T": 1000.0, "P_0": 1.0e3, "mu": 2.3, "RayleighScatt": true }
//!     },
//!     "Lines": { "Na_D2": true, "Na_D1": true },
//!     "Species": {
//!         "barometric": { "sodium": { "chi": 1.0e-6, "T_abs": 1000.0 } }
//!     },
//!     "Grids": {
//!         "wavelength": [5.88995e-5, 5.89592e-5],
//!         "orbphase_border": 0.1, "orbphase_steps": 20,
//!         "x_border": 5.0e10, "x_steps": 100, "z_steps": 50, "phi_steps": 36
//!     },
//!     "Output": { "precision": 10, "include_metadata": true }
//! }
//! ```
//!
//! ## Keys
//!
//! - **Architecture**: `R_star`, `M_star`, `R_0`, `M_p`, `a_p` (cgs). A
//!   `preset` supplies `R_star`, `R_0` and `M_p` when they are missing. Moon
//!   keys (`R_moon`, `a_moon`, `orbphase_moon`) are required with
//!   `ExomoonSource`, CLV coefficients (`u1`, `u2`) with `CLV_variations`.
//!   Optional rotation: `inclination_starrot`, `azimuth_starrot`,
//!   `period_starrot`, `period_planetrot`.
//! - **Scenarios**: `barometric`/`hydrostatic` (`T`, `P_0`, `mu`), `escaping`
//!   (`q_esc`), `exomoon` (`q_moon`), `torus` (`a_torus`, `v_ej`), each with
//!   an optional `RayleighScatt`.
//! - **Lines**: catalogue line name → `true`/`false`, or any name → explicit
//!   `{ "f", "lambda", "gamma", "mass", "species" }`.
//! - **Species**: scenario → species → `{ "chi", "T_abs" }`.
//! - **Grids**: wavelengths in cm, phase border in rad, line-of-sight border
//!   in cm, step counts.
//! - **Output**: optional `path`, `precision`, `include_metadata`. Other
//!   keys are logged and ignored.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::output::export::{TableConfig, TableMetadata};
use crate::physics::{Architecture, LineParameters};
use crate::solver::{Grid, LightCurveEngine, Scenario};

mod loading;
pub mod validation;

pub use loading::{load_setup, parse_setup};
pub use validation::validate_setup;

// =================================================================================================
// Errors
// =================================================================================================

/// Invalid or unreadable setup file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read setup file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("setup file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("missing key `{0}`")]
    MissingKey(String),

    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("unknown scenario `{0}` (expected barometric, hydrostatic, escaping, exomoon or torus)")]
    UnknownScenario(String),

    #[error("invalid parameters for scenario `{scenario}`: {reason}")]
    InvalidScenario { scenario: String, reason: String },

    #[error("species given for inactive scenario `{0}` (add it to `Scenarios`)")]
    InactiveScenario(String),

    #[error("unknown absorption line `{0}` (not in the catalogue and no parameters given)")]
    UnknownLine(String),

    #[error("species `{species}` of scenario `{scenario}` has no active absorption line")]
    NoLines { scenario: String, species: String },
}

// =================================================================================================
// Raw setup file
// =================================================================================================

/// Setup file as written on disk
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupFile {
    #[serde(rename = "ExomoonSource", default)]
    pub exomoon_source: bool,
    #[serde(rename = "CLV_variations", default)]
    pub clv_variations: bool,
    #[serde(rename = "Architecture")]
    pub architecture: RawArchitecture,
    #[serde(rename = "Scenarios", default)]
    pub scenarios: BTreeMap<String, RawScenario>,
    #[serde(rename = "Lines", default)]
    pub lines: BTreeMap<String, RawLine>,
    #[serde(rename = "Species", default)]
    pub species: BTreeMap<String, BTreeMap<String, RawSpecies>>,
    #[serde(rename = "Grids")]
    pub grids: RawGrids,
    #[serde(rename = "Output", default)]
    pub output: RawOutput,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawArchitecture {
    pub preset: Option<String>,
    #[serde(rename = "R_star")]
    pub r_star: Option<f64>,
    #[serde(rename = "M_star")]
    pub m_star: Option<f64>,
    #[serde(rename = "R_0")]
    pub r_0: Option<f64>,
    #[serde(rename = "M_p")]
    pub m_p: Option<f64>,
    pub a_p: Option<f64>,
    #[serde(rename = "R_moon")]
    pub r_moon: Option<f64>,
    pub a_moon: Option<f64>,
    pub orbphase_moon: Option<f64>,
    pub u1: Option<f64>,
    pub u2: Option<f64>,
    pub inclination_starrot: Option<f64>,
    pub azimuth_starrot: Option<f64>,
    pub period_starrot: Option<f64>,
    pub period_planetrot: Option<f64>,
}

/// Parameters of one scenario; which keys are required depends on the scenario
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawScenario {
    #[serde(rename = "T")]
    pub temperature: Option<f64>,
    #[serde(rename = "P_0")]
    pub base_pressure: Option<f64>,
    pub mu: Option<f64>,
    pub q_esc: Option<f64>,
    pub q_moon: Option<f64>,
    pub a_torus: Option<f64>,
    pub v_ej: Option<f64>,
    #[serde(rename = "RayleighScatt", default)]
    pub rayleigh_scattering: bool,
}

/// A line entry: catalogue toggle or explicit parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLine {
    Toggle(bool),
    Custom(RawLineParameters),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawLineParameters {
    pub f: f64,
    pub lambda: f64,
    pub gamma: f64,
    pub mass: f64,
    pub species: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSpecies {
    pub chi: Option<f64>,
    #[serde(rename = "T_abs")]
    pub t_abs: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawGrids {
    pub wavelength: Option<Vec<f64>>,
    pub orbphase_border: Option<f64>,
    pub orbphase_steps: Option<f64>,
    pub x_border: Option<f64>,
    pub x_steps: Option<f64>,
    pub z_steps: Option<f64>,
    pub phi_steps: Option<f64>,
}

/// Output section; keys other than the known three are warned about and ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOutput {
    pub path: Option<PathBuf>,
    pub precision: Option<usize>,
    #[serde(default)]
    pub include_metadata: bool,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

// =================================================================================================
// Validated run description
// =================================================================================================

/// Output settings of a run
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    /// Explicit output path; `None` means beside the setup file
    pub path: Option<PathBuf>,
    pub precision: usize,
    pub include_metadata: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: None,
            precision: TableConfig::default().precision,
            include_metadata: false,
        }
    }
}

/// Immutable, validated description of one light-curve run
#[derive(Debug, Clone)]
pub struct RunSetup {
    /// Setup name (file stem), used in the output metadata
    pub name: Option<String>,
    pub architecture: Architecture,
    /// Active scenarios, in [`ScenarioKind::ALL`](crate::models::ScenarioKind::ALL) order
    pub scenarios: Vec<Scenario>,
    /// Names of the active lines, parallel to `lines`
    pub line_names: Vec<String>,
    pub lines: Vec<LineParameters>,
    pub grid: Grid,
    pub output: OutputSettings,
}

impl RunSetup {
    /// Engine over this setup with the default absorption model
    pub fn engine(&self) -> LightCurveEngine<'_> {
        LightCurveEngine::new(&self.architecture, &self.grid, &self.scenarios, &self.lines)
    }

    /// Table configuration matching the `Output` section
    pub fn table_config(&self) -> TableConfig {
        let config = TableConfig::default().precision(self.output.precision);
        if !self.output.include_metadata {
            return config;
        }

        let (x_steps, z_steps, phi_steps) = self.grid.steps();
        let metadata = TableMetadata {
            setup_name: self.name.clone(),
            scenarios: self.scenarios.iter().map(|s| s.kind().to_string()).collect(),
            lines: self.line_names.clone(),
            chord_grid: Some((x_steps, z_steps, phi_steps)),
            limb_darkening: Some(self.architecture.limb_darkening.is_some()),
            custom: Vec::new(),
        };
        config.with_metadata(metadata)
    }
}
