//! transit-rs: Transit Light Curves of Exoplanets
//!
//! Computes the fraction of stellar flux remaining while a planet (optionally
//! with an exomoon or a gas torus) crosses its star, resolved in wavelength
//! and orbital phase. The absorbers are described by parametrized density
//! profiles; their line absorption is integrated along chords through the
//! system and over the stellar disk.
//!
//! # Architecture
//!
//! transit-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Density profiles and the absorption model define the physics
//!    - The engine provides geometry and integration
//!
//! 2. **Validated, Immutable Runs**
//!    - A setup file is checked completely before any integration
//!    - Every run is a pure function of its [`config::RunSetup`]
//!
//! # Quick Start
//!
//! ```rust
//! use transit_rs::config::parse_setup;
//!
//! let setup = parse_setup(r#"{
//!     "Architecture": { "R_star": 7.0e10, "M_star": 2.0e33, "R_0": 7.0e9, "M_p": 1.9e30, "a_p": 5.0e11 },
//!     "Scenarios": { "barometric": { "T": 1000.0, "P_0": 1.0e3, "mu": 2.3 } },
//!     "Lines": { "Na_D2": true },
//!     "Species": { "barometric": { "sodium": { "chi": 1.0e-6, "T_abs": 1000.0 } } },
//!     "Grids": {
//!         "wavelength": [5.88995e-5, 5.8e-5],
//!         "orbphase_border": 0.0, "orbphase_steps": 1,
//!         "x_border": 5.0e10, "x_steps": 40, "z_steps": 20, "phi_steps": 12
//!     }
//! }"#)?;
//!
//! let curve = setup.engine().run()?;
//! println!("Maximal flux decrease: {:.5} %", curve.max_flux_decrease_percent());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Constants, line catalogue, architecture, capability traits
//! - [`models`]: Density profiles and the absorption model
//! - [`geometry`]: Body positions, velocities and coordinate transforms
//! - [`solver`]: Grids, scenarios and the light-curve engine
//! - [`config`]: Setup file loading and validation
//! - [`output`]: Light-curve export

// Core modules
pub mod physics;

pub mod geometry;
pub mod models;
pub mod solver;

pub mod config;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use transit_rs::prelude::*;
    //! ```
    pub use crate::config::{load_setup, parse_setup, ConfigError, RunSetup};
    pub use crate::geometry::Geometry;
    pub use crate::models::ScenarioKind;
    pub use crate::output::{export_light_curve, TableConfig};
    pub use crate::physics::{AbsorptionModel, Architecture, DensityProfile, LineParameters, SampleCoordinates};
    pub use crate::solver::{Grid, LightCurve, LightCurveEngine, Scenario, ScenarioProfile, Species};
}
