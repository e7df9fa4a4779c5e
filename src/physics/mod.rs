//! Physical description of the system
//!
//! This module holds everything the integration engine treats as given:
//! the constants and line catalogue, the architecture of the star–planet
//! system, and the capability traits that density profiles and absorption
//! models implement.
//!
//! # Core Concepts
//!
//! - **Architecture**: Immutable star, planet and moon parameters
//! - **Density Profile**: Number density at a sample coordinate
//! - **Absorption Model**: Cross section per absorber versus wavelength
//!
//! # Implementing a New Density Profile
//!
//! ```rust
//! use transit_rs::physics::{DensityProfile, SampleCoordinates};
//!
//! struct Shell {
//!     inner: f64,
//!     outer: f64,
//!     density: f64,
//! }
//!
//! impl DensityProfile for Shell {
//!     fn number_density(&self, coords: SampleCoordinates) -> f64 {
//!         let r = coords.radius();
//!         if r >= self.inner && r <= self.outer { self.density } else { 0.0 }
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Shell"
//!     }
//! }
//!
//! let shell = Shell { inner: 1.0, outer: 2.0, density: 1e5 };
//! assert_eq!(shell.number_density(SampleCoordinates::Radial(1.5)), 1e5);
//! ```

// module declaration
pub mod architecture;
pub mod constants;
pub mod traits;

// re-export commonly used types for convenience
pub use architecture::{Architecture, LimbDarkening, MoonOrbit, StellarRotation};
pub use constants::LineParameters;
pub use traits::{AbsorptionModel, DensityProfile, SampleCoordinates};
