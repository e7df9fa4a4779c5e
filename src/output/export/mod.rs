//! Export module for light curves.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module; adding a
//! format means adding a file.
//!
//! # Available formats
//!
//! | Format     | Module      |
//! |------------|-------------|
//! | Text table | [`table`]   |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use transit_rs::output::export::{default_output_path, Exporter, TableExporter};
//!
//! let exporter = TableExporter::default();
//! exporter.export(&curve, &default_output_path("setups/wasp49b_sodium.json"))?;
//! ```

pub mod table;

pub use table::{export_light_curve, write_light_curve, TableConfig, TableExporter, TableMetadata};

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::solver::LightCurve;

/// Failure while writing a light curve
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot create {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),

    #[error("empty data: the light curve has no phases or no wavelengths")]
    EmptyData,

    #[error("shape mismatch: table is {rows} × {columns}, axes are {phases} phases × {wavelengths} wavelengths")]
    ShapeMismatch {
        rows: usize,
        columns: usize,
        phases: usize,
        wavelengths: usize,
    },

    #[error("invalid data: NaN detected in {0}")]
    NonFinite(String),
}

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so the caller
/// can react precisely without boxing.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports a light curve to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path is invalid or the directory does not exist
    /// - `curve` contains no data or NaN values
    fn export(&self, curve: &LightCurve, path: &Path) -> Result<(), Self::Error>;

    /// File extension of the format, without the dot
    fn extension(&self) -> &str;
}

/// Default output path: `<setup stem>_lightcurve.txt` beside the setup file
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use transit_rs::output::export::default_output_path;
///
/// let path = default_output_path("setups/wasp49b_sodium.json");
/// assert_eq!(path, Path::new("setups/wasp49b_sodium_lightcurve.txt"));
/// ```
pub fn default_output_path(setup_path: impl AsRef<Path>) -> PathBuf {
    let setup_path = setup_path.as_ref();
    let stem = setup_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "setup".to_string());

    setup_path.with_file_name(format!("{stem}_lightcurve.txt"))
}
