//! Plain-text light-curve table
//!
//! Whitespace-separated columns readable by `numpy.loadtxt`, gnuplot and
//! spreadsheet imports.
//!
//! # Format
//!
//! ```text
//! # Transit Light Curve
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Setup: wasp49b_sodium
//! # Scenarios: barometric
//! #
//! # Orbital phase, Light curve at 5889.95 Å, Light curve at 5895.92 Å
//! -1.591549430918953e-2 9.999871204381253e-1 9.999912458827718e-1
//! 0.000000000000000e0 9.862512397400871e-1 9.903711002337456e-1
//! ```
//!
//! The metadata block is optional; the header row is always written. The
//! first column is the orbital phase as a fraction of one orbit
//! (`phase/2π`), followed by one column of remaining flux per wavelength.
//!
//! # Example
//!
//! ```rust,ignore
//! use transit_rs::output::export::{export_light_curve, TableConfig, TableMetadata};
//!
//! let config = TableConfig::default()
//!     .precision(8)
//!     .with_metadata(TableMetadata::from_setup("wasp49b_sodium"));
//!
//! export_light_curve(&curve, "wasp49b_sodium_lightcurve.txt", Some(&config))?;
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::output::export::{ExportError, Exporter};
use crate::physics::constants::CM_TO_ANGSTROM;
use crate::solver::LightCurve;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for table export
///
/// # Example
///
/// ```rust
/// use transit_rs::output::export::TableConfig;
///
/// let config = TableConfig::default().precision(8).delimiter(",");
/// assert_eq!(config.precision, 8);
/// ```
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Column delimiter (default: a single space)
    pub delimiter: String,

    /// Significant digits after the decimal point, scientific notation (default: 15)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<TableMetadata>,

    /// Header of the phase column (default: "Orbital phase")
    pub phase_header: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            delimiter: " ".to_string(),
            precision: 15,
            include_metadata: false,
            metadata: None,
            phase_header: "Orbital phase".to_string(),
        }
    }
}

impl TableConfig {
    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: TableMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for the table header comments
///
/// Only non-empty fields are written.
#[derive(Debug, Clone, Default)]
pub struct TableMetadata {
    /// Name of the setup the curve was computed from
    pub setup_name: Option<String>,

    /// Active scenarios, in integration order
    pub scenarios: Vec<String>,

    /// Absorption lines taken into account
    pub lines: Vec<String>,

    /// Chord grid as `(x_steps, z_steps, phi_steps)`
    pub chord_grid: Option<(usize, usize, usize)>,

    /// Whether limb darkening weighted the disk integral
    pub limb_darkening: Option<bool>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl TableMetadata {
    /// Metadata naming only the setup
    pub fn from_setup(setup_name: &str) -> Self {
        Self {
            setup_name: Some(setup_name.to_string()),
            ..Default::default()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(writer: &mut W, metadata: &TableMetadata) -> std::io::Result<()> {
    writeln!(writer, "# Transit Light Curve")?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(setup) = &metadata.setup_name {
        writeln!(writer, "# Setup: {setup}")?;
    }
    if !metadata.scenarios.is_empty() {
        writeln!(writer, "# Scenarios: {}", metadata.scenarios.join(", "))?;
    }
    if !metadata.lines.is_empty() {
        writeln!(writer, "# Lines: {}", metadata.lines.join(", "))?;
    }
    if let Some((x_steps, z_steps, phi_steps)) = metadata.chord_grid {
        writeln!(writer, "# Chord grid: x_steps = {x_steps}, z_steps = {z_steps}, phi_steps = {phi_steps}")?;
    }
    if let Some(enabled) = metadata.limb_darkening {
        writeln!(writer, "# Limb darkening: {}", if enabled { "quadratic" } else { "none" })?;
    }
    for (key, value) in &metadata.custom {
        writeln!(writer, "# {key}: {value}")?;
    }

    writeln!(writer, "#")
}

/// Wavelength label in Å, rounded to µÅ so that `5889.95e-8` prints as `5889.95`
pub fn wavelength_label(wavelength: f64) -> String {
    let angstrom = (wavelength * CM_TO_ANGSTROM * 1e6).round() / 1e6;
    format!("{angstrom}")
}

/// Header row naming the phase column and one column per wavelength
pub fn header_row(curve: &LightCurve, config: &TableConfig) -> String {
    let mut header = config.phase_header.clone();
    for &wavelength in curve.wavelengths().iter() {
        header.push_str(&format!(", Light curve at {} Å", wavelength_label(wavelength)));
    }
    header
}

fn validate(curve: &LightCurve) -> Result<(), ExportError> {
    if curve.is_empty() || curve.wavelengths().is_empty() {
        return Err(ExportError::EmptyData);
    }

    let expected = (curve.phases().len(), curve.wavelengths().len());
    if curve.depth().dim() != expected {
        return Err(ExportError::ShapeMismatch {
            rows: curve.depth().nrows(),
            columns: curve.depth().ncols(),
            phases: expected.0,
            wavelengths: expected.1,
        });
    }

    if curve.phases().iter().any(|phase| !phase.is_finite()) {
        return Err(ExportError::NonFinite("orbital phase".to_string()));
    }
    if let Some(w) = (0..expected.1).find(|&w| curve.depth().column(w).iter().any(|d| d.is_nan())) {
        return Err(ExportError::NonFinite(format!(
            "light curve at {} Å",
            wavelength_label(curve.wavelengths()[w])
        )));
    }

    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Write a light curve table to any writer
///
/// # Errors
///
/// - Empty light curve
/// - NaN values
/// - Write errors
pub fn write_light_curve<W: Write>(
    writer: &mut W,
    curve: &LightCurve,
    configuration: &TableConfig,
) -> Result<(), ExportError> {
    validate(curve)?;

    if configuration.include_metadata
        && let Some(metadata) = &configuration.metadata
    {
        write_metadata_header(writer, metadata)?;
    }

    writeln!(writer, "# {}", header_row(curve, configuration))?;

    let precision = configuration.precision;
    for (p, fraction) in curve.orbit_fractions().iter().enumerate() {
        write!(writer, "{fraction:.precision$e}")?;
        for value in curve.depth().row(p) {
            write!(writer, "{}{value:.precision$e}", configuration.delimiter)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Export a light curve table to a file
///
/// Uses [`TableConfig::default`] when `configuration` is `None`.
pub fn export_light_curve(
    curve: &LightCurve,
    output_path: impl AsRef<Path>,
    configuration: Option<&TableConfig>,
) -> Result<(), ExportError> {
    let binding = TableConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    let output_path = output_path.as_ref();

    // Validate before creating the file so failures leave nothing behind
    validate(curve)?;

    let file = File::create(output_path).map_err(|source| ExportError::Io {
        path: output_path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_light_curve(&mut writer, curve, configuration)?;
    writer.flush()?;

    debug!("Wrote {} phases to {}", curve.len(), output_path.display());
    Ok(())
}

/// [`Exporter`] writing the plain-text table
#[derive(Debug, Clone, Default)]
pub struct TableExporter {
    pub config: TableConfig,
}

impl TableExporter {
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }
}

impl Exporter for TableExporter {
    type Error = ExportError;

    fn export(&self, curve: &LightCurve, path: &Path) -> Result<(), Self::Error> {
        export_light_curve(curve, path, Some(&self.config))
    }

    fn extension(&self) -> &str {
        "txt"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;
    use ndarray::array;
    use std::f64::consts::PI;
    use std::fs;
    use tempfile::NamedTempFile;

    fn create_curve() -> LightCurve {
        LightCurve::new(
            vec![-0.1 * PI, 0.0, 0.1 * PI],
            DVector::from_vec(vec![5889.95e-8, 5895.92e-8]),
            array![[1.0, 1.0], [0.98, 0.99], [1.0, 1.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_wavelength_label() {
        assert_eq!(wavelength_label(5889.95e-8), "5889.95");
        assert_eq!(wavelength_label(7667.01e-8), "7667.01");
    }

    #[test]
    fn test_header_row() {
        let header = header_row(&create_curve(), &TableConfig::default());
        assert_eq!(header, "Orbital phase, Light curve at 5889.95 Å, Light curve at 5895.92 Å");
    }

    #[test]
    fn test_export_basic() {
        let file = NamedTempFile::new().unwrap();
        export_light_curve(&create_curve(), file.path(), None).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("# Orbital phase"));

        let middle: Vec<f64> = lines[2].split_whitespace().map(|v| v.parse().unwrap()).collect();
        assert_eq!(middle.len(), 3);
        assert_eq!(middle[0], 0.0);
        assert!((middle[1] - 0.98).abs() < 1e-12);
    }

    #[test]
    fn test_phase_column_is_orbit_fraction() {
        let mut buffer = Vec::new();
        write_light_curve(&mut buffer, &create_curve(), &TableConfig::default().precision(6)).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        let first_row = content.lines().nth(1).unwrap();
        assert!(first_row.starts_with("-5.000000e-2"));
    }

    #[test]
    fn test_export_with_metadata() {
        let mut metadata = TableMetadata::from_setup("wasp49b_sodium");
        metadata.scenarios = vec!["barometric".to_string(), "torus".to_string()];
        metadata.chord_grid = Some((100, 50, 36));
        metadata.add_custom("Note".to_string(), "test".to_string());

        let mut buffer = Vec::new();
        write_light_curve(&mut buffer, &create_curve(), &TableConfig::default().with_metadata(metadata)).unwrap();
        let content = String::from_utf8(buffer).unwrap();

        assert!(content.starts_with("# Transit Light Curve"));
        assert!(content.contains("# Generated:"));
        assert!(content.contains("# Setup: wasp49b_sodium"));
        assert!(content.contains("# Scenarios: barometric, torus"));
        assert!(content.contains("# Chord grid: x_steps = 100, z_steps = 50, phi_steps = 36"));
        assert!(content.contains("# Note: test"));
    }

    #[test]
    fn test_custom_delimiter() {
        let mut buffer = Vec::new();
        write_light_curve(&mut buffer, &create_curve(), &TableConfig::default().delimiter(",")).unwrap();
        let content = String::from_utf8(buffer).unwrap();
        assert_eq!(content.lines().nth(1).unwrap().split(',').count(), 3);
    }

    #[test]
    fn test_nan_is_rejected() {
        let curve = LightCurve::new(vec![0.0], DVector::from_vec(vec![5889.95e-8]), array![[f64::NAN]]).unwrap();
        let error = write_light_curve(&mut Vec::new(), &curve, &TableConfig::default()).unwrap_err();
        assert!(matches!(error, ExportError::NonFinite(_)));
        assert!(error.to_string().contains("5889.95"));
    }

    #[test]
    fn test_empty_curve_is_rejected() {
        let curve = LightCurve::new(vec![], DVector::from_vec(vec![5889.95e-8]), ndarray::Array2::zeros((0, 1))).unwrap();
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(
            export_light_curve(&curve, file.path(), None),
            Err(ExportError::EmptyData)
        ));
    }

    #[test]
    fn test_invalid_path() {
        let result = export_light_curve(&create_curve(), "/nonexistent/dir/curve.txt", None);
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }

    #[test]
    fn test_exporter_trait() {
        let file = NamedTempFile::new().unwrap();
        let exporter = TableExporter::default();
        exporter.export(&create_curve(), file.path()).unwrap();
        assert_eq!(exporter.extension(), "txt");
        assert!(fs::read_to_string(file.path()).unwrap().contains("Light curve at 5895.92 Å"));
    }
}
