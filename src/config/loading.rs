//! Reading setup files from disk or from strings.

use std::fs;
use std::path::Path;

use log::{debug, info};

use super::{validate_setup, ConfigError, RunSetup, SetupFile};

/// Load and validate a setup file
///
/// The file stem becomes the setup name.
///
/// # Errors
///
/// [`ConfigError::Io`] when the file cannot be read, any other
/// [`ConfigError`] when its content is invalid.
pub fn load_setup(path: impl AsRef<Path>) -> Result<RunSetup, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut setup = parse_setup(&content)?;
    setup.name = path.file_stem().map(|stem| stem.to_string_lossy().into_owned());

    info!("Loaded setup {}", path.display());
    Ok(setup)
}

/// Parse and validate setup JSON
pub fn parse_setup(content: &str) -> Result<RunSetup, ConfigError> {
    let raw: SetupFile = serde_json::from_str(content)?;
    debug!(
        "Setup declares {} scenarios, {} lines, {} wavelengths",
        raw.scenarios.len(),
        raw.lines.len(),
        raw.grids.wavelength.as_ref().map_or(0, Vec::len)
    );
    validate_setup(raw)
}
