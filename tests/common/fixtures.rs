//! Setup files for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

/// Escaping sodium around a hot Jupiter, two phases, Na D2 plus continuum
pub fn base_setup() -> Value {
    json!({
        "ExomoonSource": false,
        "CLV_variations": false,
        "Architecture": {
            "R_star": 6.96e10, "M_star": 2.0e33, "R_0": 6.99e9, "M_p": 1.898e30, "a_p": 5.6e11
        },
        "Scenarios": {
            "escaping": { "q_esc": 5.0 }
        },
        "Lines": { "Na_D2": true, "Na_D1": true },
        "Species": {
            "escaping": { "sodium": { "chi": 1.0e31, "T_abs": 1000.0 } }
        },
        "Grids": {
            "wavelength": [5.88995e-5, 5.8e-5],
            "orbphase_border": 0.02, "orbphase_steps": 2,
            "x_border": 1.4e11, "x_steps": 30, "z_steps": 12, "phi_steps": 8
        }
    })
}

/// Write `setup` as `<dir>/<name>.json` and return the path
pub fn write_setup(dir: &Path, name: &str, setup: &Value) -> PathBuf {
    let path = dir.join(format!("{name}.json"));
    fs::write(&path, serde_json::to_string_pretty(setup).unwrap()).unwrap();
    path
}
