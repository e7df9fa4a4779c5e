//! Physical constants and tables (cgs units)
//!
//! Natural constants, the catalogue of absorption lines the absorption model
//! knows about, and a few named planetary systems that can seed an
//! [`Architecture`](crate::physics::Architecture).

// =================================================================================================
// Natural constants
// =================================================================================================

/// Elementary charge \[esu\]
pub const E_CHARGE: f64 = 4.803e-10;

/// Electron mass \[g\]
pub const M_ELECTRON: f64 = 9.109e-28;

/// Speed of light \[cm/s\]
pub const C_LIGHT: f64 = 2.998e10;

/// Gravitational constant \[cm³ g⁻¹ s⁻²\]
pub const G_GRAV: f64 = 6.674e-8;

/// Boltzmann constant \[erg/K\]
pub const K_BOLTZMANN: f64 = 1.381e-16;

/// Atomic mass unit \[g\]
pub const AMU: f64 = 1.661e-24;

/// Jupiter radius \[cm\]
pub const R_JUPITER: f64 = 6.99e9;

/// Jupiter mass \[g\]
pub const M_JUPITER: f64 = 1.898e30;

/// Earth mass \[g\]
pub const M_EARTH: f64 = 5.974e27;

/// Solar radius \[cm\]
pub const R_SUN: f64 = 6.96e10;

/// Solar mass \[g\]
pub const M_SUN: f64 = 1.989e33;

/// Io radius \[cm\]
pub const R_IO: f64 = 1.822e8;

/// Potassium atom mass \[g\]
pub const M_POTASSIUM: f64 = 39.0983 * AMU;

/// Sodium atom mass \[g\]
pub const M_SODIUM: f64 = 22.99 * AMU;

/// Euler–Mascheroni constant
pub const EULER_MASCHERONI: f64 = 0.57721;

/// Centimetres to ångström
pub const CM_TO_ANGSTROM: f64 = 1e8;

// =================================================================================================
// Absorption lines
// =================================================================================================

/// Parameters of a single absorption line
#[derive(Debug, Clone, PartialEq)]
pub struct LineParameters {
    /// Oscillator strength
    pub oscillator_strength: f64,
    /// Vacuum wavelength \[cm\]
    pub wavelength: f64,
    /// Natural linewidth times 2π \[Hz\]
    pub natural_width: f64,
    /// Mass of the absorber \[g\]
    pub absorber_mass: f64,
    /// Name of the absorbing species (e.g. `"sodium"`)
    pub species: String,
}

/// Built-in line catalogue: (name, f, λ\[cm\], Γ·2π\[Hz\], mass\[g\], species)
///
/// Na D lines: Draine 2011, Steck 2000. K D lines: Draine 2011, Tiecke 2011.
pub const LINE_CATALOGUE: &[(&str, f64, f64, f64, f64, &str)] = &[
    ("Na_D2", 0.641, 5889.95e-8, 3.833e8, M_SODIUM, "sodium"),
    ("Na_D1", 0.3199, 5895.92e-8, 3.855e8, M_SODIUM, "sodium"),
    ("K_D2", 0.682, 7667.01e-8, 2.3825e8, M_POTASSIUM, "potassium"),
    ("K_D1", 0.34, 7701.08e-8, 2.3513e8, M_POTASSIUM, "potassium"),
];

/// Look up a catalogue line by name
pub fn catalogue_line(name: &str) -> Option<LineParameters> {
    LINE_CATALOGUE
        .iter()
        .find(|(line, ..)| *line == name)
        .map(|&(_, f, wavelength, width, mass, species)| LineParameters {
            oscillator_strength: f,
            wavelength,
            natural_width: width,
            absorber_mass: mass,
            species: species.to_string(),
        })
}

// =================================================================================================
// Planet presets
// =================================================================================================

/// Named planetary system: stellar radius, reference radius and planetary mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetPreset {
    pub name: &'static str,
    /// Stellar radius \[cm\]
    pub r_star: f64,
    /// Reference (planet) radius \[cm\]
    pub r_0: f64,
    /// Planetary mass \[g\]
    pub m_p: f64,
}

/// WASP-49b: Wyttenbach et al. 2017. HD189733b: Wyttenbach et al. 2015.
pub const PLANET_PRESETS: &[PlanetPreset] = &[
    PlanetPreset {
        name: "WASP-49b",
        r_star: 1.038 * R_SUN,
        r_0: 1.198 * R_JUPITER,
        m_p: 0.399 * M_JUPITER,
    },
    PlanetPreset {
        name: "HD189733b",
        r_star: 0.756 * R_SUN,
        r_0: 1.138 * R_JUPITER,
        m_p: 1.138 * M_JUPITER,
    },
];

/// Look up a planet preset by name
pub fn planet_preset(name: &str) -> Option<&'static PlanetPreset> {
    PLANET_PRESETS.iter().find(|preset| preset.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_lookup() {
        let d2 = catalogue_line("Na_D2").unwrap();
        assert_eq!(d2.species, "sodium");
        assert_eq!(d2.wavelength, 5889.95e-8);
        assert!(catalogue_line("Fe_I").is_none());
    }

    #[test]
    fn test_planet_preset_lookup() {
        let wasp = planet_preset("WASP-49b").unwrap();
        assert!(wasp.r_star > wasp.r_0);
        assert!(planet_preset("Kepler-1b").is_none());
    }
}
