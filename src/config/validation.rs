//! Setup validation.
//!
//! Turns a deserialised [`SetupFile`] into a [`RunSetup`], rejecting missing
//! keys, non-physical values and inconsistent sections with the offending key
//! in the error.

use std::collections::BTreeMap;

use log::{debug, warn};

use super::{
    ConfigError, OutputSettings, RawArchitecture, RawGrids, RawLine, RawOutput, RawScenario, RawSpecies, RunSetup,
    SetupFile,
};
use crate::models::{Barometric, Escaping, Hydrostatic, MoonExosphere, ScenarioKind, Torus};
use crate::physics::constants::{catalogue_line, planet_preset, LINE_CATALOGUE};
use crate::physics::{Architecture, LimbDarkening, LineParameters, MoonOrbit, StellarRotation};
use crate::solver::{Grid, Scenario, ScenarioProfile, Species};

/// Validate a setup file and build the run description
pub fn validate_setup(raw: SetupFile) -> Result<RunSetup, ConfigError> {
    let architecture = build_architecture(&raw.architecture, raw.exomoon_source, raw.clv_variations)?;
    let (line_names, lines) = build_lines(&raw.lines)?;
    let scenarios = build_scenarios(&raw, &architecture, &lines)?;
    let grid = build_grid(&raw.grids)?;
    let output = build_output(raw.output)?;

    debug!(
        "Validated setup: {} scenarios, lines [{}]",
        scenarios.len(),
        line_names.join(", ")
    );

    Ok(RunSetup {
        name: None,
        architecture,
        scenarios,
        line_names,
        lines,
        grid,
        output,
    })
}

fn required(value: Option<f64>, key: &str) -> Result<f64, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingKey(key.to_string()))
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}

// =================================================================================================
// Architecture
// =================================================================================================

fn build_architecture(
    raw: &RawArchitecture,
    exomoon_source: bool,
    clv_variations: bool,
) -> Result<Architecture, ConfigError> {
    let preset = match &raw.preset {
        Some(name) => Some(
            planet_preset(name)
                .ok_or_else(|| invalid("Architecture.preset", format!("unknown preset `{name}`")))?,
        ),
        None => None,
    };

    let r_star = required(raw.r_star.or(preset.map(|p| p.r_star)), "Architecture.R_star")?;
    let m_star = required(raw.m_star, "Architecture.M_star")?;
    let r_0 = required(raw.r_0.or(preset.map(|p| p.r_0)), "Architecture.R_0")?;
    let m_p = required(raw.m_p.or(preset.map(|p| p.m_p)), "Architecture.M_p")?;
    let a_p = required(raw.a_p, "Architecture.a_p")?;

    let mut architecture =
        Architecture::new(r_star, m_star, r_0, m_p, a_p).map_err(|reason| invalid("Architecture", reason))?;

    if exomoon_source {
        let moon = MoonOrbit {
            radius: required(raw.r_moon, "Architecture.R_moon")?,
            semi_major_axis: required(raw.a_moon, "Architecture.a_moon")?,
            starting_phase: required(raw.orbphase_moon, "Architecture.orbphase_moon")?,
        };
        architecture = architecture
            .with_moon(moon)
            .map_err(|reason| invalid("Architecture.a_moon", reason))?;
    } else if raw.r_moon.is_some() || raw.a_moon.is_some() || raw.orbphase_moon.is_some() {
        warn!("Moon parameters are ignored because ExomoonSource is false");
    }

    if clv_variations {
        let u1 = required(raw.u1, "Architecture.u1")?;
        let u2 = required(raw.u2, "Architecture.u2")?;
        for (key, value) in [("Architecture.u1", u1), ("Architecture.u2", u2)] {
            if !value.is_finite() {
                return Err(invalid(key, format!("must be finite, got {value}")));
            }
        }
        let limb_darkening = LimbDarkening { u1, u2 };
        limb_darkening
            .validate()
            .map_err(|reason| invalid("Architecture.u1/u2", reason))?;
        architecture = architecture.with_limb_darkening(limb_darkening);
    } else if raw.u1.is_some() || raw.u2.is_some() {
        warn!("Limb darkening coefficients are ignored because CLV_variations is false");
    }

    if let Some(period) = raw.period_starrot {
        let rotation = StellarRotation {
            inclination: raw.inclination_starrot.unwrap_or(0.0),
            azimuth: raw.azimuth_starrot.unwrap_or(0.0),
            period,
        };
        architecture = architecture
            .with_stellar_rotation(rotation)
            .map_err(|reason| invalid("Architecture.period_starrot", reason))?;
    }

    if let Some(period) = raw.period_planetrot {
        architecture = architecture
            .with_planet_rotation(period)
            .map_err(|reason| invalid("Architecture.period_planetrot", reason))?;
    }

    Ok(architecture)
}

// =================================================================================================
// Lines
// =================================================================================================

fn build_lines(raw: &BTreeMap<String, RawLine>) -> Result<(Vec<String>, Vec<LineParameters>), ConfigError> {
    let mut names = Vec::new();
    let mut lines = Vec::new();

    for (name, entry) in raw {
        match entry {
            RawLine::Toggle(false) => continue,
            RawLine::Toggle(true) => {
                let line = catalogue_line(name).ok_or_else(|| ConfigError::UnknownLine(name.clone()))?;
                lines.push(line);
            }
            RawLine::Custom(params) => {
                let key = format!("Lines.{name}");
                for (field, value) in [
                    ("f", params.f),
                    ("lambda", params.lambda),
                    ("gamma", params.gamma),
                    ("mass", params.mass),
                ] {
                    if !(value.is_finite() && value > 0.0) {
                        return Err(invalid(&format!("{key}.{field}"), format!("must be strictly positive, got {value}")));
                    }
                }
                if params.species.trim().is_empty() {
                    return Err(invalid(&format!("{key}.species"), "must name a species"));
                }
                if LINE_CATALOGUE.iter().any(|(catalogued, ..)| *catalogued == name.as_str()) {
                    debug!("Line {name} overrides the catalogue entry");
                }

                lines.push(LineParameters {
                    oscillator_strength: params.f,
                    wavelength: params.lambda,
                    natural_width: params.gamma,
                    absorber_mass: params.mass,
                    species: params.species.clone(),
                });
            }
        }
        names.push(name.clone());
    }

    Ok((names, lines))
}

// =================================================================================================
// Scenarios
// =================================================================================================

fn build_scenarios(
    raw: &SetupFile,
    architecture: &Architecture,
    lines: &[LineParameters],
) -> Result<Vec<Scenario>, ConfigError> {
    let mut active = BTreeMap::new();
    for (name, params) in &raw.scenarios {
        let kind = ScenarioKind::from_name(name).ok_or_else(|| ConfigError::UnknownScenario(name.clone()))?;
        active.insert(kind.name(), params);
    }

    for name in raw.species.keys() {
        let kind = ScenarioKind::from_name(name).ok_or_else(|| ConfigError::UnknownScenario(name.clone()))?;
        if !active.contains_key(kind.name()) {
            return Err(ConfigError::InactiveScenario(name.clone()));
        }
    }

    let mut scenarios = Vec::new();
    for kind in ScenarioKind::ALL {
        let Some(&params) = active.get(kind.name()) else {
            continue;
        };

        if kind == ScenarioKind::Exomoon && architecture.moon.is_none() {
            return Err(invalid("Scenarios.exomoon", "requires ExomoonSource = true"));
        }

        let profile = build_profile(kind, params, architecture)?;
        let species = match raw.species.get(kind.name()) {
            Some(species) => build_species(kind, species, lines)?,
            None => Vec::new(),
        };

        if species.is_empty() && !params.rayleigh_scattering {
            warn!("Scenario {kind} has neither species nor Rayleigh scattering and does not absorb");
        }

        scenarios.push(Scenario::new(profile, species).with_rayleigh_scattering(params.rayleigh_scattering));
    }

    Ok(scenarios)
}

fn build_profile(
    kind: ScenarioKind,
    params: &RawScenario,
    architecture: &Architecture,
) -> Result<ScenarioProfile, ConfigError> {
    let key = |field: &str| format!("Scenarios.{kind}.{field}");
    let wrap = |reason: String| ConfigError::InvalidScenario {
        scenario: kind.to_string(),
        reason,
    };

    let profile = match kind {
        ScenarioKind::Barometric | ScenarioKind::Hydrostatic => {
            let temperature = required(params.temperature, &key("T"))?;
            let base_pressure = required(params.base_pressure, &key("P_0"))?;
            let mu = required(params.mu, &key("mu"))?;
            let (r_0, m_p) = (architecture.r_0, architecture.m_p);

            if kind == ScenarioKind::Barometric {
                ScenarioProfile::Barometric(Barometric::new(temperature, base_pressure, mu, r_0, m_p).map_err(wrap)?)
            } else {
                ScenarioProfile::Hydrostatic(Hydrostatic::new(temperature, base_pressure, mu, r_0, m_p).map_err(wrap)?)
            }
        }
        ScenarioKind::Escaping => {
            let exponent = required(params.q_esc, &key("q_esc"))?;
            ScenarioProfile::Escaping(Escaping::new(exponent, architecture.r_0).map_err(wrap)?)
        }
        ScenarioKind::Exomoon => {
            let exponent = required(params.q_moon, &key("q_moon"))?;
            let r_moon = architecture.moon.map_or(0.0, |moon| moon.radius);
            ScenarioProfile::Exomoon(MoonExosphere::new(exponent, r_moon).map_err(wrap)?)
        }
        ScenarioKind::Torus => {
            let a_torus = required(params.a_torus, &key("a_torus"))?;
            let v_ej = required(params.v_ej, &key("v_ej"))?;
            ScenarioProfile::Torus(Torus::new(a_torus, v_ej, architecture.m_p).map_err(wrap)?)
        }
    };

    Ok(profile)
}

fn build_species(
    kind: ScenarioKind,
    raw: &BTreeMap<String, RawSpecies>,
    lines: &[LineParameters],
) -> Result<Vec<Species>, ConfigError> {
    let mut species = Vec::new();

    for (name, params) in raw {
        let key = |field: &str| format!("Species.{kind}.{name}.{field}");
        let chi = required(params.chi, &key("chi"))?;
        let temperature = required(params.t_abs, &key("T_abs"))?;

        if !(chi.is_finite() && chi >= 0.0) {
            return Err(invalid(&key("chi"), format!("must be non-negative, got {chi}")));
        }
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(invalid(&key("T_abs"), format!("must be strictly positive, got {temperature}")));
        }
        if !lines.iter().any(|line| &line.species == name) {
            return Err(ConfigError::NoLines {
                scenario: kind.to_string(),
                species: name.clone(),
            });
        }

        species.push(Species::new(name.clone(), chi, temperature));
    }

    Ok(species)
}

// =================================================================================================
// Grids and output
// =================================================================================================

/// Largest accepted step count on any single axis
pub const MAX_STEPS: usize = 1 << 24;

fn steps(value: Option<f64>, key: &str) -> Result<usize, ConfigError> {
    let value = required(value, key)?;
    if !(value.is_finite() && value >= 1.0 && value.fract() == 0.0) {
        return Err(invalid(key, format!("must be a positive integer, got {value}")));
    }
    if value > MAX_STEPS as f64 {
        return Err(invalid(key, format!("must be at most {MAX_STEPS}, got {value}")));
    }
    Ok(value as usize)
}

fn build_grid(raw: &RawGrids) -> Result<Grid, ConfigError> {
    let wavelengths = raw
        .wavelength
        .clone()
        .ok_or_else(|| ConfigError::MissingKey("Grids.wavelength".to_string()))?;
    if wavelengths.is_empty() {
        return Err(invalid("Grids.wavelength", "must list at least one wavelength"));
    }

    let orbphase_border = required(raw.orbphase_border, "Grids.orbphase_border")?;
    let x_border = required(raw.x_border, "Grids.x_border")?;
    if !(x_border.is_finite() && x_border > 0.0) {
        return Err(invalid("Grids.x_border", format!("must be strictly positive, got {x_border}")));
    }

    let orbphase_steps = steps(raw.orbphase_steps, "Grids.orbphase_steps")?;
    let x_steps = steps(raw.x_steps, "Grids.x_steps")?;
    let z_steps = steps(raw.z_steps, "Grids.z_steps")?;
    let phi_steps = steps(raw.phi_steps, "Grids.phi_steps")?;

    Grid::new(wavelengths, orbphase_border, orbphase_steps, x_border, x_steps, z_steps, phi_steps)
        .map_err(|reason| invalid("Grids", reason))
}

fn build_output(raw: RawOutput) -> Result<OutputSettings, ConfigError> {
    let defaults = OutputSettings::default();
    if !raw.unknown.is_empty() {
        let keys: Vec<&str> = raw.unknown.keys().map(String::as_str).collect();
        warn!("Ignoring unknown Output keys: {}", keys.join(", "));
    }

    let precision = raw.precision.unwrap_or(defaults.precision);
    if precision > 17 {
        return Err(invalid("Output.precision", format!("at most 17 digits are meaningful, got {precision}")));
    }

    Ok(OutputSettings {
        path: raw.path,
        precision,
        include_metadata: raw.include_metadata,
    })
}
