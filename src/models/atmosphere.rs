//! Bound atmospheres around the planet
//!
//! Two isothermal profiles anchored at the reference radius `R_0` with the
//! base pressure `P_0`:
//!
//! - [`Barometric`]: constant gravity, `n = P_0/(k_B T)·exp(−(r − R_0)/H)`
//!   with the scale height `H = k_B·T·R_0²/(μ·amu·G·M_p)`
//! - [`Hydrostatic`]: gravity falling off as `1/r²`,
//!   `n = P_0/(k_B T)·exp(λ₀(R_0/r − 1))` with the Jeans parameter
//!   `λ₀ = G·M_p·μ·amu/(k_B·T·R_0)`
//!
//! Both return the total gas number density; the species mixing ratio enters
//! through the absorption cross section.

use crate::physics::constants::{AMU, G_GRAV, K_BOLTZMANN};
use crate::physics::{DensityProfile, SampleCoordinates};

/// Validate the shared isothermal parameters
fn validate_isothermal(temperature: f64, base_pressure: f64, mu: f64, r_0: f64, m_p: f64) -> Result<(), String> {
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(format!("temperature must be strictly positive, got {temperature}."));
    }
    if !(base_pressure.is_finite() && base_pressure >= 0.0) {
        return Err(format!("base pressure must be non-negative, got {base_pressure}."));
    }
    if !(mu.is_finite() && mu > 0.0) {
        return Err(format!("mean molecular weight must be strictly positive, got {mu}."));
    }
    if !(r_0.is_finite() && r_0 > 0.0) {
        return Err(format!("an atmosphere needs a strictly positive reference radius, got {r_0}."));
    }
    if !(m_p.is_finite() && m_p > 0.0) {
        return Err(format!("planetary mass must be strictly positive, got {m_p}."));
    }
    Ok(())
}

// =================================================================================================
// Barometric
// =================================================================================================

/// Isothermal atmosphere with constant gravity
#[derive(Debug, Clone, PartialEq)]
pub struct Barometric {
    /// Reference radius R_0 \[cm\]
    r_0: f64,
    /// Number density at R_0 \[cm⁻³\]
    base_density: f64,
    /// Scale height H \[cm\]
    scale_height: f64,
}

impl Barometric {
    /// Creates a barometric atmosphere
    ///
    /// # Arguments
    ///
    /// * `temperature` - Isothermal temperature T \[K\]
    /// * `base_pressure` - Pressure at the reference radius P_0 \[dyn/cm²\]
    /// * `mu` - Mean molecular weight \[amu\]
    /// * `r_0` - Reference radius \[cm\]
    /// * `m_p` - Planetary mass \[g\]
    pub fn new(temperature: f64, base_pressure: f64, mu: f64, r_0: f64, m_p: f64) -> Result<Self, String> {
        validate_isothermal(temperature, base_pressure, mu, r_0, m_p)?;

        let base_density = base_pressure / (K_BOLTZMANN * temperature);
        let scale_height = K_BOLTZMANN * temperature * r_0 * r_0 / (mu * AMU * G_GRAV * m_p);

        Ok(Self {
            r_0,
            base_density,
            scale_height,
        })
    }

    /// Get scale height \[cm\]
    pub fn scale_height(&self) -> f64 {
        self.scale_height
    }
}

impl DensityProfile for Barometric {
    fn number_density(&self, coords: SampleCoordinates) -> f64 {
        let r = coords.radius();
        self.base_density * (-(r - self.r_0) / self.scale_height).exp()
    }

    fn name(&self) -> &str {
        "barometric"
    }

    fn description(&self) -> Option<&str> {
        Some("Isothermal atmosphere, constant gravity")
    }
}

// =================================================================================================
// Hydrostatic
// =================================================================================================

/// Isothermal atmosphere in hydrostatic equilibrium with 1/r² gravity
#[derive(Debug, Clone, PartialEq)]
pub struct Hydrostatic {
    r_0: f64,
    base_density: f64,
    /// Jeans escape parameter at R_0
    lambda_0: f64,
}

impl Hydrostatic {
    /// Creates a hydrostatic atmosphere (same arguments as [`Barometric::new`])
    pub fn new(temperature: f64, base_pressure: f64, mu: f64, r_0: f64, m_p: f64) -> Result<Self, String> {
        validate_isothermal(temperature, base_pressure, mu, r_0, m_p)?;

        let base_density = base_pressure / (K_BOLTZMANN * temperature);
        let lambda_0 = G_GRAV * m_p * mu * AMU / (K_BOLTZMANN * temperature * r_0);

        Ok(Self {
            r_0,
            base_density,
            lambda_0,
        })
    }

    /// Get the Jeans parameter at the reference radius
    pub fn jeans_parameter(&self) -> f64 {
        self.lambda_0
    }
}

impl DensityProfile for Hydrostatic {
    fn number_density(&self, coords: SampleCoordinates) -> f64 {
        let r = coords.radius();
        self.base_density * (self.lambda_0 * (self.r_0 / r - 1.0)).exp()
    }

    fn name(&self) -> &str {
        "hydrostatic"
    }

    fn description(&self) -> Option<&str> {
        Some("Isothermal atmosphere, 1/r² gravity")
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::constants::{M_JUPITER, R_JUPITER};
    use approx::assert_relative_eq;

    fn create_barometric() -> Barometric {
        Barometric::new(1000.0, 1e3, 2.3, R_JUPITER, M_JUPITER).unwrap()
    }

    fn create_hydrostatic() -> Hydrostatic {
        Hydrostatic::new(1000.0, 1e3, 2.3, R_JUPITER, M_JUPITER).unwrap()
    }

    #[test]
    fn test_barometric_base_density() {
        let model = create_barometric();
        let n_0 = model.number_density(SampleCoordinates::Radial(R_JUPITER));
        assert_relative_eq!(n_0, 1e3 / (K_BOLTZMANN * 1000.0), max_relative = 1e-12);
    }

    #[test]
    fn test_barometric_decays_by_e_per_scale_height() {
        let model = create_barometric();
        let h = model.scale_height();
        let n_0 = model.number_density(SampleCoordinates::Radial(R_JUPITER));
        let n_1 = model.number_density(SampleCoordinates::Radial(R_JUPITER + h));
        assert_relative_eq!(n_1 / n_0, (-1.0f64).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_hydrostatic_decreases_outward() {
        let model = create_hydrostatic();
        let n_near = model.number_density(SampleCoordinates::Radial(1.01 * R_JUPITER));
        let n_far = model.number_density(SampleCoordinates::Radial(1.1 * R_JUPITER));
        assert!(n_near > n_far);
        assert!(n_far > 0.0);
    }

    #[test]
    fn test_hydrostatic_matches_barometric_near_surface() {
        let barometric = create_barometric();
        let hydrostatic = create_hydrostatic();
        let r = R_JUPITER + 0.1 * barometric.scale_height();

        let ratio = hydrostatic.number_density(SampleCoordinates::Radial(r))
            / barometric.number_density(SampleCoordinates::Radial(r));
        assert_relative_eq!(ratio, 1.0, max_relative = 1e-3);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Barometric::new(0.0, 1e3, 2.3, R_JUPITER, M_JUPITER).is_err());
        assert!(Barometric::new(1000.0, 1e3, 2.3, 0.0, M_JUPITER).is_err());
        assert!(Hydrostatic::new(1000.0, -1.0, 2.3, R_JUPITER, M_JUPITER).is_err());
        assert!(Hydrostatic::new(1000.0, 1e3, 0.0, R_JUPITER, M_JUPITER).is_err());
    }
}
