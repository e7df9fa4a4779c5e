//! Line absorption and Rayleigh scattering
//!
//! # Line profile
//!
//! Each absorption line contributes
//!
//! ```text
//! σ(ν) = χ · π·e²/(m_e·c) · f · φ(ν)
//! ```
//!
//! where `φ` is the Voigt profile (frequency normalised) combining thermal
//! Doppler broadening, `σ_D = ν₀/c·sqrt(k_B·T/m)`, with the natural Lorentz
//! half width `γ = Γ/(4π)`:
//!
//! ```text
//! φ(ν) = Re w(z) / (σ_D·sqrt(2π)),    z = (ν − ν₀ + iγ) / (σ_D·sqrt(2))
//! ```
//!
//! `w` is the Faddeeva function, evaluated with Humlíček's (1982) rational
//! approximation (relative accuracy ~1e-4, ample for transit depths).
//!
//! # Rayleigh scattering
//!
//! Molecular hydrogen, Dalgarno & Williams (1962):
//! `σ = 8.14e-13/λ⁴ + 1.28e-6/λ⁶ + 1.61/λ⁸` with `λ` in Å, `σ` in cm².

use std::f64::consts::PI;

use nalgebra::{Complex, DVector};

use crate::physics::constants::{CM_TO_ANGSTROM, C_LIGHT, E_CHARGE, K_BOLTZMANN, M_ELECTRON};
use crate::physics::{AbsorptionModel, LineParameters};

/// Faddeeva function w(z) for Im z ≥ 0 (Humlíček W4)
pub fn faddeeva(z: Complex<f64>) -> Complex<f64> {
    let x = z.re;
    let y = z.im;
    let t = Complex::new(y, -x);
    let s = x.abs() + y;

    if s >= 15.0 {
        // Region I
        t * 0.5641896 / (t * t + 0.5)
    } else if s >= 5.5 {
        // Region II
        let u = t * t;
        t * (u * 0.5641896 + 1.410474) / (u * (u + 3.0) + 0.75)
    } else if y >= 0.195 * x.abs() - 0.176 {
        // Region III
        let numerator = (((t * 0.5642236 + 3.778987) * t + 11.96482) * t + 20.20933) * t + 16.4955;
        let denominator = ((((t + 6.699398) * t + 21.69274) * t + 39.27121) * t + 38.82363) * t + 16.4955;
        numerator / denominator
    } else {
        // Region IV
        let u = t * t;
        let c = |value: f64| Complex::new(value, 0.0);
        let numerator = c(36183.31)
            - u * (c(3321.9905)
                - u * (c(1540.787) - u * (c(219.0313) - u * (c(35.76683) - u * (c(1.320522) - u * 0.56419)))));
        let denominator = c(32066.6)
            - u * (c(24322.84)
                - u * (c(9022.228)
                    - u * (c(2186.181) - u * (c(364.2191) - u * (c(61.57037) - u * (c(1.841439) - u))))));
        u.exp() - t * numerator / denominator
    }
}

/// Frequency-normalised Voigt profile of one line at frequency `nu` \[Hz⁻¹\]
pub fn voigt_profile(nu: f64, line: &LineParameters, temperature: f64) -> f64 {
    let nu_0 = C_LIGHT / line.wavelength;
    let sigma_doppler = nu_0 / C_LIGHT * (K_BOLTZMANN * temperature / line.absorber_mass).sqrt();
    let gamma = line.natural_width / (4.0 * PI);

    let z = Complex::new(nu - nu_0, gamma) / (sigma_doppler * 2.0f64.sqrt());
    faddeeva(z).re / (sigma_doppler * (2.0 * PI).sqrt())
}

/// Voigt line absorption with H₂ Rayleigh scattering
#[derive(Debug, Clone, Copy, Default)]
pub struct VoigtAbsorption;

impl VoigtAbsorption {
    pub fn new() -> Self {
        Self
    }
}

impl AbsorptionModel for VoigtAbsorption {
    fn absorption_cross_section(
        &self,
        wavelengths: &DVector<f64>,
        chi: f64,
        temperature: f64,
        species: &str,
        lines: &[LineParameters],
    ) -> DVector<f64> {
        let prefactor = PI * E_CHARGE * E_CHARGE / (M_ELECTRON * C_LIGHT);

        let mut sigma = DVector::zeros(wavelengths.len());
        for line in lines.iter().filter(|line| line.species == species) {
            let strength = chi * prefactor * line.oscillator_strength;
            for (value, &wavelength) in sigma.iter_mut().zip(wavelengths.iter()) {
                *value += strength * voigt_profile(C_LIGHT / wavelength, line, temperature);
            }
        }

        sigma
    }

    fn rayleigh_scattering(&self, wavelengths: &DVector<f64>) -> DVector<f64> {
        wavelengths.map(|wavelength| {
            let angstrom = wavelength * CM_TO_ANGSTROM;
            8.14e-13 / angstrom.powi(4) + 1.28e-6 / angstrom.powi(6) + 1.61 / angstrom.powi(8)
        })
    }

    fn name(&self) -> &str {
        "Voigt lines + H2 Rayleigh"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::constants::catalogue_line;
    use approx::assert_relative_eq;

    fn sodium_lines() -> Vec<LineParameters> {
        vec![catalogue_line("Na_D2").unwrap(), catalogue_line("Na_D1").unwrap()]
    }

    #[test]
    fn test_faddeeva_at_origin() {
        let w = faddeeva(Complex::new(0.0, 0.0));
        assert_relative_eq!(w.re, 1.0, max_relative = 1e-3);
        assert!(w.im.abs() < 1e-3);
    }

    #[test]
    fn test_faddeeva_far_from_origin() {
        // w(z) → i/(√π·z) for large |z|
        let z = Complex::new(30.0, 1.0);
        let w = faddeeva(z);
        let asymptotic = Complex::new(0.0, 1.0 / PI.sqrt()) / z;
        assert_relative_eq!(w.re, asymptotic.re, max_relative = 1e-2);
        assert_relative_eq!(w.im, asymptotic.im, max_relative = 1e-2);
    }

    #[test]
    fn test_voigt_profile_is_normalised() {
        let line = catalogue_line("Na_D2").unwrap();
        let nu_0 = C_LIGHT / line.wavelength;
        let sigma_doppler = nu_0 / C_LIGHT * (K_BOLTZMANN * 1000.0 / line.absorber_mass).sqrt();

        let steps = 200_000;
        let half_range = 2000.0 * sigma_doppler;
        let d_nu = 2.0 * half_range / steps as f64;
        let total: f64 = (0..steps)
            .map(|i| voigt_profile(nu_0 - half_range + (i as f64 + 0.5) * d_nu, &line, 1000.0) * d_nu)
            .sum();

        assert_relative_eq!(total, 1.0, max_relative = 1e-2);
    }

    #[test]
    fn test_cross_section_peaks_at_line_centre() {
        let model = VoigtAbsorption::new();
        let wavelengths = DVector::from_vec(vec![5880.0e-8, 5889.95e-8, 5892.9e-8]);
        let sigma = model.absorption_cross_section(&wavelengths, 1.0, 1000.0, "sodium", &sodium_lines());

        assert!(sigma[1] > sigma[0]);
        assert!(sigma[1] > sigma[2]);
        assert!(sigma.iter().all(|s| *s >= 0.0));
    }

    #[test]
    fn test_cross_section_scales_with_chi() {
        let model = VoigtAbsorption::new();
        let wavelengths = DVector::from_vec(vec![5889.95e-8]);
        let one = model.absorption_cross_section(&wavelengths, 1.0, 1000.0, "sodium", &sodium_lines());
        let ten = model.absorption_cross_section(&wavelengths, 10.0, 1000.0, "sodium", &sodium_lines());
        assert_relative_eq!(ten[0], 10.0 * one[0], max_relative = 1e-12);
    }

    #[test]
    fn test_other_species_do_not_absorb() {
        let model = VoigtAbsorption::new();
        let wavelengths = DVector::from_vec(vec![5889.95e-8]);
        let sigma = model.absorption_cross_section(&wavelengths, 1.0, 1000.0, "potassium", &sodium_lines());
        assert_eq!(sigma[0], 0.0);
    }

    #[test]
    fn test_rayleigh_decreases_with_wavelength() {
        let model = VoigtAbsorption::new();
        let wavelengths = DVector::from_vec(vec![4000e-8, 6000e-8, 8000e-8]);
        let sigma = model.rayleigh_scattering(&wavelengths);

        assert!(sigma[0] > sigma[1]);
        assert!(sigma[1] > sigma[2]);
        // ~7e-28 cm² for H₂ at 6000 Å
        assert!(sigma[1] > 1e-28 && sigma[1] < 1e-26);
    }
}
