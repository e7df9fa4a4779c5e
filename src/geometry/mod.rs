//! Transit geometry
//!
//! Positions and velocities of the planet and the moon as functions of the
//! orbital phase, and the coordinate transforms between the chord-sampling
//! frame and the frames the density profiles are evaluated in.
//!
//! # Frames
//!
//! The chord-sampling frame is centred on the planet along the line of sight:
//! the planet always sits at `x = 0`, the observer looks along `+x`, and a
//! chord is labelled by its azimuth `phi` and impact parameter `rho` on the
//! stellar disk:
//!
//! ```text
//! y = rho·sin(phi)
//! z = rho·cos(phi)
//! ```
//!
//! The actual offset of the planet from the star along the line of sight is
//! `x_p = a_p·cos(phase)`; it only decides whether a sample lies in front of
//! or behind the star.
//!
//! # Example
//!
//! ```rust
//! use transit_rs::geometry::Geometry;
//! use transit_rs::physics::Architecture;
//!
//! let architecture = Architecture::new(7e10, 2e33, 7e9, 1.9e30, 5e11).unwrap();
//! let geometry = Geometry::new(&architecture);
//!
//! let (x_p, y_p) = geometry.planet_position(0.0);
//! assert_eq!(x_p, 5e11);
//! assert_eq!(y_p, 0.0);
//! ```

use std::f64::consts::PI;

use nalgebra::Vector3;
use ndarray::Array2;

use crate::models::ScenarioKind;
use crate::physics::Architecture;
use crate::physics::constants::G_GRAV;

/// Convert chord-frame cylindrical coordinates into Cartesian ones
///
/// Returns `(x, rho·sin(phi), rho·cos(phi))`.
#[inline]
pub fn cylinder_to_cartesian(x: f64, phi: f64, rho: f64) -> (f64, f64, f64) {
    let (sin_phi, cos_phi) = phi.sin_cos();
    (x, rho * sin_phi, rho * cos_phi)
}

// =================================================================================================
// Body frame at a fixed phase
// =================================================================================================

/// Positions of the planet and the moon at one orbital phase
///
/// Built once per phase by [`Geometry::frame`] so that the per-sample
/// distance functions do not recompute trigonometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFrame {
    /// Planet offset from the star along the line of sight \[cm\]
    pub x_p: f64,
    /// Planet offset from the star across the line of sight \[cm\]
    pub y_p: f64,
    /// Moon position `(x relative to the planet, y)` \[cm\]
    pub moon: Option<(f64, f64)>,
    /// Reference radius of the planet \[cm\]
    pub r_0: f64,
    /// Moon radius \[cm\]
    pub r_moon: f64,
}

impl BodyFrame {
    /// Distance of a Cartesian sample from the planet centre
    #[inline]
    pub fn distance_from_planet(&self, x: f64, y: f64, z: f64) -> f64 {
        let dy = y - self.y_p;
        (x * x + dy * dy + z * z).sqrt()
    }

    /// Distance of a Cartesian sample from the moon centre
    #[inline]
    pub fn distance_from_moon(&self, x: f64, y: f64, z: f64) -> Option<f64> {
        self.moon.map(|(x_moon, y_moon)| {
            let dx = x - x_moon;
            let dy = y - y_moon;
            (dx * dx + dy * dy + z * z).sqrt()
        })
    }

    /// Torus coordinates `(a, z)` of a Cartesian sample around the planet
    #[inline]
    pub fn torus_coordinates(&self, x: f64, y: f64, z: f64) -> (f64, f64) {
        let dy = y - self.y_p;
        ((x * x + dy * dy).sqrt(), z)
    }

    /// Whether the chord through `(y, z)` crosses the planet's disk
    #[inline]
    pub fn planet_blocks(&self, y: f64, z: f64) -> bool {
        let dy = y - self.y_p;
        (dy * dy + z * z).sqrt() < self.r_0
    }

    /// Whether the chord through `(y, z)` crosses the moon's disk
    #[inline]
    pub fn moon_blocks(&self, y: f64, z: f64) -> bool {
        match self.moon {
            Some((_, y_moon)) => {
                let dy = y - y_moon;
                dy * dy + z * z < self.r_moon * self.r_moon
            }
            None => false,
        }
    }

    /// Whether a line-of-sight sample lies behind the star
    #[inline]
    pub fn behind_star(&self, x: f64) -> bool {
        x + self.x_p < 0.0
    }
}

// =================================================================================================
// Geometry
// =================================================================================================

/// Geometry of one star–planet(–moon) system
///
/// Stateless apart from the borrowed architecture: every method is a pure
/// function of its arguments.
#[derive(Debug, Clone, Copy)]
pub struct Geometry<'a> {
    architecture: &'a Architecture,
}

impl<'a> Geometry<'a> {
    pub fn new(architecture: &'a Architecture) -> Self {
        Self { architecture }
    }

    /// Get the architecture
    pub fn architecture(&self) -> &Architecture {
        self.architecture
    }

    /// Planet position `(x_p, y_p)` relative to the star on a circular orbit
    ///
    /// `x_p = a_p·cos(phase)` is the offset along the line of sight (the
    /// planet itself is always at `x = 0` in the chord frame),
    /// `y_p = a_p·sin(phase)`.
    pub fn planet_position(&self, phase: f64) -> (f64, f64) {
        let a_p = self.architecture.a_p;
        let (sin_phase, cos_phase) = phase.sin_cos();
        (a_p * cos_phase, a_p * sin_phase)
    }

    /// Orbital phase of the moon at planetary phase `phase`
    ///
    /// Kepler's third law for massless points on circular orbits:
    /// `phase_moon = phase₀ + phase·sqrt(a_p³·M_p / (a_moon³·M_star))`.
    /// `None` without a moon.
    pub fn moon_orbital_phase(&self, phase: f64) -> Option<f64> {
        let arch = self.architecture;
        arch.moon.map(|moon| {
            let ratio = (arch.a_p.powi(3) * arch.m_p)
                / (moon.semi_major_axis.powi(3) * arch.m_star);
            moon.starting_phase + phase * ratio.sqrt()
        })
    }

    /// Moon position `(x_moon, y_moon)`
    ///
    /// `x_moon` is measured from the planet (which sits at `x = 0`),
    /// `y_moon` from the star like `y_p`.
    pub fn moon_position(&self, phase: f64) -> Option<(f64, f64)> {
        let moon = self.architecture.moon?;
        let phase_moon = self.moon_orbital_phase(phase)?;
        let (_, y_p) = self.planet_position(phase);
        let (sin_moon, cos_moon) = phase_moon.sin_cos();

        Some((
            moon.semi_major_axis * cos_moon,
            y_p + moon.semi_major_axis * sin_moon,
        ))
    }

    /// Positions of all bodies at one phase
    pub fn frame(&self, phase: f64) -> BodyFrame {
        let (x_p, y_p) = self.planet_position(phase);
        BodyFrame {
            x_p,
            y_p,
            moon: self.moon_position(phase),
            r_0: self.architecture.r_0,
            r_moon: self.architecture.moon.map_or(0.0, |moon| moon.radius),
        }
    }

    /// Line-of-sight velocity of the absorbing body in the stellar frame \[cm/s\]
    ///
    /// The planet's orbital velocity projected on the line of sight; for the
    /// exomoon scenario the moon's orbital velocity around the planet adds.
    pub fn line_of_sight_velocity(&self, phase: f64, kind: ScenarioKind) -> f64 {
        let arch = self.architecture;
        let mut v_los = -phase.sin() * (G_GRAV * arch.m_star / arch.a_p).sqrt();

        if kind == ScenarioKind::Exomoon
            && let (Some(moon), Some(phase_moon)) = (arch.moon, self.moon_orbital_phase(phase))
        {
            v_los -= phase_moon.sin() * (G_GRAV * arch.m_p / moon.semi_major_axis).sqrt();
        }

        v_los
    }

    /// Line-of-sight velocity from rigid planetary rotation \[cm/s\]
    ///
    /// `2π/P·(rho·sin(phi) − y_p)` for the atmospheric scenarios (barometric,
    /// hydrostatic, escaping); zero for the others and when no rotation
    /// period is configured.
    pub fn planet_rotation_velocity(&self, phi: f64, rho: f64, phase: f64, kind: ScenarioKind) -> f64 {
        match (kind.is_atmospheric(), self.architecture.planet_rotation_period) {
            (true, Some(period)) => {
                let (_, y_p) = self.planet_position(phase);
                2.0 * PI / period * (rho * phi.sin() - y_p)
            }
            _ => 0.0,
        }
    }

    /// Distance of a chord-frame sample from the planet centre
    pub fn distance_from_planet(&self, x: f64, phi: f64, rho: f64, phase: f64) -> f64 {
        let (x, y, z) = cylinder_to_cartesian(x, phi, rho);
        self.frame(phase).distance_from_planet(x, y, z)
    }

    /// Distance of a chord-frame sample from the moon centre
    pub fn distance_from_moon(&self, x: f64, phi: f64, rho: f64, phase: f64) -> Option<f64> {
        let (x, y, z) = cylinder_to_cartesian(x, phi, rho);
        self.frame(phase).distance_from_moon(x, y, z)
    }

    /// Torus coordinates `(a, z)` of a chord-frame sample
    pub fn torus_coordinates(&self, x: f64, phi: f64, rho: f64, phase: f64) -> (f64, f64) {
        let (x, y, z) = cylinder_to_cartesian(x, phi, rho);
        self.frame(phase).torus_coordinates(x, y, z)
    }

    /// Line-of-sight velocity of the visible stellar surface \[cm/s\]
    ///
    /// Indexed `[phi, rho]`: the x component of `Ω × r_surface` where
    /// `r_surface = (sqrt(R² − rho²), rho·sin(phi), rho·cos(phi))`. `None`
    /// when no stellar rotation is configured.
    pub fn stellar_surface_los_velocity(&self, phi: &[f64], rho: &[f64]) -> Option<Array2<f64>> {
        let rotation = self.architecture.stellar_rotation?;
        let r_star = self.architecture.r_star;

        let (sin_i, cos_i) = rotation.inclination.sin_cos();
        let (sin_az, cos_az) = rotation.azimuth.sin_cos();
        let omega = 2.0 * PI / rotation.period * Vector3::new(-sin_i * cos_az, -sin_i * sin_az, cos_i);

        let mut v_los = Array2::zeros((phi.len(), rho.len()));
        for (i, &phi_i) in phi.iter().enumerate() {
            for (j, &rho_j) in rho.iter().enumerate() {
                let (_, y, z) = cylinder_to_cartesian(0.0, phi_i, rho_j);
                let surface = Vector3::new((r_star * r_star - rho_j * rho_j).sqrt(), y, z);
                v_los[[i, j]] = omega.cross(&surface).x;
            }
        }

        Some(v_los)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{MoonOrbit, StellarRotation};
    use approx::assert_relative_eq;

    fn create_architecture() -> Architecture {
        Architecture::new(7e10, 2e33, 7e9, 2e30, 5e11).unwrap()
    }

    fn create_moon_architecture() -> Architecture {
        create_architecture()
            .with_moon(MoonOrbit {
                radius: 2e8,
                semi_major_axis: 3e10,
                starting_phase: 0.0,
            })
            .unwrap()
    }

    #[test]
    fn test_cylinder_to_cartesian() {
        let (x, y, z) = cylinder_to_cartesian(1.0, PI / 2.0, 2.0);
        assert_eq!(x, 1.0);
        assert_relative_eq!(y, 2.0);
        assert!(z.abs() < 1e-12);
    }

    #[test]
    fn test_planet_position_at_mid_transit() {
        let arch = create_architecture();
        let (x_p, y_p) = Geometry::new(&arch).planet_position(0.0);
        assert_eq!(x_p, arch.a_p);
        assert_eq!(y_p, 0.0);
    }

    #[test]
    fn test_planet_position_is_on_orbit() {
        let arch = create_architecture();
        let (x_p, y_p) = Geometry::new(&arch).planet_position(0.3);
        assert_relative_eq!(x_p.hypot(y_p), arch.a_p, max_relative = 1e-12);
        assert!(y_p > 0.0);
    }

    #[test]
    fn test_moon_phase_follows_kepler() {
        let arch = create_moon_architecture();
        let geometry = Geometry::new(&arch);
        let moon = arch.moon.unwrap();

        let expected_rate = ((arch.a_p.powi(3) * arch.m_p) / (moon.semi_major_axis.powi(3) * arch.m_star)).sqrt();
        let phase_moon = geometry.moon_orbital_phase(0.1).unwrap();
        assert_relative_eq!(phase_moon, 0.1 * expected_rate, max_relative = 1e-12);
    }

    #[test]
    fn test_no_moon_means_no_moon_position() {
        let arch = create_architecture();
        let geometry = Geometry::new(&arch);
        assert!(geometry.moon_orbital_phase(0.1).is_none());
        assert!(geometry.moon_position(0.1).is_none());
        assert!(!geometry.frame(0.0).moon_blocks(0.0, 0.0));
    }

    #[test]
    fn test_moon_position_relative_to_planet() {
        let arch = create_moon_architecture();
        let geometry = Geometry::new(&arch);
        let (x_moon, y_moon) = geometry.moon_position(0.0).unwrap();
        assert_eq!(x_moon, 3e10);
        assert_eq!(y_moon, 0.0);
    }

    #[test]
    fn test_line_of_sight_velocity() {
        let arch = create_moon_architecture();
        let geometry = Geometry::new(&arch);

        assert_eq!(geometry.line_of_sight_velocity(0.0, ScenarioKind::Barometric), 0.0);

        let v_orbit = (G_GRAV * arch.m_star / arch.a_p).sqrt();
        let v_planet = geometry.line_of_sight_velocity(-PI / 2.0, ScenarioKind::Escaping);
        assert_relative_eq!(v_planet, v_orbit, max_relative = 1e-12);

        let v_moon = geometry.line_of_sight_velocity(0.2, ScenarioKind::Exomoon);
        let v_body = geometry.line_of_sight_velocity(0.2, ScenarioKind::Torus);
        assert_ne!(v_moon, v_body);
    }

    #[test]
    fn test_planet_rotation_velocity() {
        let arch = create_architecture().with_planet_rotation(1e5).unwrap();
        let geometry = Geometry::new(&arch);

        let v = geometry.planet_rotation_velocity(PI / 2.0, 1e9, 0.0, ScenarioKind::Hydrostatic);
        assert_relative_eq!(v, 2.0 * PI / 1e5 * 1e9, max_relative = 1e-12);

        assert_eq!(geometry.planet_rotation_velocity(PI / 2.0, 1e9, 0.0, ScenarioKind::Torus), 0.0);
    }

    #[test]
    fn test_planet_rotation_velocity_without_period() {
        let arch = create_architecture();
        let geometry = Geometry::new(&arch);
        assert_eq!(geometry.planet_rotation_velocity(1.0, 1e9, 0.0, ScenarioKind::Barometric), 0.0);
    }

    #[test]
    fn test_distances() {
        let arch = create_moon_architecture();
        let geometry = Geometry::new(&arch);

        assert_relative_eq!(geometry.distance_from_planet(3.0, 0.0, 4.0, 0.0), 5.0);

        let r_moon = geometry.distance_from_moon(3e10, 0.0, 0.0, 0.0).unwrap();
        assert!(r_moon < 1e-3);

        let (a, z) = geometry.torus_coordinates(3.0, PI / 2.0, 4.0, 0.0);
        assert_relative_eq!(a, 5.0);
        assert!(z.abs() < 1e-12);
    }

    #[test]
    fn test_blocking_and_far_side() {
        let arch = create_architecture();
        let frame = Geometry::new(&arch).frame(0.0);

        assert!(frame.planet_blocks(0.0, 0.5 * arch.r_0));
        assert!(!frame.planet_blocks(0.0, 1.5 * arch.r_0));
        assert!(frame.behind_star(-arch.a_p - 1.0));
        assert!(!frame.behind_star(0.0));
    }

    #[test]
    fn test_stellar_surface_velocity() {
        let arch = create_architecture()
            .with_stellar_rotation(StellarRotation {
                inclination: 0.0,
                azimuth: 0.0,
                period: 1e6,
            })
            .unwrap();
        let geometry = Geometry::new(&arch);

        let phi = [PI / 2.0, 3.0 * PI / 2.0];
        let rho = [0.0, 0.5 * arch.r_star];
        let v = geometry.stellar_surface_los_velocity(&phi, &rho).unwrap();

        assert_eq!(v.shape(), &[2, 2]);
        // Disk centre moves perpendicular to the line of sight
        assert!(v[[0, 0]].abs() < 1e-9);
        // Opposite limbs recede and approach symmetrically
        assert_relative_eq!(v[[0, 1]], -v[[1, 1]], max_relative = 1e-9);
        assert_relative_eq!(v[[0, 1]].abs(), 2.0 * PI / 1e6 * 0.5 * arch.r_star, max_relative = 1e-9);
    }

    #[test]
    fn test_stellar_surface_velocity_without_rotation() {
        let arch = create_architecture();
        assert!(Geometry::new(&arch).stellar_surface_los_velocity(&[0.0], &[0.0]).is_none());
    }
}
