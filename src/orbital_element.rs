//! # Classical orbital elements
//!
//! This module defines the [`OrbitalElements`] struct, the perihelion-based
//! element set used throughout `apsis`:
//!
//! 1. **q** – Perihelion distance (km)
//! 2. **e** – Eccentricity (unitless, ≥ 0)
//! 3. **i** – Inclination (radians, [0, π])
//! 4. **Ω** – Longitude of ascending node (radians, [0, 2π))
//! 5. **ω** – Argument of perihelion (radians, [0, 2π))
//! 6. **M** – Mean anomaly at epoch (radians)
//!
//! together with the reference epoch, the gravitational parameter used for
//! the conversion, and the reference frame tag. The perihelion distance is
//! used instead of the semi-major axis so that hyperbolic solutions carry no
//! sign surprises; the signed `a = q/(1−e)` is available as a derived
//! quantity.
//!
//! ## Degeneracies
//!
//! Classical elements are singular for circular (`e → 0`, ω undefined) and
//! equatorial (`i → 0` or `i → π`, Ω undefined) geometries. The conversion
//! routines resolve both by convention (`ω = 0`, `Ω = 0`) and record which
//! convention fired in [`DegeneracyFlags`], so downstream consumers can tell
//! a measured zero from a defaulted one.
//!
//! ## Units
//!
//! - Lengths: **km**
//! - Angles: **radians**
//! - Time: **ephemeris seconds past J2000 (TDB)**
//! - Gravitational parameter: **km³/s²**

use std::fmt;

use crate::apsis_errors::ApsisError;
use crate::constants::{Et, Kilometer, Radian, DPI};
use crate::kepler::{elements_to_state, principal_angle};
use crate::ref_system::RefFrame;
use crate::state_vector::StateVector;

/// Eccentricities within this distance of 1 are treated as parabolic.
pub(crate) const PARABOLIC_TOL: f64 = 1e-12;

/// Conic classification by eccentricity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrbitClass {
    Elliptic,
    Parabolic,
    Hyperbolic,
}

impl OrbitClass {
    /// Classify an orbit from its eccentricity.
    ///
    /// `|e − 1| < 1e-12` is treated as parabolic: the semi-major axis is not
    /// finite there and both anomaly formulations break down.
    pub fn from_eccentricity(eccentricity: f64) -> Self {
        if (eccentricity - 1.0).abs() < PARABOLIC_TOL {
            OrbitClass::Parabolic
        } else if eccentricity < 1.0 {
            OrbitClass::Elliptic
        } else {
            OrbitClass::Hyperbolic
        }
    }
}

/// Which convention defaults were applied while deriving angular elements.
///
/// `circular` means ω was reported as 0 because the eccentricity vector is
/// numerically zero; `equatorial` means Ω was reported as 0 because the node
/// line is numerically undefined (and ω, when defined, is measured from the
/// reference x-axis instead of the node).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegeneracyFlags {
    pub circular: bool,
    pub equatorial: bool,
}

impl DegeneracyFlags {
    pub fn any(&self) -> bool {
        self.circular || self.equatorial
    }
}

/// Perihelion-based classical orbital elements (osculating, two-body).
///
/// Produced either by the forward conversion
/// [`state_to_elements`](crate::orb_elem::state_to_elements) or directly from
/// externally published catalog values via [`OrbitalElements::from_catalog`].
/// In the latter case `reference_epoch` is the catalog epoch, and propagation
/// to the query epoch happens inside [`OrbitalElements::state_at`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrbitalElements {
    /// Epoch of validity, seconds past J2000 (TDB).
    pub reference_epoch: Et,

    /// Perihelion distance `q` (km), strictly positive.
    pub perihelion_distance: Kilometer,

    /// Eccentricity `e` (≥ 0).
    pub eccentricity: f64,

    /// Inclination `i` (rad), in [0, π].
    pub inclination: Radian,

    /// Longitude of the ascending node `Ω` (rad), in [0, 2π).
    pub ascending_node_longitude: Radian,

    /// Argument of perihelion `ω` (rad), in [0, 2π).
    pub periapsis_argument: Radian,

    /// Mean anomaly `M` at `reference_epoch` (rad). Normalized to [0, 2π)
    /// for elliptic orbits; kept unreduced for hyperbolic orbits, where it
    /// is not periodic.
    pub mean_anomaly: Radian,

    /// Gravitational parameter μ of the central body (km³/s²) used for the
    /// conversion; required context for any reconstruction.
    pub grav_param: f64,

    /// Reference frame the elements (and any reconstructed state) refer to.
    pub frame: RefFrame,

    /// Convention defaults applied for degenerate geometries.
    pub degeneracy: DegeneracyFlags,
}

impl OrbitalElements {
    /// Build elements from externally sourced catalog values, validating all
    /// invariants.
    ///
    /// Angles are normalized to [0, 2π) (the mean anomaly only for elliptic
    /// orbits). The degeneracy flags are cleared: catalog values are taken
    /// at face value.
    ///
    /// Arguments
    /// -----------------
    /// * `reference_epoch`: catalog epoch, seconds past J2000 (TDB).
    /// * `perihelion_distance`: `q` in km, > 0.
    /// * `eccentricity`: `e` ≥ 0.
    /// * `inclination`: `i` in radians, within [0, π].
    /// * `ascending_node_longitude`: `Ω` in radians.
    /// * `periapsis_argument`: `ω` in radians.
    /// * `mean_anomaly`: `M` in radians.
    /// * `grav_param`: μ of the central body in km³/s², > 0.
    /// * `frame`: reference frame of the element set.
    ///
    /// Return
    /// ----------
    /// * The validated element set, or an [`ApsisError`] naming the violated
    ///   invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn from_catalog(
        reference_epoch: Et,
        perihelion_distance: Kilometer,
        eccentricity: f64,
        inclination: Radian,
        ascending_node_longitude: Radian,
        periapsis_argument: Radian,
        mean_anomaly: Radian,
        grav_param: f64,
        frame: RefFrame,
    ) -> Result<Self, ApsisError> {
        if grav_param <= 0.0 {
            return Err(ApsisError::NonPositiveGravParam(grav_param));
        }
        if !(perihelion_distance > 0.0) {
            return Err(ApsisError::InvalidElements(format!(
                "perihelion distance must be > 0 km, got {perihelion_distance}"
            )));
        }
        if !(eccentricity >= 0.0) {
            return Err(ApsisError::InvalidElements(format!(
                "eccentricity must be >= 0, got {eccentricity}"
            )));
        }
        if !(-f64::EPSILON..=std::f64::consts::PI + f64::EPSILON).contains(&inclination) {
            return Err(ApsisError::InvalidElements(format!(
                "inclination must lie in [0, pi] rad, got {inclination}"
            )));
        }

        let class = OrbitClass::from_eccentricity(eccentricity);
        let mean_anomaly = if class == OrbitClass::Elliptic {
            principal_angle(mean_anomaly)
        } else {
            mean_anomaly
        };

        Ok(OrbitalElements {
            reference_epoch,
            perihelion_distance,
            eccentricity,
            inclination: inclination.clamp(0.0, std::f64::consts::PI),
            ascending_node_longitude: principal_angle(ascending_node_longitude),
            periapsis_argument: principal_angle(periapsis_argument),
            mean_anomaly,
            grav_param,
            frame,
            degeneracy: DegeneracyFlags::default(),
        })
    }

    /// Conic class of the orbit.
    pub fn orbit_class(&self) -> OrbitClass {
        OrbitClass::from_eccentricity(self.eccentricity)
    }

    /// Signed semi-major axis `a = q/(1−e)` (km).
    ///
    /// Positive for elliptic orbits, negative for hyperbolic ones.
    ///
    /// Errors
    /// ------
    /// * [`ApsisError::ParabolicTrajectory`] – `a` is not finite for e ≈ 1.
    pub fn semi_major_axis(&self) -> Result<Kilometer, ApsisError> {
        match self.orbit_class() {
            OrbitClass::Parabolic => Err(ApsisError::ParabolicTrajectory),
            _ => Ok(self.perihelion_distance / (1.0 - self.eccentricity)),
        }
    }

    /// Mean motion `n` (rad/s): `√(μ/a³)` for elliptic orbits, `√(μ/(−a)³)`
    /// for hyperbolic ones.
    ///
    /// Errors
    /// ------
    /// * [`ApsisError::ParabolicTrajectory`] – undefined for e ≈ 1.
    pub fn mean_motion(&self) -> Result<f64, ApsisError> {
        let a = self.semi_major_axis()?;
        Ok((self.grav_param / a.abs().powi(3)).sqrt())
    }

    /// Orbital period `T = 2π√(a³/μ)` (seconds).
    ///
    /// Errors
    /// ------
    /// * [`ApsisError::NonEllipticalOrbit`] – hyperbolic and parabolic
    ///   trajectories have no finite period.
    pub fn orbital_period(&self) -> Result<f64, ApsisError> {
        if self.orbit_class() != OrbitClass::Elliptic {
            return Err(ApsisError::NonEllipticalOrbit(self.eccentricity));
        }
        Ok(DPI / self.mean_motion()?)
    }

    /// Reconstruct the Cartesian state vector at `target_epoch`, propagating
    /// the mean anomaly from `reference_epoch` and solving Kepler's equation.
    ///
    /// See [`elements_to_state`] for the algorithm and error conditions.
    pub fn state_at(&self, target_epoch: Et) -> Result<StateVector, ApsisError> {
        elements_to_state(self, target_epoch)
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rad_to_deg = 180.0 / std::f64::consts::PI;
        writeln!(
            f,
            "Orbital Elements [{}] @ {:.3} s past J2000 (TDB)",
            self.frame, self.reference_epoch
        )?;
        writeln!(f, "---------------------------------------------------")?;
        writeln!(
            f,
            "  q   (perihelion distance)   = {:.3} km ({:.6} AU)",
            self.perihelion_distance,
            self.perihelion_distance / crate::constants::AU
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6} rad ({:.6}°)",
            self.inclination,
            self.inclination * rad_to_deg
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6} rad ({:.6}°)",
            self.ascending_node_longitude,
            self.ascending_node_longitude * rad_to_deg
        )?;
        writeln!(
            f,
            "  ω   (argument of perihelion)= {:.6} rad ({:.6}°)",
            self.periapsis_argument,
            self.periapsis_argument * rad_to_deg
        )?;
        writeln!(
            f,
            "  M   (mean anomaly)          = {:.6} rad ({:.6}°)",
            self.mean_anomaly,
            self.mean_anomaly * rad_to_deg
        )?;
        write!(f, "  μ                           = {:.6e} km³/s²", self.grav_param)?;
        if self.degeneracy.any() {
            write!(
                f,
                "\n  degenerate axes: circular={}, equatorial={}",
                self.degeneracy.circular, self.degeneracy.equatorial
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod orbital_element_test {
    use super::*;
    use crate::constants::{AU, DPI, GM_SUN};
    use approx::assert_relative_eq;

    fn ceres_like() -> OrbitalElements {
        OrbitalElements::from_catalog(
            0.0,
            2.55 * AU,
            0.078,
            0.1848,
            1.4016,
            1.2847,
            0.5,
            GM_SUN,
            RefFrame::EclipJ2000,
        )
        .unwrap()
    }

    #[test]
    fn test_orbit_class_boundaries() {
        assert_eq!(OrbitClass::from_eccentricity(0.0), OrbitClass::Elliptic);
        assert_eq!(OrbitClass::from_eccentricity(0.999999), OrbitClass::Elliptic);
        assert_eq!(OrbitClass::from_eccentricity(1.0), OrbitClass::Parabolic);
        assert_eq!(
            OrbitClass::from_eccentricity(1.0 + 5e-13),
            OrbitClass::Parabolic
        );
        assert_eq!(OrbitClass::from_eccentricity(1.2), OrbitClass::Hyperbolic);
    }

    #[test]
    fn test_semi_major_axis_sign() {
        let elem = ceres_like();
        let a = elem.semi_major_axis().unwrap();
        assert_relative_eq!(a, 2.55 * AU / (1.0 - 0.078), max_relative = 1e-12);

        let hyper = OrbitalElements::from_catalog(
            0.0,
            1.0 * AU,
            1.5,
            0.3,
            0.0,
            0.0,
            0.0,
            GM_SUN,
            RefFrame::EclipJ2000,
        )
        .unwrap();
        assert!(hyper.semi_major_axis().unwrap() < 0.0);
    }

    #[test]
    fn test_parabolic_has_no_semi_major_axis() {
        let para = OrbitalElements::from_catalog(
            0.0,
            1.0 * AU,
            1.0,
            0.1,
            0.0,
            0.0,
            0.0,
            GM_SUN,
            RefFrame::EclipJ2000,
        )
        .unwrap();
        assert_eq!(
            para.semi_major_axis(),
            Err(ApsisError::ParabolicTrajectory)
        );
        assert_eq!(para.mean_motion(), Err(ApsisError::ParabolicTrajectory));
    }

    #[test]
    fn test_period_only_for_elliptic() {
        let elem = ceres_like();
        let period = elem.orbital_period().unwrap();
        // Ceres: roughly 4.6 years.
        assert_relative_eq!(period, 4.6 * 365.25 * 86_400.0, max_relative = 0.02);

        let hyper = OrbitalElements::from_catalog(
            0.0,
            1.0 * AU,
            1.5,
            0.0,
            0.0,
            0.0,
            0.0,
            GM_SUN,
            RefFrame::EclipJ2000,
        )
        .unwrap();
        assert_eq!(
            hyper.orbital_period(),
            Err(ApsisError::NonEllipticalOrbit(1.5))
        );
    }

    #[test]
    fn test_period_matches_mean_motion() {
        let elem = ceres_like();
        let n = elem.mean_motion().unwrap();
        assert_relative_eq!(elem.orbital_period().unwrap() * n, DPI, max_relative = 1e-12);
    }

    #[test]
    fn test_catalog_validation() {
        let bad_q = OrbitalElements::from_catalog(
            0.0, -1.0, 0.1, 0.0, 0.0, 0.0, 0.0, GM_SUN, RefFrame::EclipJ2000,
        );
        assert!(matches!(bad_q, Err(ApsisError::InvalidElements(_))));

        let bad_mu = OrbitalElements::from_catalog(
            0.0, 1.0, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0, RefFrame::EclipJ2000,
        );
        assert_eq!(bad_mu, Err(ApsisError::NonPositiveGravParam(0.0)));

        let bad_incl = OrbitalElements::from_catalog(
            0.0, 1.0, 0.1, 3.5, 0.0, 0.0, 0.0, GM_SUN, RefFrame::EclipJ2000,
        );
        assert!(matches!(bad_incl, Err(ApsisError::InvalidElements(_))));
    }

    #[test]
    fn test_catalog_angle_normalization() {
        let elem = OrbitalElements::from_catalog(
            0.0,
            1.0 * AU,
            0.3,
            0.2,
            7.0,
            -1.0,
            9.42,
            GM_SUN,
            RefFrame::EclipJ2000,
        )
        .unwrap();
        assert!(elem.ascending_node_longitude >= 0.0 && elem.ascending_node_longitude < DPI);
        assert!(elem.periapsis_argument >= 0.0 && elem.periapsis_argument < DPI);
        assert!(elem.mean_anomaly >= 0.0 && elem.mean_anomaly < DPI);
        assert_relative_eq!(elem.ascending_node_longitude, 7.0 - DPI, max_relative = 1e-12);
        assert_relative_eq!(elem.periapsis_argument, DPI - 1.0, max_relative = 1e-12);
    }
}
