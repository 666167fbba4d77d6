//! # State vector → orbital elements
//!
//! Forward conversion of a Cartesian state vector and a gravitational
//! parameter into classical orbital elements, via the closed-form two-body
//! relations: angular momentum, Laplace–Runge–Lenz vector, node line, and
//! the anomaly chain ν → E (or H) → M.
//!
//! ## Degenerate geometries
//!
//! Near-zero eccentricity and near-zero (or near-180°) inclination are not
//! errors. The node longitude of an equatorial orbit defaults to 0 (angles
//! are then measured from the reference x-axis), and the argument of
//! perihelion of a circular orbit defaults to 0 (the mean anomaly absorbs
//! the along-track position). Both defaults are recorded in the returned
//! [`DegeneracyFlags`].
//!
//! Exactly parabolic energy, a zero-magnitude position, and a rectilinear
//! trajectory (zero angular momentum) are reported as errors: no element
//! set represents them faithfully here.

use nalgebra::Vector3;

use crate::apsis_errors::ApsisError;
use crate::kepler::principal_angle;
use crate::orbital_element::{DegeneracyFlags, OrbitalElements, PARABOLIC_TOL};
use crate::state_vector::StateVector;

/// Below this eccentricity the orbit is treated as circular and ω defaults to 0.
const CIRCULAR_ECC_TOL: f64 = 1e-11;

/// Below this sin(i) the orbit is treated as equatorial and Ω defaults to 0.
const EQUATORIAL_SIN_TOL: f64 = 1e-11;

/// Convert a Cartesian state vector into classical orbital elements valid at
/// the state's epoch.
///
/// Arguments
/// ---------
/// * `state`: position (km) and velocity (km/s) with frame and epoch tags.
/// * `grav_param`: gravitational parameter μ of the central body (km³/s²).
///
/// Return
/// ------
/// * The [`OrbitalElements`] at `state.epoch`, in `state.frame`, with the
///   degeneracy conventions that fired recorded in the flags.
///
/// Errors
/// ------
/// * [`ApsisError::NonPositiveGravParam`] – μ ≤ 0 (caller contract).
/// * [`ApsisError::DegenerateOrbit`] – zero-magnitude position, or zero
///   angular momentum (purely radial trajectory).
/// * [`ApsisError::ParabolicTrajectory`] – |e − 1| below the parabolic
///   threshold; the semi-major axis is unbounded there.
pub fn state_to_elements(
    state: &StateVector,
    grav_param: f64,
) -> Result<OrbitalElements, ApsisError> {
    if grav_param <= 0.0 {
        return Err(ApsisError::NonPositiveGravParam(grav_param));
    }

    let r = state.position;
    let v = state.velocity;

    let r_norm = r.norm();
    if r_norm == 0.0 {
        return Err(ApsisError::DegenerateOrbit("zero-magnitude position vector"));
    }

    // Specific angular momentum
    let ang_mom = r.cross(&v);
    let h_norm = ang_mom.norm();
    if h_norm == 0.0 {
        return Err(ApsisError::DegenerateOrbit(
            "zero angular momentum (rectilinear trajectory)",
        ));
    }
    let h_hat = ang_mom / h_norm;

    // Laplace-Runge-Lenz vector; its norm is the eccentricity.
    let ecc_vec = v.cross(&ang_mom) / grav_param - r / r_norm;
    let ecc = ecc_vec.norm();

    if (ecc - 1.0).abs() < PARABOLIC_TOL {
        return Err(ApsisError::ParabolicTrajectory);
    }

    // Inclination from the angular momentum direction; the atan2 form keeps
    // it inside [0, π] even when h_z/|h| overshoots ±1 by rounding.
    let sin_incl = (h_hat.x * h_hat.x + h_hat.y * h_hat.y).sqrt();
    let inclination = sin_incl.atan2(h_hat.z);

    let equatorial = sin_incl < EQUATORIAL_SIN_TOL;
    let circular = ecc < CIRCULAR_ECC_TOL;

    // Node direction ẑ × h. For an equatorial orbit the node line is
    // undefined: Ω defaults to 0 and in-plane angles are measured from the
    // reference x-axis.
    let node_longitude = if equatorial {
        0.0
    } else {
        principal_angle(h_hat.x.atan2(-h_hat.y))
    };
    let node_dir = if equatorial {
        Vector3::x()
    } else {
        Vector3::new(-ang_mom.y, ang_mom.x, 0.0).normalize()
    };

    // Argument of perihelion, signed around the orbit normal.
    let periapsis_argument = if circular {
        0.0
    } else {
        let e_hat = ecc_vec / ecc;
        principal_angle(node_dir.cross(&e_hat).dot(&h_hat).atan2(node_dir.dot(&e_hat)))
    };

    // True anomaly; for a circular orbit it degrades to the argument of
    // latitude, consistent with the ω = 0 convention.
    let r_hat = r / r_norm;
    let true_anomaly = if circular {
        principal_angle(node_dir.cross(&r_hat).dot(&h_hat).atan2(node_dir.dot(&r_hat)))
    } else {
        let e_hat = ecc_vec / ecc;
        principal_angle(e_hat.cross(&r_hat).dot(&h_hat).atan2(e_hat.dot(&r_hat)))
    };

    // Perihelion from the semilatus rectum, stable for every conic class.
    let semilatus = h_norm * h_norm / grav_param;
    let perihelion_distance = semilatus / (1.0 + ecc);

    // Anomaly chain ν → E (elliptic) or ν → H (hyperbolic) → mean anomaly.
    let mean_anomaly = if ecc < 1.0 {
        let ecc_anomaly = 2.0
            * ((1.0 - ecc).sqrt() * (true_anomaly / 2.0).sin())
                .atan2((1.0 + ecc).sqrt() * (true_anomaly / 2.0).cos());
        principal_angle(ecc_anomaly - ecc * ecc_anomaly.sin())
    } else {
        let hyp_anomaly =
            2.0 * (((ecc - 1.0) / (ecc + 1.0)).sqrt() * (true_anomaly / 2.0).tan()).atanh();
        ecc * hyp_anomaly.sinh() - hyp_anomaly
    };

    Ok(OrbitalElements {
        reference_epoch: state.epoch,
        perihelion_distance,
        eccentricity: ecc,
        inclination,
        ascending_node_longitude: node_longitude,
        periapsis_argument,
        mean_anomaly,
        grav_param,
        frame: state.frame,
        degeneracy: DegeneracyFlags {
            circular,
            equatorial,
        },
    })
}

#[cfg(test)]
mod orb_elem_test {
    use super::*;
    use crate::constants::{AU, GM_SUN, RADEG};
    use crate::orbital_element::OrbitClass;
    use crate::ref_system::RefFrame;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    fn sun_state(position: Vector3<f64>, velocity: Vector3<f64>) -> StateVector {
        StateVector::new(position, velocity, RefFrame::EclipJ2000, 0.0)
    }

    #[test]
    fn test_rejects_non_positive_grav_param() {
        let sv = sun_state(Vector3::new(AU, 0.0, 0.0), Vector3::new(0.0, 30.0, 0.0));
        assert_eq!(
            state_to_elements(&sv, 0.0),
            Err(ApsisError::NonPositiveGravParam(0.0))
        );
        assert_eq!(
            state_to_elements(&sv, -1.0),
            Err(ApsisError::NonPositiveGravParam(-1.0))
        );
    }

    #[test]
    fn test_rejects_degenerate_states() {
        let at_center = sun_state(Vector3::zeros(), Vector3::new(0.0, 30.0, 0.0));
        assert!(matches!(
            state_to_elements(&at_center, GM_SUN),
            Err(ApsisError::DegenerateOrbit(_))
        ));

        // Purely radial velocity: zero angular momentum.
        let radial = sun_state(Vector3::new(AU, 0.0, 0.0), Vector3::new(12.0, 0.0, 0.0));
        assert!(matches!(
            state_to_elements(&radial, GM_SUN),
            Err(ApsisError::DegenerateOrbit(_))
        ));
    }

    #[test]
    fn test_circular_equatorial_conventions() {
        let radius = 1.3 * AU;
        let v_circ = (GM_SUN / radius).sqrt();
        let sv = sun_state(
            Vector3::new(radius, 0.0, 0.0),
            Vector3::new(0.0, v_circ, 0.0),
        );

        let elem = state_to_elements(&sv, GM_SUN).unwrap();
        assert!(elem.degeneracy.circular);
        assert!(elem.degeneracy.equatorial);
        assert_eq!(elem.periapsis_argument, 0.0);
        assert_eq!(elem.ascending_node_longitude, 0.0);
        assert_abs_diff_eq!(elem.inclination, 0.0, epsilon = 1e-12);
        assert!(elem.eccentricity < 1e-11);
        assert_relative_eq!(elem.perihelion_distance, radius, max_relative = 1e-12);
        assert_abs_diff_eq!(elem.mean_anomaly, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_polar_orbit_node_and_inclination() {
        let radius = 2.0 * AU;
        let v_circ = (GM_SUN / radius).sqrt();
        let sv = sun_state(
            Vector3::new(radius, 0.0, 0.0),
            Vector3::new(0.0, 0.0, v_circ),
        );

        let elem = state_to_elements(&sv, GM_SUN).unwrap();
        assert!(!elem.degeneracy.equatorial);
        assert_abs_diff_eq!(elem.inclination, PI / 2.0, epsilon = 1e-12);
        // Ascending node along +x.
        assert_abs_diff_eq!(elem.ascending_node_longitude, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hyperbolic_state_classifies_as_hyperbolic() {
        let radius = 1.0 * AU;
        let v_escape = (2.0 * GM_SUN / radius).sqrt();
        let sv = sun_state(
            Vector3::new(radius, 0.0, 0.0),
            Vector3::new(0.0, 1.2 * v_escape, 0.1),
        );

        let elem = state_to_elements(&sv, GM_SUN).unwrap();
        assert_eq!(elem.orbit_class(), OrbitClass::Hyperbolic);
        assert!(elem.perihelion_distance > 0.0);
        assert!(elem.semi_major_axis().unwrap() < 0.0);
    }

    #[test]
    fn test_exact_escape_velocity_is_parabolic() {
        let radius = 1.5 * AU;
        let v_escape = (2.0 * GM_SUN / radius).sqrt();
        let sv = sun_state(
            Vector3::new(radius, 0.0, 0.0),
            Vector3::new(0.0, v_escape, 0.0),
        );
        assert_eq!(
            state_to_elements(&sv, GM_SUN),
            Err(ApsisError::ParabolicTrajectory)
        );
    }

    #[test]
    fn test_main_belt_regression() {
        // Ceres-like heliocentric state (ecliptic J2000).
        let sv = sun_state(
            Vector3::new(3.08931423e8, -3.12041244e8, -6.67649e7),
            Vector3::new(11.8818726, 11.5144519, -1.82633615),
        );

        let elem = state_to_elements(&sv, GM_SUN).unwrap();
        assert!(!elem.degeneracy.any());

        let a_au = elem.semi_major_axis().unwrap() / AU;
        assert_abs_diff_eq!(a_au, 2.77, epsilon = 0.05);
        assert_abs_diff_eq!(elem.eccentricity, 0.08, epsilon = 0.05);
        assert_abs_diff_eq!(elem.inclination / RADEG, 10.6, epsilon = 0.05);
        assert_abs_diff_eq!(elem.ascending_node_longitude / RADEG, 80.3, epsilon = 0.5);
    }

    #[test]
    fn test_reported_angles_are_normalized() {
        let sv = sun_state(
            Vector3::new(-2.1 * AU, 1.4 * AU, 0.4 * AU),
            Vector3::new(-9.5, -14.0, 2.5),
        );
        let elem = state_to_elements(&sv, GM_SUN).unwrap();

        assert!(elem.inclination >= 0.0 && elem.inclination <= PI);
        for angle in [
            elem.ascending_node_longitude,
            elem.periapsis_argument,
            elem.mean_anomaly,
        ] {
            assert!((0.0..crate::constants::DPI).contains(&angle), "angle {angle}");
        }
    }
}
