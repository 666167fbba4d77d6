//! # Kepler's equation and element propagation
//!
//! Solvers for Kepler's equation in its elliptic (`E − e·sin E = M`) and
//! hyperbolic (`e·sinh H − H = M`) forms, and the inverse element
//! conversion: classical elements at their reference epoch → Cartesian state
//! vector at an arbitrary target epoch.
//!
//! Both solvers run Newton–Raphson through [`roots`] with a 1e-12 radian
//! convergence criterion and a hard iteration cap; exceeding the cap is a
//! reported error, never a silently truncated iterate.

use roots::{find_root_newton_raphson, SimpleConvergency};

use crate::apsis_errors::ApsisError;
use crate::constants::{Et, Radian, DPI};
use crate::orbital_element::{OrbitClass, OrbitalElements};
use crate::ref_system::perifocal_to_frame;
use crate::state_vector::StateVector;

/// Convergence tolerance for the anomaly solvers (radians).
const KEPLER_EPS: f64 = 1e-12;

/// Iteration cap for the anomaly solvers.
const KEPLER_MAX_ITER: usize = 100;

/// Principal value of an angle, in [0, 2π).
pub fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// Solve the elliptic Kepler equation `E − e·sin E = M` for the eccentric
/// anomaly `E`.
///
/// The mean anomaly is reduced to [0, 2π) before solving; the initial guess
/// is `M` for moderate eccentricities and `M + e` close to 1, where the
/// equation stiffens near perihelion.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: `M` in radians (any range).
/// * `eccentricity`: `e` in [0, 1).
///
/// Return
/// ------
/// * The eccentric anomaly `E` in radians.
///
/// Errors
/// ------
/// * [`ApsisError::RootFindingError`] – the Newton iteration did not reach
///   the 1e-12 tolerance within 100 iterations.
pub fn solve_elliptic_kepler(mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, ApsisError> {
    let m = principal_angle(mean_anomaly);

    let f = |e_anom: f64| e_anom - eccentricity * e_anom.sin() - m;
    let df = |e_anom: f64| 1.0 - eccentricity * e_anom.cos();

    let x0 = if eccentricity < 0.8 { m } else { m + eccentricity };

    let mut tol = SimpleConvergency {
        eps: KEPLER_EPS,
        max_iter: KEPLER_MAX_ITER,
    };

    Ok(find_root_newton_raphson(x0, &f, &df, &mut tol)?)
}

/// Solve the hyperbolic Kepler equation `e·sinh H − H = M` for the
/// hyperbolic anomaly `H`.
///
/// The initial guess is the standard logarithmic approximation of the
/// asymptotic branch, signed like `M`.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: hyperbolic `M` (radians, unreduced — not periodic).
/// * `eccentricity`: `e` > 1.
///
/// Return
/// ------
/// * The hyperbolic anomaly `H`.
///
/// Errors
/// ------
/// * [`ApsisError::RootFindingError`] – no convergence within the cap.
pub fn solve_hyperbolic_kepler(mean_anomaly: f64, eccentricity: f64) -> Result<f64, ApsisError> {
    let m = mean_anomaly;

    let f = |h: f64| eccentricity * h.sinh() - h - m;
    let df = |h: f64| eccentricity * h.cosh() - 1.0;

    let x0 = (2.0 * m.abs() / eccentricity + 1.8).ln().copysign(m);

    let mut tol = SimpleConvergency {
        eps: KEPLER_EPS,
        max_iter: KEPLER_MAX_ITER,
    };

    Ok(find_root_newton_raphson(x0, &f, &df, &mut tol)?)
}

/// Reconstruct the Cartesian state vector from orbital elements at
/// `target_epoch`.
///
/// The mean anomaly is propagated linearly by the mean motion, Kepler's
/// equation is solved for the anomaly at the target epoch, the position and
/// velocity are assembled in the perifocal frame from the conic relations
/// (`p = q(1+e)`, `|r| = p/(1+e·cos ν)`, `v = √(μ/p)·(−sin ν, e+cos ν)`),
/// and the result is rotated by (ω, i, Ω) into the element set's reference
/// frame.
///
/// Arguments
/// ---------
/// * `elements`: elements valid at their own `reference_epoch`.
/// * `target_epoch`: epoch of the reconstructed state, seconds past J2000
///   (TDB).
///
/// Return
/// ------
/// * The [`StateVector`] at `target_epoch`, tagged with the elements' frame.
///
/// Errors
/// ------
/// * [`ApsisError::NonPositiveGravParam`] – μ ≤ 0.
/// * [`ApsisError::InvalidElements`] – q ≤ 0 or e < 0.
/// * [`ApsisError::ParabolicTrajectory`] – e ≈ 1: neither anomaly
///   formulation applies.
/// * [`ApsisError::RootFindingError`] – the anomaly solver did not converge.
pub fn elements_to_state(
    elements: &OrbitalElements,
    target_epoch: Et,
) -> Result<StateVector, ApsisError> {
    let mu = elements.grav_param;
    let ecc = elements.eccentricity;
    let q = elements.perihelion_distance;

    if mu <= 0.0 {
        return Err(ApsisError::NonPositiveGravParam(mu));
    }
    if !(q > 0.0) || !(ecc >= 0.0) {
        return Err(ApsisError::InvalidElements(format!(
            "perihelion distance {q} km / eccentricity {ecc}"
        )));
    }

    let dt = target_epoch - elements.reference_epoch;
    let mean_at_target = elements.mean_anomaly + elements.mean_motion()? * dt;

    let true_anomaly = match elements.orbit_class() {
        OrbitClass::Parabolic => return Err(ApsisError::ParabolicTrajectory),
        OrbitClass::Elliptic => {
            let ecc_anomaly = solve_elliptic_kepler(mean_at_target, ecc)?;
            2.0 * ((1.0 + ecc).sqrt() * (ecc_anomaly / 2.0).sin())
                .atan2((1.0 - ecc).sqrt() * (ecc_anomaly / 2.0).cos())
        }
        OrbitClass::Hyperbolic => {
            let hyp_anomaly = solve_hyperbolic_kepler(mean_at_target, ecc)?;
            2.0 * (((ecc + 1.0) / (ecc - 1.0)).sqrt() * (hyp_anomaly / 2.0).tanh()).atan()
        }
    };

    // Perifocal state from the conic relations, valid for both classes.
    let semilatus = q * (1.0 + ecc);
    let radius = semilatus / (1.0 + ecc * true_anomaly.cos());
    let v_factor = (mu / semilatus).sqrt();

    let position_pf = nalgebra::Vector3::new(
        radius * true_anomaly.cos(),
        radius * true_anomaly.sin(),
        0.0,
    );
    let velocity_pf = nalgebra::Vector3::new(
        -v_factor * true_anomaly.sin(),
        v_factor * (ecc + true_anomaly.cos()),
        0.0,
    );

    let rot = perifocal_to_frame(
        elements.ascending_node_longitude,
        elements.inclination,
        elements.periapsis_argument,
    );

    Ok(StateVector::new(
        rot * position_pf,
        rot * velocity_pf,
        elements.frame,
        target_epoch,
    ))
}
