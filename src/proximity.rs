//! # Close-approach estimation
//!
//! Euclidean separation between two bodies expressed in the same frame at
//! the same epoch, and the Laplace sphere-of-influence radius used to judge
//! whether an approach enters a body's gravitational neighborhood.

use crate::apsis_errors::ApsisError;
use crate::constants::Kilometer;
use crate::state_vector::StateVector;

/// Epochs further apart than this (seconds) cannot be compared.
const EPOCH_MATCH_TOL: f64 = 1e-6;

/// Euclidean separation between two bodies (km).
///
/// Both state vectors must be expressed in the same reference frame at the
/// same epoch; anything else is a caller contract violation, reported as an
/// error rather than silently producing a meaningless distance.
pub fn separation(a: &StateVector, b: &StateVector) -> Result<Kilometer, ApsisError> {
    if a.frame != b.frame {
        return Err(ApsisError::FrameMismatch(a.frame, b.frame));
    }
    if (a.epoch - b.epoch).abs() > EPOCH_MATCH_TOL {
        return Err(ApsisError::EpochMismatch(a.epoch, b.epoch));
    }
    Ok((a.position - b.position).norm())
}

/// Laplace sphere-of-influence radius (km): `d · (μ_minor/μ_major)^(2/5)`.
///
/// `orbit_distance` is the distance scale of the minor body's orbit around
/// the major one (for Earth around the Sun, 1 AU is the customary
/// approximation), and the mass ratio is approximated by the ratio of
/// gravitational parameters. This is a coarse static estimate valid near
/// circular, low-eccentricity primary orbits — not a dynamic capture
/// radius.
///
/// Errors
/// ------
/// * [`ApsisError::NonPositiveGravParam`] – either μ ≤ 0.
/// * [`ApsisError::InvalidElements`] – non-positive orbit distance.
pub fn sphere_of_influence(
    orbit_distance: Kilometer,
    grav_param_minor: f64,
    grav_param_major: f64,
) -> Result<Kilometer, ApsisError> {
    if grav_param_minor <= 0.0 {
        return Err(ApsisError::NonPositiveGravParam(grav_param_minor));
    }
    if grav_param_major <= 0.0 {
        return Err(ApsisError::NonPositiveGravParam(grav_param_major));
    }
    if !(orbit_distance > 0.0) {
        return Err(ApsisError::InvalidElements(format!(
            "orbit distance must be > 0 km, got {orbit_distance}"
        )));
    }

    Ok(orbit_distance * (grav_param_minor / grav_param_major).powf(2.0 / 5.0))
}
