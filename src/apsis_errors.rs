use thiserror::Error;

use crate::constants::BodyId;
use crate::ref_system::RefFrame;

/// Errors reported by the `apsis` library.
///
/// Contract violations (non-positive μ, degenerate state vectors, mismatched
/// frames or epochs) fail immediately and are never recovered internally.
/// Near-zero eccentricity and near-zero inclination are NOT errors: they are
/// resolved by documented convention defaults and surfaced through
/// [`DegeneracyFlags`](crate::orbital_element::DegeneracyFlags).
#[derive(Error, Debug, PartialEq)]
pub enum ApsisError {
    #[error("gravitational parameter must be strictly positive, got {0} km^3/s^2")]
    NonPositiveGravParam(f64),

    #[error("degenerate orbit geometry: {0}")]
    DegenerateOrbit(&'static str),

    #[error("invalid orbital elements: {0}")]
    InvalidElements(String),

    #[error("parabolic trajectory: semi-major axis is undefined")]
    ParabolicTrajectory,

    #[error("non-elliptical orbit (e = {0}): no finite orbital period")]
    NonEllipticalOrbit(f64),

    #[error("Kepler equation solver failed: {0}")]
    RootFindingError(#[from] roots::SearchError),

    #[error("reference frame mismatch: {0} vs {1}")]
    FrameMismatch(RefFrame, RefFrame),

    #[error("epoch mismatch: {0} s vs {1} s past J2000 (TDB)")]
    EpochMismatch(f64, f64),

    #[error("invalid epoch string: {0}")]
    InvalidEpochString(String),

    #[error("unknown body: {0}")]
    UnknownBody(BodyId),

    #[error("no ephemeris record for body {0} at {1} s past J2000 (TDB)")]
    EphemerisNotFound(BodyId, f64),
}
