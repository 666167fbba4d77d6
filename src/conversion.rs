//! # Unit conversion and ingestion utilities
//!
//! Scalar distance conversion between the named units the crate reports in
//! (kilometers internally, astronomical units and lunar distances for
//! human-facing output), plus a small utility for rounding ingested values
//! to the precision implied by an accompanying error estimate.

use crate::constants::{AU, LUNAR_DISTANCE};

/// Named distance units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    Meter,
    Kilometer,
    AstronomicalUnit,
    LunarDistance,
}

impl Unit {
    /// Size of one of this unit, in kilometers.
    fn in_kilometers(self) -> f64 {
        match self {
            Unit::Meter => 1e-3,
            Unit::Kilometer => 1.0,
            Unit::AstronomicalUnit => AU,
            Unit::LunarDistance => LUNAR_DISTANCE,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Meter => write!(f, "m"),
            Unit::Kilometer => write!(f, "km"),
            Unit::AstronomicalUnit => write!(f, "au"),
            Unit::LunarDistance => write!(f, "LD"),
        }
    }
}

/// Convert a scalar distance between two named units.
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    value * from.in_kilometers() / to.in_kilometers()
}

/// Round `value` to the decimal place implied by the leading significant
/// digit of `error_estimate`.
///
/// A value of `2.767_502_34` with an error estimate of `0.003` rounds to
/// `2.768`: reporting digits beyond the error's magnitude overstates the
/// measurement. A non-finite or non-positive error estimate leaves the
/// value untouched — there is nothing meaningful to round against.
///
/// Arguments
/// ---------
/// * `value`: the quantity to round.
/// * `error_estimate`: its one-sigma (or comparable) uncertainty, same units.
///
/// Return
/// ------
/// * `value` rounded to the error's leading decimal place.
pub fn round_to_significant_digits(value: f64, error_estimate: f64) -> f64 {
    if !value.is_finite() || !error_estimate.is_finite() || error_estimate <= 0.0 {
        return value;
    }

    let step = 10f64.powi(error_estimate.log10().floor() as i32);
    (value / step).round() * step
}
