//! # Constants and type definitions for Apsis
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `apsis` library.
//!
//! ## Overview
//!
//! - Astronomical constants and gravitational parameters
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, AU ↔ km)
//! - Core type aliases used across the crate
//! - Identifiers for solar system bodies
//!
//! These definitions are used by all main modules, including the element conversions,
//! the proximity estimator, and the ephemeris provider contract.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Mean Earth–Moon distance in kilometers, the Lunar Distance unit of close-approach reports
pub const LUNAR_DISTANCE: f64 = 384_400.0;

/// Numerical epsilon used for floating-point comparisons
pub const EPS: f64 = 1e-6;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Gravitational parameter of the Sun (km³/s², DE440)
pub const GM_SUN: f64 = 1.327_124_400_18e11;

/// Gravitational parameter of the Earth (km³/s², DE440)
pub const GM_EARTH: f64 = 3.986_004_354_36e5;

/// Gravitational parameter of the Moon (km³/s², DE440)
pub const GM_MOON: f64 = 4.902_800_066e3;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Speed in kilometers per second
pub type KilometerPerSecond = f64;
/// Ephemeris time, in seconds past J2000 (TDB)
pub type Et = f64;
/// Modified Julian Date (days)
pub type MJD = f64;

// -------------------------------------------------------------------------------------------------
// Identifiers
// -------------------------------------------------------------------------------------------------

/// Identifier of a solar system body.
///
/// This can be:
/// - A NAIF integer code (e.g. `Naif(2000001)` for Ceres)
/// - A string designation (e.g. `"CERES"`, `"2015 AB"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyId {
    /// NAIF integer code (e.g. 10, 399, 2000001…)
    Naif(i32),
    /// String-based designation (name or provisional designation)
    Name(String),
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyId::Naif(n) => write!(f, "{n}"),
            BodyId::Name(s) => write!(f, "{s}"),
        }
    }
}

impl From<i32> for BodyId {
    fn from(n: i32) -> Self {
        BodyId::Naif(n)
    }
}

impl From<String> for BodyId {
    fn from(s: String) -> Self {
        BodyId::Name(s)
    }
}

impl From<&str> for BodyId {
    fn from(s: &str) -> Self {
        BodyId::Name(s.to_string())
    }
}

impl std::str::FromStr for BodyId {
    type Err = std::num::ParseIntError;

    /// Try to parse a `BodyId` from a string.
    /// - Pure digits (with optional sign) → `Naif(i32)`
    /// - Otherwise → `Name(String)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i32>() {
            Ok(n) => Ok(BodyId::Naif(n)),
            Err(e) => {
                if s.chars().any(|c| !c.is_ascii_digit()) {
                    Ok(BodyId::Name(s.to_string()))
                } else {
                    Err(e)
                }
            }
        }
    }
}
