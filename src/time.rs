//! # Epoch parsing and conversion
//!
//! The engine's continuous time coordinate is `Et`: ephemeris seconds past
//! J2000 (TDB). This module turns human-facing epoch strings — ISO 8601
//! calendar dates (with an optional time-scale suffix) or Julian dates
//! (`"JD 2460000.5"` or a bare numeric) — into `Et`, and converts back to
//! Julian date for reporting. All time-scale arithmetic is delegated to
//! [`hifitime`].

use hifitime::Epoch;
use std::str::FromStr;

use crate::apsis_errors::ApsisError;
use crate::constants::Et;

/// Plausibility gate for bare-numeric Julian dates (years ~763 BC to 6239 AD).
const JD_RANGE: std::ops::Range<f64> = 1_000_000.0..4_000_000.0;

/// Parse a calendar or Julian-date string into ephemeris seconds past J2000
/// (TDB).
///
/// Accepted forms:
/// * ISO 8601 calendar strings, e.g. `"2023-03-01T12:00:00"` or
///   `"2023-03-01T12:00:00 TDB"` (any time scale hifitime understands;
///   UTC when unspecified).
/// * Julian dates with an explicit marker, e.g. `"JD 2460000.5"`.
/// * Bare numeric Julian dates, e.g. `"2460000.5"` (interpreted on the UTC
///   scale, like the marked form).
///
/// Return
/// ------
/// * The epoch as `Et` seconds.
///
/// Errors
/// ------
/// * [`ApsisError::InvalidEpochString`] – unparseable input, or a bare
///   numeric outside any plausible Julian-date range.
pub fn parse_epoch(input: &str) -> Result<Et, ApsisError> {
    let trimmed = input.trim();

    let marked_jd = trimmed
        .strip_prefix("JD")
        .or_else(|| trimmed.strip_prefix("jd"))
        .map(str::trim);

    let jd_value = match marked_jd {
        Some(rest) => Some(rest.parse::<f64>().map_err(|_| {
            ApsisError::InvalidEpochString(format!("malformed Julian date: {trimmed}"))
        })?),
        None => trimmed.parse::<f64>().ok(),
    };

    if let Some(jd) = jd_value {
        if !JD_RANGE.contains(&jd) {
            return Err(ApsisError::InvalidEpochString(format!(
                "numeric epoch {jd} is not a plausible Julian date"
            )));
        }
        return Ok(Epoch::from_jde_utc(jd).to_et_seconds());
    }

    Epoch::from_str(trimmed)
        .map(|epoch| epoch.to_et_seconds())
        .map_err(|e| ApsisError::InvalidEpochString(format!("{trimmed}: {e}")))
}

/// Convert ephemeris seconds past J2000 (TDB) to a Julian date on the UTC
/// scale, the form most element catalogs report.
pub fn et_to_jde_utc(et: Et) -> f64 {
    Epoch::from_et_seconds(et).to_jde_utc_days()
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_jd_and_calendar_agree() {
        let from_jd = parse_epoch("JD 2451545.0").unwrap();
        let from_calendar = parse_epoch("2000-01-01T12:00:00 UTC").unwrap();
        assert_abs_diff_eq!(from_jd, from_calendar, epsilon = 1e-6);
    }

    #[test]
    fn test_j2000_utc_noon_offset() {
        // ET - UTC at J2000 is 64.184 s (32.184 s TT-TAI + 32 leap seconds).
        let et = parse_epoch("2000-01-01T12:00:00 UTC").unwrap();
        assert_abs_diff_eq!(et, 64.184, epsilon = 0.1);
    }

    #[test]
    fn test_bare_numeric_is_julian_date() {
        let marked = parse_epoch("JD 2460000.5").unwrap();
        let bare = parse_epoch("2460000.5").unwrap();
        assert_abs_diff_eq!(marked, bare, epsilon = 1e-9);
    }

    #[test]
    fn test_jde_round_trip() {
        let et = parse_epoch("JD 2460000.5").unwrap();
        assert_abs_diff_eq!(et_to_jde_utc(et), 2460000.5, epsilon = 1e-8);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_epoch("not a date").is_err());
        assert!(parse_epoch("JD banana").is_err());
        // An MJD-sized numeric is ambiguous, not silently accepted.
        assert!(parse_epoch("60000.0").is_err());
    }
}
