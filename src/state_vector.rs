use nalgebra::Vector3;
use std::fmt;

use crate::constants::{Et, Kilometer, KilometerPerSecond};
use crate::ref_system::RefFrame;

/// Cartesian state vector of a body, tagged with its reference frame and epoch.
///
/// Units
/// -----
/// * `position`: kilometers.
/// * `velocity`: kilometers per second.
/// * `epoch`: ephemeris seconds past J2000 (TDB).
///
/// A state vector is produced once per (body, epoch, frame, observer) query
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub frame: RefFrame,
    pub epoch: Et,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>, frame: RefFrame, epoch: Et) -> Self {
        StateVector {
            position,
            velocity,
            frame,
            epoch,
        }
    }

    /// Distance from the frame center (km).
    pub fn radius(&self) -> Kilometer {
        self.position.norm()
    }

    /// Speed relative to the frame center (km/s).
    pub fn speed(&self) -> KilometerPerSecond {
        self.velocity.norm()
    }

    /// Specific orbital energy `v²/2 − μ/r` (km²/s²) for a central body of
    /// gravitational parameter `grav_param`.
    ///
    /// Negative for bound (elliptic) motion, positive for hyperbolic escape.
    pub fn specific_energy(&self, grav_param: f64) -> f64 {
        self.speed().powi(2) / 2.0 - grav_param / self.radius()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "State Vector [{}] @ {:.3} s past J2000 (TDB)",
            self.frame, self.epoch
        )?;
        writeln!(
            f,
            "  r = ({:.6e}, {:.6e}, {:.6e}) km",
            self.position.x, self.position.y, self.position.z
        )?;
        write!(
            f,
            "  v = ({:.6}, {:.6}, {:.6}) km/s",
            self.velocity.x, self.velocity.y, self.velocity.z
        )
    }
}
