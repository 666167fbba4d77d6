use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::Radian;

/// Inertial reference frames understood by the engine.
///
/// All element conversions are frame-agnostic rotations around a tagged
/// frame; the ecliptic mean J2000 frame is the canonical choice for
/// heliocentric small-body work, the equatorial variant is carried for
/// interoperability with providers that serve equatorial states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RefFrame {
    /// Ecliptic mean J2000 (ECLIPJ2000)
    EclipJ2000,
    /// Equatorial mean J2000 (J2000/EME2000)
    EquatorialJ2000,
}

impl std::fmt::Display for RefFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefFrame::EclipJ2000 => write!(f, "ECLIPJ2000"),
            RefFrame::EquatorialJ2000 => write!(f, "J2000"),
        }
    }
}

/// Rotation matrix around one of the principal axes.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle in radians.
/// * `k`: axis index (0 = X, 1 = Y, 2 = Z).
///
/// Return
/// ------
/// * The 3×3 matrix rotating a vector by `alpha` around the chosen axis.
///
/// Panics
/// ------
/// * If `k` is not 0, 1 or 2.
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rotation from the perifocal frame (x toward perihelion, z along the
/// orbit normal) into the reference frame, as the classical 3-1-3 sequence
/// `R_z(Ω) · R_x(i) · R_z(ω)`.
///
/// Arguments
/// ---------
/// * `node`: longitude of the ascending node Ω (radians).
/// * `inclination`: orbital inclination i (radians).
/// * `periapsis`: argument of perihelion ω (radians).
///
/// Return
/// ------
/// * The matrix mapping perifocal coordinates to reference-frame coordinates.
pub fn perifocal_to_frame(node: Radian, inclination: Radian, periapsis: Radian) -> Matrix3<f64> {
    rotmt(node, 2) * rotmt(inclination, 0) * rotmt(periapsis, 2)
}
