//! Rotation-vector and rotation-matrix conversions

use nalgebra::{Matrix3, Quaternion, UnitQuaternion};

use crate::error::SampleDefect;
use crate::types::Orientation;

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Builds the unit quaternion described by a platform rotation vector.
///
/// `values` holds `[x, y, z]` or `[x, y, z, w]`; anything past the fourth
/// component (heading accuracy on some platforms) is ignored. A missing `w`
/// is reconstructed from the unit-norm constraint.
pub fn quaternion_from_vector(values: &[f32]) -> Result<UnitQuaternion<f32>, SampleDefect> {
    let [x, y, z] = match values {
        [x, y, z, ..] => [*x, *y, *z],
        _ => return Err(SampleDefect::TooFewComponents(values.len())),
    };

    let w = match values.get(3) {
        Some(&w) => w,
        None => (1.0 - x * x - y * y - z * z).max(0.0).sqrt(),
    };

    if ![w, x, y, z].iter().all(|c| c.is_finite()) {
        return Err(SampleDefect::NonFinite);
    }

    // Norm taken in f64: squares of large finite f32 components overflow f32
    let norm = [w, x, y, z].iter().map(|&c| f64::from(c).powi(2)).sum::<f64>().sqrt();
    if norm <= f64::from(f32::EPSILON) {
        return Err(SampleDefect::ZeroMagnitude);
    }

    let unit = |c: f32| (f64::from(c) / norm) as f32;
    Ok(UnitQuaternion::new_normalize(Quaternion::new(unit(w), unit(x), unit(y), unit(z))))
}

/// Platform rotation vector `[x, y, z, w]` for a quaternion.
pub fn vector_from_quaternion(quaternion: &UnitQuaternion<f32>) -> [f32; 4] {
    let q = quaternion.as_ref();
    [q.i, q.j, q.k, q.w]
}

/// Rotation matrix (device frame to world frame) for a platform rotation vector.
pub fn rotation_matrix_from_vector(values: &[f32]) -> Result<Matrix3<f32>, SampleDefect> {
    let quaternion = quaternion_from_vector(values)?;
    Ok(quaternion.to_rotation_matrix().into_inner())
}

/// Azimuth, pitch and roll of a rotation matrix.
///
/// Uses the platform's Z-X-Y convention. The pitch input is clamped so values
/// a hair past ±1 near the poles still produce ±π/2.
pub fn orientation_from_matrix(r: &Matrix3<f32>) -> Orientation {
    Orientation {
        azimuth: r[(0, 1)].atan2(r[(1, 1)]),
        pitch: (-r[(2, 1)]).clamp(-1.0, 1.0).asin(),
        roll: (-r[(2, 0)]).atan2(r[(2, 2)]),
    }
}
