//! Screen-rotation axis remapping
//!
//! The platform reports orientation in the device's physical frame. To keep
//! azimuth, pitch and roll meaningful when the screen is rotated, the rotation
//! matrix is remapped as if the screen were an instrument panel: device X and
//! Y are reassigned to new world axes and Z follows as their cross product.
//!
//! # Example
//! ```
//! use nalgebra::Matrix3;
//! use absolute_rotation::{Axis, ScreenOrientation, remap_coordinate_system, target_axes};
//!
//! let (x, y) = target_axes(ScreenOrientation::Rotation0);
//! assert_eq!((x, y), (Axis::Px, Axis::Pz));
//!
//! let remapped = remap_coordinate_system(&Matrix3::identity(), x, y).unwrap();
//!
//! // Columns 1 and 2 trade places, with column 1 negated
//! assert_eq!(remapped, Matrix3::new(
//!     1.0, 0.0, 0.0,
//!     0.0, 0.0, 1.0,
//!     0.0, -1.0, 0.0,
//! ));
//! ```

use nalgebra::{Matrix3, Vector3};

use crate::error::Error;
use crate::types::ScreenOrientation;

/// Signed coordinate axis.
///
/// `P` = positive direction, `N` = negative direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// +X
    Px,
    /// +Y
    Py,
    /// +Z
    Pz,
    /// -X
    Nx,
    /// -Y
    Ny,
    /// -Z
    Nz,
}

impl Axis {
    /// Index of the physical axis (0 = X, 1 = Y, 2 = Z).
    pub fn index(self) -> usize {
        match self {
            Axis::Px | Axis::Nx => 0,
            Axis::Py | Axis::Ny => 1,
            Axis::Pz | Axis::Nz => 2,
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Axis::Nx | Axis::Ny | Axis::Nz)
    }

    /// Unit vector pointing along this axis.
    pub fn unit(self) -> Vector3<f32> {
        let mut v = Vector3::zeros();
        v[self.index()] = if self.is_negative() { -1.0 } else { 1.0 };
        v
    }
}

/// World axes that device X and device Y are remapped onto for a screen orientation.
///
/// | Screen | X | Y |
/// |---|---|---|
/// | 0° | +X | +Z |
/// | 90° | +Z | -X |
/// | 180° | -X | -Z |
/// | 270° | -Z | +X |
#[inline]
pub fn target_axes(screen: ScreenOrientation) -> (Axis, Axis) {
    match screen {
        ScreenOrientation::Rotation0 => (Axis::Px, Axis::Pz),
        ScreenOrientation::Rotation90 => (Axis::Pz, Axis::Nx),
        ScreenOrientation::Rotation180 => (Axis::Nx, Axis::Nz),
        ScreenOrientation::Rotation270 => (Axis::Nz, Axis::Px),
    }
}

/// Remaps a rotation matrix so device X and Y point along `x` and `y`.
///
/// Column 0 of `matrix` moves to the column named by `x`, column 1 to the
/// column named by `y` and column 2 to the column of `x × y`, negated where
/// the target axis is negative. Fails with [`Error::InvalidRemap`] when `x`
/// and `y` share a physical axis.
pub fn remap_coordinate_system(matrix: &Matrix3<f32>, x: Axis, y: Axis) -> Result<Matrix3<f32>, Error> {
    let alignment = alignment(x, y)?;
    Ok(matrix * alignment.transpose())
}

/// Undoes [`remap_coordinate_system`] for the same `x` and `y`.
pub fn restore_coordinate_system(matrix: &Matrix3<f32>, x: Axis, y: Axis) -> Result<Matrix3<f32>, Error> {
    let alignment = alignment(x, y)?;
    Ok(matrix * alignment)
}

/// Remaps a rotation matrix for the given screen orientation.
pub fn remap_for_screen(matrix: &Matrix3<f32>, screen: ScreenOrientation) -> Matrix3<f32> {
    let (x, y) = target_axes(screen);
    // Table rows never share an axis
    matrix * signed_permutation(x, y).transpose()
}

fn alignment(x: Axis, y: Axis) -> Result<Matrix3<f32>, Error> {
    if x.index() == y.index() {
        return Err(Error::InvalidRemap { x, y });
    }
    Ok(signed_permutation(x, y))
}

/// Proper rotation whose columns are `x`, `y` and `x × y`.
fn signed_permutation(x: Axis, y: Axis) -> Matrix3<f32> {
    let x = x.unit();
    let y = y.unit();
    Matrix3::from_columns(&[x, y, x.cross(&y)])
}
