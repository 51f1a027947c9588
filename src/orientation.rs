//! Screen-aware orientation extraction
//!
//! Turns a raw rotation-vector sample into azimuth, pitch and roll as seen
//! from the screen's current visual frame.
//!
//! # Example
//! ```
//! use absolute_rotation::{ScreenOrientation, extract};
//!
//! // Device lying flat on a table, screen up
//! let orientation = extract(&[0.0, 0.0, 0.0, 1.0], ScreenOrientation::Rotation0).unwrap();
//!
//! // With the screen treated as an instrument panel, flat means tipped fully back
//! assert!((orientation.pitch - core::f32::consts::FRAC_PI_2).abs() < 1e-5);
//! ```

use nalgebra::Matrix3;

use crate::axes::remap_for_screen;
use crate::error::Error;
use crate::math::{orientation_from_matrix, rotation_matrix_from_vector};
use crate::types::{Orientation, ScreenOrientation};

/// Rotation matrix of `raw`, remapped into the frame of `screen`.
pub fn screen_rotation_matrix(raw: &[f32], screen: ScreenOrientation) -> Result<Matrix3<f32>, Error> {
    let matrix = rotation_matrix_from_vector(raw)?;
    Ok(remap_for_screen(&matrix, screen))
}

/// Azimuth, pitch and roll of `raw` for the given screen orientation.
///
/// Fails with [`Error::InvalidSample`] when `raw` has fewer than three
/// components, a non-finite component, or zero magnitude.
pub fn extract(raw: &[f32], screen: ScreenOrientation) -> Result<Orientation, Error> {
    let matrix = screen_rotation_matrix(raw, screen)?;
    Ok(orientation_from_matrix(&matrix))
}
