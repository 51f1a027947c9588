//! Error types for the rotation-vector pipeline

use thiserror::Error;

use crate::axes::Axis;

/// Why a raw rotation-vector sample could not be turned into a rotation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleDefect {
    /// Fewer than the three quaternion components the conversion needs.
    #[error("expected at least 3 components, got {0}")]
    TooFewComponents(usize),
    /// A component was NaN or infinite.
    #[error("component is not finite")]
    NonFinite,
    /// The reconstructed quaternion has zero length.
    #[error("quaternion has zero magnitude")]
    ZeroMagnitude,
}

/// Errors surfaced by the orientation pipeline and its sensor adapter.
///
/// None of these are fatal: invalid samples and failed emissions are dropped
/// and the stream carries on with the next sample.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The device has no rotation-vector sensor.
    #[error("no AbsoluteRotationVector sensor found")]
    SensorUnavailable,
    /// A degenerate or non-finite rotation vector was delivered.
    #[error("invalid rotation vector sample: {0}")]
    InvalidSample(#[from] SampleDefect),
    /// The event sink could not accept the event.
    #[error("event sink not ready: {0}")]
    EmitFailure(String),
    /// Both remap targets name the same physical axis.
    #[error("cannot remap {x:?} and {y:?} onto the same axis")]
    InvalidRemap { x: Axis, y: Axis },
}
