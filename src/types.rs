//! Core types shared by the pipeline stages

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::math::RAD_TO_DEG;

/// Rotation of the screen relative to the device's natural orientation.
///
/// Mirrors the platform's display rotation codes: 0, 1, 2 and 3 for
/// 0°, 90°, 180° and 270°.
///
/// # Example
/// ```
/// use absolute_rotation::ScreenOrientation;
///
/// assert_eq!(ScreenOrientation::from_code(1), ScreenOrientation::Rotation90);
///
/// // Anything the platform should never report falls back to the natural orientation
/// assert_eq!(ScreenOrientation::from_code(7), ScreenOrientation::Rotation0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScreenOrientation {
    /// Natural orientation
    #[default]
    Rotation0,
    /// Rotated 90° counter-clockwise
    Rotation90,
    /// Upside down
    Rotation180,
    /// Rotated 90° clockwise
    Rotation270,
}

impl ScreenOrientation {
    /// All orientations, in platform code order.
    pub const ALL: [ScreenOrientation; 4] = [
        ScreenOrientation::Rotation0,
        ScreenOrientation::Rotation90,
        ScreenOrientation::Rotation180,
        ScreenOrientation::Rotation270,
    ];

    /// Converts a platform display rotation code. Unknown codes map to `Rotation0`.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => ScreenOrientation::Rotation90,
            2 => ScreenOrientation::Rotation180,
            3 => ScreenOrientation::Rotation270,
            _ => ScreenOrientation::Rotation0,
        }
    }

    /// The platform display rotation code.
    pub fn code(self) -> i32 {
        match self {
            ScreenOrientation::Rotation0 => 0,
            ScreenOrientation::Rotation90 => 1,
            ScreenOrientation::Rotation180 => 2,
            ScreenOrientation::Rotation270 => 3,
        }
    }
}

/// Azimuth, pitch and roll in radians.
///
/// - `azimuth`: heading, in [-π, π]
/// - `pitch`: forward/backward tilt, in [-π/2, π/2]
/// - `roll`: left/right tilt, in [-π, π]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub azimuth: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Orientation {
    pub fn new(azimuth: f32, pitch: f32, roll: f32) -> Self {
        Self {
            azimuth,
            pitch,
            roll,
        }
    }

    /// Same angles in degrees.
    pub fn to_degrees(&self) -> Vector3<f32> {
        Vector3::from(*self) * RAD_TO_DEG
    }
}

impl From<Orientation> for Vector3<f32> {
    fn from(orientation: Orientation) -> Self {
        Vector3::new(orientation.azimuth, orientation.pitch, orientation.roll)
    }
}

/// Orientation event delivered to listeners.
///
/// Field names match the payload the host expects: `x` is azimuth, `y` is
/// pitch, `z` is roll (all radians) and `timestamp` is milliseconds since
/// the UNIX epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationEvent {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub timestamp: f64,
}

impl OrientationEvent {
    pub fn new(orientation: Orientation, timestamp: f64) -> Self {
        Self {
            x: orientation.azimuth,
            y: orientation.pitch,
            z: orientation.roll,
            timestamp,
        }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::new(self.x, self.y, self.z)
    }
}

/// Throttle bookkeeping, owned by whoever drives the pipeline.
///
/// # Example
/// ```
/// use absolute_rotation::{ThrottleState, should_emit};
///
/// let mut state = ThrottleState::new(100);
/// assert!(!should_emit(50.0, &mut state));
/// assert!(should_emit(100.0, &mut state));
/// assert_eq!(state.last_emitted_at_ms(), 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrottleState {
    pub(crate) last_emitted_at_ms: f64,
    pub(crate) interval_ms: u32,
}

impl ThrottleState {
    /// State with nothing emitted yet (`last_emitted_at_ms == 0`).
    pub fn new(interval_ms: i32) -> Self {
        Self::starting_at(interval_ms, 0.0)
    }

    /// State whose first emission is measured from `now_ms`.
    pub fn starting_at(interval_ms: i32, now_ms: f64) -> Self {
        Self {
            last_emitted_at_ms: now_ms,
            interval_ms: clamp_interval(interval_ms),
        }
    }

    pub fn last_emitted_at_ms(&self) -> f64 {
        self.last_emitted_at_ms
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Changes the minimum interval. Negative values are clamped to 0.
    ///
    /// Takes effect on the next evaluation; the last emission time is kept.
    pub fn set_interval_ms(&mut self, interval_ms: i32) {
        self.interval_ms = clamp_interval(interval_ms);
    }
}

impl Default for ThrottleState {
    fn default() -> Self {
        Self::new(0)
    }
}

fn clamp_interval(interval_ms: i32) -> u32 {
    interval_ms.max(0) as u32
}

/// Diagnostic verbosity. Has no effect on what is computed or emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Only sink failures are logged
    #[default]
    Off,
    /// Dropped samples and lifecycle changes are logged too
    Diagnostic,
    /// Every emitted event is logged
    Verbose,
}

impl LogLevel {
    /// Converts the integer level the host passes in.
    pub fn from_level(level: i32) -> Self {
        match level {
            i32::MIN..=0 => LogLevel::Off,
            1 => LogLevel::Diagnostic,
            _ => LogLevel::Verbose,
        }
    }
}

/// Runtime settings for the sensor adapter.
///
/// # Example
/// ```
/// use absolute_rotation::{LogLevel, Settings};
///
/// let settings = Settings {
///     update_interval_ms: 100, // at most 10 events per second
///     ..Default::default()
/// };
/// assert_eq!(settings.log_level, LogLevel::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    /// Minimum time between emitted events, in milliseconds. 0 emits every sample.
    pub update_interval_ms: u32,
    /// Diagnostic verbosity
    pub log_level: LogLevel,
}

impl Settings {
    /// Sampling period requested from the platform, in microseconds.
    pub fn sampling_period_us(&self) -> u32 {
        self.update_interval_ms.saturating_mul(1000)
    }
}
