//! Absolute Rotation - screen-aware device orientation from a rotation-vector sensor
//!
//! Converts platform rotation-vector samples into azimuth, pitch and roll
//! as seen from the screen's current visual frame, and rate-limits the
//! resulting events so consumers are not flooded.
//!
//! Each sample goes through the same steps:
//!
//! 1. [`should_emit`] checks the throttle; samples inside the interval stop here
//! 2. [`rotation_matrix_from_vector`] turns the quaternion into a rotation matrix
//! 3. [`remap_for_screen`] reassigns device axes for the screen orientation
//! 4. [`orientation_from_matrix`] extracts azimuth, pitch and roll
//!
//! [`on_sample`] runs the whole sequence with caller-owned [`ThrottleState`].
//! [`AbsoluteRotationVector`] wraps it with lifecycle calls and delivery to a
//! host [`EventSink`].
//!
//! # Quick Start
//!
//! ```rust
//! use absolute_rotation::{ScreenOrientation, ThrottleState, on_sample};
//!
//! let mut throttle = ThrottleState::new(100); // at most one event per 100 ms
//!
//! // Rotation vector [x, y, z, w] as delivered by the platform
//! let raw = [0.0, 0.0, 0.0, 1.0];
//!
//! let first = on_sample(&raw, ScreenOrientation::Rotation0, 100.0, &mut throttle, &());
//! let second = on_sample(&raw, ScreenOrientation::Rotation0, 150.0, &mut throttle, &());
//!
//! assert!(first.is_some());
//! assert!(second.is_none()); // throttled
//!
//! let event = first.unwrap();
//! println!("azimuth {:.3} pitch {:.3} roll {:.3}", event.x, event.y, event.z);
//! ```

pub mod axes;
mod error;
mod math;
pub mod orientation;
pub mod pipeline;
pub mod sensor;
mod throttle;
mod types;

// Re-export all public types and functions
pub use axes::{Axis, remap_coordinate_system, remap_for_screen, restore_coordinate_system, target_axes};
pub use error::{Error, SampleDefect};
pub use math::{
    DEG_TO_RAD, RAD_TO_DEG, orientation_from_matrix, quaternion_from_vector, rotation_matrix_from_vector,
    vector_from_quaternion,
};
pub use orientation::{extract, screen_rotation_matrix};
pub use pipeline::{LogObserver, SampleObserver, on_sample};
pub use sensor::{AbsoluteRotationVector, Clock, EVENT_NAME, EventSink, SensorProvider, SystemClock};
pub use throttle::should_emit;
pub use types::*;
