//! Per-sample orchestration: throttle, extract, stamp

use crate::error::Error;
use crate::orientation::extract;
use crate::throttle::should_emit;
use crate::types::{LogLevel, OrientationEvent, ScreenOrientation, ThrottleState};

/// Receives samples the pipeline had to drop.
///
/// Dropped samples never reach the event sink, so this is the only place
/// they can be seen.
pub trait SampleObserver {
    /// Called with the [`Error::InvalidSample`] for a degenerate sample.
    fn invalid_sample(&self, error: &Error);
}

/// Ignores dropped samples.
impl SampleObserver for () {
    fn invalid_sample(&self, _error: &Error) {}
}

/// Logs dropped samples through `tracing` when the log level allows it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver {
    level: LogLevel,
}

impl LogObserver {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }
}

impl SampleObserver for LogObserver {
    fn invalid_sample(&self, error: &Error) {
        if self.level >= LogLevel::Diagnostic {
            tracing::debug!(%error, "dropping rotation vector sample");
        }
    }
}

/// Runs one raw sample through the pipeline.
///
/// The throttle is consulted first, so samples arriving before the interval
/// has elapsed skip the matrix math entirely. Due samples are converted and
/// stamped with `now_ms`. A degenerate sample yields `None` and is reported
/// to `observer`; the throttle still counts it as the interval's sample.
///
/// # Example
/// ```
/// use absolute_rotation::{ScreenOrientation, ThrottleState, on_sample};
///
/// let mut state = ThrottleState::new(0);
/// let event = on_sample(&[0.0, 0.0, 0.0, 1.0], ScreenOrientation::Rotation0, 12.0, &mut state, &());
///
/// assert_eq!(event.map(|e| e.timestamp), Some(12.0));
/// ```
pub fn on_sample<O: SampleObserver + ?Sized>(
    raw: &[f32],
    screen: ScreenOrientation,
    now_ms: f64,
    state: &mut ThrottleState,
    observer: &O,
) -> Option<OrientationEvent> {
    if !should_emit(now_ms, state) {
        return None;
    }

    match extract(raw, screen) {
        Ok(orientation) => Some(OrientationEvent::new(orientation, now_ms)),
        Err(error) => {
            observer.invalid_sample(&error);
            None
        }
    }
}
