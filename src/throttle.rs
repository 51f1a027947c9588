//! Emission rate limiting
//!
//! Samples may arrive much faster than consumers want them. The throttle
//! lets a sample through only once the configured interval has elapsed since
//! the last one it let through.

use crate::types::ThrottleState;

/// Decides whether a sample arriving at `now_ms` should be processed.
///
/// Returns `true` and records `now_ms` as the last emission when at least
/// `interval_ms` has elapsed since the previous emission. A negative elapsed
/// time (clock stepped backwards) or a non-finite timestamp is treated as not due.
///
/// # Example
/// ```
/// use absolute_rotation::{ThrottleState, should_emit};
///
/// let mut state = ThrottleState::new(100);
///
/// assert!(!should_emit(50.0, &mut state));
/// assert!(should_emit(100.0, &mut state));
/// assert!(!should_emit(150.0, &mut state));
/// assert!(should_emit(200.0, &mut state));
/// ```
#[inline]
pub fn should_emit(now_ms: f64, state: &mut ThrottleState) -> bool {
    let elapsed = now_ms - state.last_emitted_at_ms;

    if now_ms.is_finite() && elapsed >= f64::from(state.interval_ms) {
        state.last_emitted_at_ms = now_ms;
        true
    } else {
        false
    }
}
