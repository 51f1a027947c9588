//! Sensor adapter: lifecycle, settings and event delivery
//!
//! [`AbsoluteRotationVector`] sits between a platform sensor service and a
//! host application. The platform side is abstracted as a [`SensorProvider`]
//! and the host side as an [`EventSink`]; the adapter feeds every delivered
//! sample through [`on_sample`](crate::on_sample) and forwards the resulting
//! events under the name [`EVENT_NAME`].
//!
//! # Example
//! ```
//! use absolute_rotation::{
//!     AbsoluteRotationVector, Error, OrientationEvent, ScreenOrientation, SensorProvider,
//!     SystemClock,
//! };
//!
//! struct AlwaysThere;
//!
//! impl SensorProvider for AlwaysThere {
//!     fn has_rotation_vector(&self) -> bool { true }
//!     fn register(&self, _sampling_period_us: u32) -> Result<(), Error> { Ok(()) }
//!     fn unregister(&self) {}
//! }
//!
//! let sink = |name: &str, event: &OrientationEvent| -> Result<(), Error> {
//!     println!("{name}: azimuth {:.2} rad", event.x);
//!     Ok(())
//! };
//!
//! let sensor = AbsoluteRotationVector::new(AlwaysThere, sink, SystemClock);
//! sensor.is_available().unwrap();
//! sensor.start_updates().unwrap();
//!
//! let event = sensor.on_sensor_changed(&[0.0, 0.0, 0.0, 1.0], ScreenOrientation::Rotation0);
//! assert!(event.is_some());
//! ```

use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

use crate::error::Error;
use crate::pipeline::{LogObserver, on_sample};
use crate::types::{LogLevel, OrientationEvent, ScreenOrientation, Settings, ThrottleState};

/// Name the host listens on for orientation events.
pub const EVENT_NAME: &str = "AbsoluteRotationVector";

/// Platform sensor service.
pub trait SensorProvider {
    /// Whether the device has a rotation-vector sensor.
    fn has_rotation_vector(&self) -> bool;

    /// Starts sample delivery at the requested period, in microseconds.
    fn register(&self, sampling_period_us: u32) -> Result<(), Error>;

    /// Stops sample delivery.
    fn unregister(&self);
}

/// Host side that receives emitted events.
pub trait EventSink {
    /// Delivers `event` under `name`. Fails with [`Error::EmitFailure`] if the
    /// host is not ready.
    fn emit(&self, name: &str, event: &OrientationEvent) -> Result<(), Error>;
}

impl<F> EventSink for F
where
    F: Fn(&str, &OrientationEvent) -> Result<(), Error>,
{
    fn emit(&self, name: &str, event: &OrientationEvent) -> Result<(), Error> {
        self(name, event)
    }
}

/// Wall-clock time source, in milliseconds since the UNIX epoch.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// [`Clock`] backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// Mutable state shared between the delivery thread and the control calls.
#[derive(Debug)]
struct StreamState {
    throttle: ThrottleState,
    settings: Settings,
    running: bool,
}

/// Absolute orientation sensor module.
///
/// Safe to share between threads: the throttle state and settings live
/// behind one lock, held for the whole read-modify-write of a sample.
pub struct AbsoluteRotationVector<P, S, C = SystemClock> {
    provider: P,
    sink: S,
    clock: C,
    state: Mutex<StreamState>,
    available: OnceLock<bool>,
}

impl<P, S, C> AbsoluteRotationVector<P, S, C>
where
    P: SensorProvider,
    S: EventSink,
    C: Clock,
{
    /// Creates the module with default [`Settings`].
    ///
    /// The throttle counts its first interval from the moment of creation.
    pub fn new(provider: P, sink: S, clock: C) -> Self {
        Self::with_settings(provider, sink, clock, Settings::default())
    }

    pub fn with_settings(provider: P, sink: S, clock: C, settings: Settings) -> Self {
        let state = StreamState {
            throttle: ThrottleState {
                last_emitted_at_ms: clock.now_ms(),
                interval_ms: settings.update_interval_ms,
            },
            settings,
            running: false,
        };

        Self {
            provider,
            sink,
            clock,
            state: Mutex::new(state),
            available: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        EVENT_NAME
    }

    /// Checks for a rotation-vector sensor. The first answer is cached.
    pub fn is_available(&self) -> Result<(), Error> {
        let available = *self.available.get_or_init(|| {
            let available = self.provider.has_rotation_vector();
            if !available {
                tracing::warn!("no rotation vector sensor on this device");
            }
            available
        });

        if available {
            Ok(())
        } else {
            Err(Error::SensorUnavailable)
        }
    }

    /// Sets the minimum time between events. Negative values are clamped to 0.
    ///
    /// The throttle picks this up on the next sample. The platform sampling
    /// period is only requested again on the next [`start_updates`](Self::start_updates).
    pub fn set_update_interval(&self, interval_ms: i32) {
        let mut state = self.state.lock();
        state.throttle.set_interval_ms(interval_ms);
        state.settings.update_interval_ms = state.throttle.interval_ms();

        if state.settings.log_level >= LogLevel::Diagnostic {
            tracing::info!(interval_ms = state.settings.update_interval_ms, "update interval changed");
        }
    }

    /// Sets diagnostic verbosity; see [`LogLevel::from_level`].
    pub fn set_log_level(&self, level: i32) {
        self.state.lock().settings.log_level = LogLevel::from_level(level);
    }

    pub fn settings(&self) -> Settings {
        self.state.lock().settings
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Registers with the sensor provider at the configured interval.
    pub fn start_updates(&self) -> Result<(), Error> {
        self.is_available()?;

        let settings = self.settings();
        self.provider.register(settings.sampling_period_us())?;
        self.state.lock().running = true;

        if settings.log_level >= LogLevel::Diagnostic {
            tracing::info!(
                sampling_period_us = settings.sampling_period_us(),
                "rotation vector updates started"
            );
        }
        Ok(())
    }

    /// Unregisters from the sensor provider.
    pub fn stop_updates(&self) {
        self.provider.unregister();

        let mut state = self.state.lock();
        state.running = false;
        if state.settings.log_level >= LogLevel::Diagnostic {
            tracing::info!("rotation vector updates stopped");
        }
    }

    /// Handles one raw sample from the provider.
    ///
    /// Returns the event that was delivered to the sink, or `None` when the
    /// sample was throttled, invalid, arrived while stopped, or the sink
    /// refused the event.
    pub fn on_sensor_changed(&self, values: &[f32], screen: ScreenOrientation) -> Option<OrientationEvent> {
        let (event, log_level) = {
            let mut state = self.state.lock();
            if !state.running {
                return None;
            }
            // Stamped under the lock so emission times follow lock order
            let now_ms = self.clock.now_ms();
            let log_level = state.settings.log_level;
            let observer = LogObserver::new(log_level);
            (on_sample(values, screen, now_ms, &mut state.throttle, &observer), log_level)
        };
        let event = event?;

        if let Err(error) = self.sink.emit(EVENT_NAME, &event) {
            tracing::error!(%error, "dropping orientation event");
            return None;
        }

        if log_level >= LogLevel::Verbose {
            tracing::trace!(
                azimuth = event.x,
                pitch = event.y,
                roll = event.z,
                timestamp = event.timestamp,
                "orientation event emitted"
            );
        }
        Some(event)
    }
}
