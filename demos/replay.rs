//! Replays recorded rotation-vector samples through the sensor adapter
//!
//! Loads `testdata/rotation_samples.csv`, drives an [`AbsoluteRotationVector`]
//! with the recorded timestamps and prints every event that reaches the host.
//!
//! Features demonstrated:
//! - Plugging a platform provider and a host sink into the adapter
//! - Throttling a 200 Hz stream down to the configured update interval
//! - Diagnostic logging of dropped samples through `tracing`
//!
//! Run with: `RUST_LOG=debug cargo run --example replay -- 50`
//! The optional argument is the update interval in milliseconds.

use absolute_rotation::{
    AbsoluteRotationVector, Clock, Error, OrientationEvent, ScreenOrientation, SensorProvider,
};
use serde::Deserialize;
use std::cell::Cell;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct RecordedSample {
    #[serde(rename = "Time (ms)")]
    time: f64,
    #[serde(rename = "X")]
    x: f32,
    #[serde(rename = "Y")]
    y: f32,
    #[serde(rename = "Z")]
    z: f32,
    #[serde(rename = "W")]
    w: f32,
    #[serde(rename = "Screen")]
    screen: i32,
}

/// Stands in for the platform sensor service; the recording is the sensor.
struct RecordingProvider;

impl SensorProvider for RecordingProvider {
    fn has_rotation_vector(&self) -> bool {
        true
    }

    fn register(&self, sampling_period_us: u32) -> Result<(), Error> {
        println!("Registered at a sampling period of {} us", sampling_period_us);
        Ok(())
    }

    fn unregister(&self) {
        println!("Unregistered");
    }
}

/// Clock that follows the recorded timestamps.
#[derive(Default)]
struct ReplayClock(Cell<f64>);

impl Clock for &ReplayClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

fn print_event(name: &str, event: &OrientationEvent) -> Result<(), Error> {
    let degrees = event.orientation().to_degrees();
    println!(
        "[{:>7.1} ms] {}: azimuth {:>7.2}, pitch {:>6.2}, roll {:>7.2}",
        event.timestamp, name, degrees.x, degrees.y, degrees.z
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let interval_ms: i32 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 50,
    };

    let mut reader = csv::Reader::from_path("testdata/rotation_samples.csv")?;
    let samples: Vec<RecordedSample> = reader.deserialize().collect::<Result<_, _>>()?;

    let clock = ReplayClock::default();
    let sensor = AbsoluteRotationVector::new(RecordingProvider, print_event, &clock);
    sensor.set_update_interval(interval_ms);
    sensor.set_log_level(1);
    sensor.start_updates()?;

    let mut emitted = 0;
    for sample in &samples {
        clock.0.set(sample.time);
        let values = [sample.x, sample.y, sample.z, sample.w];
        if sensor
            .on_sensor_changed(&values, ScreenOrientation::from_code(sample.screen))
            .is_some()
        {
            emitted += 1;
        }
    }

    sensor.stop_updates();
    println!("{} of {} samples emitted at {} ms", emitted, samples.len(), interval_ms);
    Ok(())
}
