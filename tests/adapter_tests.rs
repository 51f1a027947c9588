use absolute_rotation::{
    AbsoluteRotationVector, Clock, EVENT_NAME, Error, LogLevel, OrientationEvent, ScreenOrientation, SensorProvider,
    Settings, vector_from_quaternion,
};
use nalgebra::{UnitQuaternion, Vector3};
use parking_lot::Mutex;
use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;

const EPSILON: f32 = 1e-5;

/// Rotation vector for a device held upright, facing a quarter turn east of north.
fn quarter_turn_east() -> [f32; 4] {
    let upright = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2);
    let turn = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -FRAC_PI_2);
    vector_from_quaternion(&(turn * upright))
}

#[derive(Clone, Default)]
struct StubProvider {
    registrations: Arc<Mutex<Vec<u32>>>,
}

impl SensorProvider for StubProvider {
    fn has_rotation_vector(&self) -> bool {
        true
    }

    fn register(&self, sampling_period_us: u32) -> Result<(), Error> {
        self.registrations.lock().push(sampling_period_us);
        Ok(())
    }

    fn unregister(&self) {}
}

/// Clock the test advances by hand.
#[derive(Clone, Default)]
struct ManualClock(Arc<Mutex<f64>>);

impl ManualClock {
    fn set(&self, now_ms: f64) {
        *self.0.lock() = now_ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        *self.0.lock()
    }
}

/// Clock that moves forward 1 ms on every reading.
#[derive(Default)]
struct TickingClock(AtomicU64);

impl Clock for TickingClock {
    fn now_ms(&self) -> f64 {
        self.0.fetch_add(1, Ordering::SeqCst) as f64
    }
}

type Delivered = Arc<Mutex<Vec<(String, OrientationEvent)>>>;

fn recording_sink(delivered: Delivered) -> impl Fn(&str, &OrientationEvent) -> Result<(), Error> {
    move |name: &str, event: &OrientationEvent| -> Result<(), Error> {
        delivered.lock().push((name.to_string(), *event));
        Ok(())
    }
}

/// Two samples 10 ms apart both reach the sink under the event name
#[test]
fn test_events_delivered_by_name() {
    let delivered = Delivered::default();
    let clock = ManualClock::default();
    let sensor = AbsoluteRotationVector::new(StubProvider::default(), recording_sink(delivered.clone()), clock.clone());
    sensor.start_updates().unwrap();

    let raw = quarter_turn_east();
    clock.set(1_000.0);
    sensor.on_sensor_changed(&raw, ScreenOrientation::Rotation0);
    clock.set(1_010.0);
    sensor.on_sensor_changed(&raw, ScreenOrientation::Rotation0);

    let delivered = delivered.lock();
    assert_eq!(delivered.len(), 2);
    assert!(delivered.iter().all(|(name, _)| name == EVENT_NAME));
    assert_eq!(delivered[0].1.timestamp, 1_000.0);
    assert_eq!(delivered[1].1.timestamp, 1_010.0);
    for (_, event) in delivered.iter() {
        assert!((event.x - FRAC_PI_2).abs() < EPSILON);
    }
}

/// Interval changes apply from the next sample without touching the last emission
#[test]
fn test_interval_change_mid_stream() {
    let delivered = Delivered::default();
    let clock = ManualClock::default();
    let sensor = AbsoluteRotationVector::new(StubProvider::default(), recording_sink(delivered.clone()), clock.clone());
    sensor.start_updates().unwrap();
    let raw = quarter_turn_east();

    clock.set(5.0);
    assert!(sensor.on_sensor_changed(&raw, ScreenOrientation::Rotation0).is_some());

    sensor.set_update_interval(100);
    clock.set(50.0);
    assert!(sensor.on_sensor_changed(&raw, ScreenOrientation::Rotation0).is_none());
    clock.set(105.0);
    assert!(sensor.on_sensor_changed(&raw, ScreenOrientation::Rotation0).is_some());

    assert_eq!(delivered.lock().len(), 2);
}

/// A sink that is not ready loses the event; the sample still used up its interval
#[test]
fn test_emit_failure_drops_event() {
    let ready = Arc::new(AtomicBool::new(false));
    let accepted = Arc::new(AtomicU64::new(0));
    let sink = {
        let ready = ready.clone();
        let accepted = accepted.clone();
        move |_name: &str, _event: &OrientationEvent| -> Result<(), Error> {
            if !ready.load(Ordering::SeqCst) {
                return Err(Error::EmitFailure("bridge not initialised".into()));
            }
            accepted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    };

    let clock = ManualClock::default();
    let settings = Settings {
        update_interval_ms: 10,
        log_level: LogLevel::Diagnostic,
    };
    let sensor = AbsoluteRotationVector::with_settings(StubProvider::default(), sink, clock.clone(), settings);
    sensor.start_updates().unwrap();
    let raw = quarter_turn_east();

    clock.set(10.0);
    assert!(sensor.on_sensor_changed(&raw, ScreenOrientation::Rotation0).is_none());

    // Not retried when the sink comes up inside the same interval
    ready.store(true, Ordering::SeqCst);
    clock.set(15.0);
    assert!(sensor.on_sensor_changed(&raw, ScreenOrientation::Rotation0).is_none());
    assert_eq!(accepted.load(Ordering::SeqCst), 0);

    clock.set(20.0);
    assert!(sensor.on_sensor_changed(&raw, ScreenOrientation::Rotation0).is_some());
    assert_eq!(accepted.load(Ordering::SeqCst), 1);
}

/// Invalid samples never reach the sink
#[test]
fn test_invalid_sample_not_delivered() {
    let delivered = Delivered::default();
    let clock = ManualClock::default();
    let sensor = AbsoluteRotationVector::new(StubProvider::default(), recording_sink(delivered.clone()), clock.clone());
    sensor.set_log_level(1);
    sensor.start_updates().unwrap();

    clock.set(1.0);
    assert!(sensor.on_sensor_changed(&[0.0, 0.0, 0.0, 0.0], ScreenOrientation::Rotation0).is_none());
    clock.set(2.0);
    assert!(sensor.on_sensor_changed(&[f32::NAN, 0.0, 0.0], ScreenOrientation::Rotation90).is_none());
    clock.set(3.0);
    assert!(sensor.on_sensor_changed(&[0.1], ScreenOrientation::Rotation180).is_none());

    assert!(delivered.lock().is_empty());
}

/// Stopping detaches the stream; restarting registers again at the current interval
#[test]
fn test_restart_reregisters() {
    let delivered = Delivered::default();
    let clock = ManualClock::default();
    let provider = StubProvider::default();
    let sensor = AbsoluteRotationVector::new(provider.clone(), recording_sink(delivered.clone()), clock.clone());
    let raw = quarter_turn_east();

    sensor.start_updates().unwrap();
    sensor.stop_updates();
    clock.set(10.0);
    assert!(sensor.on_sensor_changed(&raw, ScreenOrientation::Rotation0).is_none());

    sensor.set_update_interval(20);
    sensor.start_updates().unwrap();
    clock.set(30.0);
    assert!(sensor.on_sensor_changed(&raw, ScreenOrientation::Rotation0).is_some());

    assert_eq!(*provider.registrations.lock(), vec![0, 20_000]);
}

/// Samples delivered from several threads are throttled as one stream
#[test]
fn test_concurrent_delivery() {
    let delivered = Delivered::default();
    let settings = Settings {
        update_interval_ms: 10,
        ..Default::default()
    };
    let sensor = Arc::new(AbsoluteRotationVector::with_settings(
        StubProvider::default(),
        recording_sink(delivered.clone()),
        TickingClock::default(),
        settings,
    ));
    sensor.start_updates().unwrap();
    let raw = quarter_turn_east();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let sensor = Arc::clone(&sensor);
            thread::spawn(move || {
                for _ in 0..250 {
                    sensor.on_sensor_changed(&raw, ScreenOrientation::Rotation0);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Creation read t=0; the 1000 samples read t=1..=1000
    let mut timestamps: Vec<f64> = delivered.lock().iter().map(|(_, e)| e.timestamp).collect();
    timestamps.sort_by(f64::total_cmp);
    let expected: Vec<f64> = (1..=100).map(|i| (i * 10) as f64).collect();
    assert_eq!(timestamps, expected);
}

/// Event payload carries exactly the fields the host reads
#[test]
fn test_event_payload_fields() -> Result<(), Box<dyn std::error::Error>> {
    let event = OrientationEvent {
        x: 0.5,
        y: -0.25,
        z: 1.0,
        timestamp: 1_700_000_000_000.0,
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(event)?;
    let text = String::from_utf8(writer.into_inner()?)?;

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("x,y,z,timestamp"));
    assert_eq!(lines.next(), Some("0.5,-0.25,1.0,1700000000000.0"));
    Ok(())
}
