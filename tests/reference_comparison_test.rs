use madgwick_ahrs::Madgwick;
use nalgebra::{UnitQuaternion, Vector3};
use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct ReferenceSample {
    time: f32,
    gyro_x: f32,
    gyro_y: f32,
    gyro_z: f32,
    accel_x: f32,
    accel_y: f32,
    accel_z: f32,
    mag_x: f32,
    mag_y: f32,
    mag_z: f32,
    q_w: f32,
    q_x: f32,
    q_y: f32,
    q_z: f32,
}

const SAMPLE_RATE: f32 = 256.0;
const BETA: f32 = 0.1;
const TOLERANCE: f32 = 1e-4;

fn load_reference() -> Result<Vec<ReferenceSample>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path("testdata/reference_trajectory.csv")?;
    let mut samples = Vec::new();
    for result in reader.deserialize() {
        samples.push(result?);
    }
    Ok(samples)
}

/// The trajectory starts 29 degrees away from identity and rotates about all three
/// axes with a small gyroscope bias and noisy readings (accelerometer in m/s^2,
/// magnetometer in uT). Reference quaternions come from an independent
/// double-precision implementation of the same algorithm.
#[test]
fn test_matches_reference_trajectory() -> Result<(), Box<dyn Error>> {
    let samples = load_reference()?;
    assert_eq!(samples.len(), 1024);

    let mut filter = Madgwick::new(1.0 / SAMPLE_RATE, BETA)?;
    let mut max_error: f32 = 0.0;

    for sample in &samples {
        filter.update(
            Vector3::new(sample.gyro_x, sample.gyro_y, sample.gyro_z),
            Vector3::new(sample.accel_x, sample.accel_y, sample.accel_z),
            Vector3::new(sample.mag_x, sample.mag_y, sample.mag_z),
        )?;

        let q = filter.quaternion();
        let error = (q.w - sample.q_w)
            .abs()
            .max((q.i - sample.q_x).abs())
            .max((q.j - sample.q_y).abs())
            .max((q.k - sample.q_z).abs());
        assert!(
            error < TOLERANCE,
            "t = {} s: got ({}, {}, {}, {}), expected ({}, {}, {}, {})",
            sample.time,
            q.w,
            q.i,
            q.j,
            q.k,
            sample.q_w,
            sample.q_x,
            sample.q_y,
            sample.q_z
        );
        max_error = max_error.max(error);
    }

    println!("max component error: {:e}", max_error);
    Ok(())
}

/// Replaying the same data twice from a reset filter gives identical results
#[test]
fn test_reset_replays_deterministically() -> Result<(), Box<dyn Error>> {
    let samples = load_reference()?;
    let mut filter = Madgwick::new(1.0 / SAMPLE_RATE, BETA)?;

    let run = |filter: &mut Madgwick| -> Result<UnitQuaternion<f32>, Box<dyn Error>> {
        for sample in samples.iter().take(256) {
            filter.update(
                Vector3::new(sample.gyro_x, sample.gyro_y, sample.gyro_z),
                Vector3::new(sample.accel_x, sample.accel_y, sample.accel_z),
                Vector3::new(sample.mag_x, sample.mag_y, sample.mag_z),
            )?;
        }
        Ok(filter.quaternion())
    };

    let first = run(&mut filter)?;
    filter.reset();
    let second = run(&mut filter)?;

    assert_eq!(first, second);

    let expected = &samples[255];
    assert!((first.w - expected.q_w).abs() < TOLERANCE);
    assert!((first.i - expected.q_x).abs() < TOLERANCE);
    assert!((first.j - expected.q_y).abs() < TOLERANCE);
    assert!((first.k - expected.q_z).abs() < TOLERANCE);
    Ok(())
}
