use madgwick_ahrs::{Madgwick, MadgwickError};
use nalgebra::Vector3;

const SAMPLE_PERIOD: f32 = 1.0 / 256.0; // 256 Hz sensor output rate
const BETA: f32 = 0.1;

fn main() -> Result<(), MadgwickError> {
    let mut filter = Madgwick::new(SAMPLE_PERIOD, BETA)?;

    // replace these with actual sensor readings, gyroscope in rad/s
    let gyroscope = Vector3::new(0.01, 0.02, 0.03);
    let accelerometer = Vector3::new(0.4, 0.8, 9.8);
    let magnetometer = Vector3::new(0.3, 0.1, 0.5);

    filter.update(gyroscope, accelerometer, magnetometer)?;

    let q = filter.quaternion();
    println!(
        "Estimated quaternion: w={:.6} x={:.6} y={:.6} z={:.6}",
        q.w, q.i, q.j, q.k
    );

    Ok(())
}
