use madgwick_ahrs::{Madgwick, MadgwickError, QuaternionExt};
use nalgebra::{UnitQuaternion, Vector3};

const SAMPLE_RATE: f32 = 256.0;
const BETA: f32 = 0.1;

fn main() -> Result<(), MadgwickError> {
    let mut filter = Madgwick::new(1.0 / SAMPLE_RATE, BETA)?;

    // Static sensor rolled 20 deg, pitched -15 deg and facing 30 deg from north
    let truth = UnitQuaternion::from_roll_pitch_yaw_degrees(Vector3::new(20.0, -15.0, 30.0));
    let accelerometer = truth.inverse() * Vector3::new(0.0, 0.0, 9.81);
    let magnetometer = truth.inverse() * Vector3::new(20.0, 0.0, -42.0);

    println!("time (s)   roll    pitch     yaw   error (deg)");
    for i in 0..(8 * SAMPLE_RATE as usize) {
        filter.update(Vector3::zeros(), accelerometer, magnetometer)?;

        if i % (SAMPLE_RATE as usize / 2) == 0 {
            let euler = filter.quaternion().roll_pitch_yaw_degrees();
            let error = filter.quaternion().angle_to(&truth).to_degrees();
            println!(
                "{:8.2} {:7.2} {:8.2} {:7.2} {:10.3}",
                i as f32 / SAMPLE_RATE,
                euler.x,
                euler.y,
                euler.z,
                error
            );
        }
    }

    Ok(())
}
