//! Mathematical utilities and nalgebra extensions for the Madgwick AHRS library

use nalgebra::{UnitQuaternion, Vector3};

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Extension trait for Vector3 operations
pub trait Vector3Ext {
    /// Unit vector in the same direction, or `None` if the largest component is at most `min_norm`
    ///
    /// The vector is scaled by its largest absolute component before the
    /// norm is taken, so very large or very small readings neither overflow
    /// nor underflow.
    fn try_unit(&self, min_norm: f32) -> Option<Vector3<f32>>;

    /// Whether every component is finite
    fn all_finite(&self) -> bool;

    /// Convert degrees to radians
    fn deg_to_rad(&self) -> Vector3<f32>;

    /// Convert radians to degrees
    fn rad_to_deg(&self) -> Vector3<f32>;
}

impl Vector3Ext for Vector3<f32> {
    fn try_unit(&self, min_norm: f32) -> Option<Vector3<f32>> {
        let scale = self.amax();
        if !scale.is_finite() || scale <= min_norm {
            return None;
        }

        // Largest component is now +-1, so the norm lies in [1, sqrt(3)]
        let scaled = *self / scale;
        Some(scaled / scaled.norm())
    }

    fn all_finite(&self) -> bool {
        self.iter().all(|v| v.is_finite())
    }

    fn deg_to_rad(&self) -> Vector3<f32> {
        *self * DEG_TO_RAD
    }

    fn rad_to_deg(&self) -> Vector3<f32> {
        *self * RAD_TO_DEG
    }
}

/// Roll, pitch and yaw of a sensor-to-earth orientation
///
/// Angles use the Z-Y-X convention in the filter's earth frame: yaw about
/// earth Z (up, counterclockwise from magnetic north), then pitch about the
/// rotated Y axis, then roll about the rotated X axis. Angles are returned as
/// `Vector3::new(roll, pitch, yaw)`.
pub trait QuaternionExt {
    /// Roll, pitch and yaw in radians
    fn roll_pitch_yaw(&self) -> Vector3<f32>;

    /// Roll, pitch and yaw in degrees
    fn roll_pitch_yaw_degrees(&self) -> Vector3<f32>;

    /// Orientation from roll, pitch and yaw in degrees
    fn from_roll_pitch_yaw_degrees(angles: Vector3<f32>) -> UnitQuaternion<f32>;
}

impl QuaternionExt for UnitQuaternion<f32> {
    fn roll_pitch_yaw(&self) -> Vector3<f32> {
        let (q1, q2, q3, q4) = (self.w, self.i, self.j, self.k);

        let roll = (2.0 * (q1 * q2 + q3 * q4)).atan2(1.0 - 2.0 * (q2 * q2 + q3 * q3));
        // Rounding can push the sine just past +-1 near gimbal lock
        let pitch = (2.0 * (q1 * q3 - q4 * q2)).clamp(-1.0, 1.0).asin();
        let yaw = (2.0 * (q1 * q4 + q2 * q3)).atan2(1.0 - 2.0 * (q3 * q3 + q4 * q4));

        Vector3::new(roll, pitch, yaw)
    }

    fn roll_pitch_yaw_degrees(&self) -> Vector3<f32> {
        self.roll_pitch_yaw().rad_to_deg()
    }

    fn from_roll_pitch_yaw_degrees(angles: Vector3<f32>) -> UnitQuaternion<f32> {
        let radians = angles.deg_to_rad();
        UnitQuaternion::from_euler_angles(radians.x, radians.y, radians.z)
    }
}
