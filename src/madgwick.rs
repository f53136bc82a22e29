//! Madgwick's gradient-descent orientation filter

use nalgebra::{Quaternion, UnitQuaternion, Vector2, Vector3, Vector4};

use crate::error::{MadgwickError, Result, Sensor};
use crate::logging::{log_debug, log_warn};
use crate::math::Vector3Ext;
use crate::types::MadgwickSettings;

/// Accelerometer and magnetometer readings whose largest component is at or
/// below this magnitude are rejected
pub const MIN_SENSOR_NORM: f32 = f32::MIN_POSITIVE;

/// Gradients at or below this magnitude are treated as "no correction needed"
pub const MIN_GRADIENT_NORM: f32 = 1e-12;

/// Madgwick orientation filter
///
/// Fuses gyroscope, accelerometer and magnetometer samples taken at a fixed
/// rate into an orientation quaternion. Gyroscope integration provides the
/// short-term motion, and a normalised gradient-descent step of size `beta`
/// pulls the estimate towards the gravity and magnetic field directions the
/// other two sensors observe.
///
/// The quaternion maps the sensor frame to the earth frame (earth Z up,
/// earth X towards magnetic north). It starts at identity.
///
/// # Example
/// ```
/// use madgwick_ahrs::Madgwick;
/// use nalgebra::Vector3;
///
/// let mut filter = Madgwick::new(1.0 / 256.0, 0.1)?;
///
/// let gyroscope = Vector3::new(0.01, 0.02, 0.03); // rad/s
/// let accelerometer = Vector3::new(0.4, 0.8, 9.8);
/// let magnetometer = Vector3::new(0.3, 0.1, 0.5);
///
/// filter.update(gyroscope, accelerometer, magnetometer)?;
///
/// let q = filter.quaternion();
/// assert!((q.into_inner().norm() - 1.0).abs() < 1e-5);
/// # Ok::<(), madgwick_ahrs::MadgwickError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Madgwick {
    settings: MadgwickSettings,
    quaternion: UnitQuaternion<f32>,
}

impl Madgwick {
    /// Create a filter for the given sample period (seconds) and gain
    pub fn new(sample_period: f32, beta: f32) -> Result<Self> {
        Self::with_settings(MadgwickSettings { sample_period, beta })
    }

    /// Create a filter from settings
    pub fn with_settings(settings: MadgwickSettings) -> Result<Self> {
        if let Err(err) = settings.validate() {
            log_warn!("rejected filter settings: {}", err);
            return Err(err);
        }

        Ok(Self {
            settings,
            quaternion: UnitQuaternion::identity(),
        })
    }

    /// Restore the identity orientation
    pub fn reset(&mut self) {
        log_debug!("filter reset to identity");
        self.quaternion = UnitQuaternion::identity();
    }

    /// Filter settings
    pub fn settings(&self) -> MadgwickSettings {
        self.settings
    }

    /// Sample period in seconds
    pub fn sample_period(&self) -> f32 {
        self.settings.sample_period
    }

    /// Filter gain
    pub fn beta(&self) -> f32 {
        self.settings.beta
    }

    /// Current orientation estimate
    pub fn quaternion(&self) -> UnitQuaternion<f32> {
        self.quaternion
    }

    /// Update the filter with one MARG sample
    ///
    /// # Arguments
    /// * `gyroscope` - Angular rate in radians per second
    /// * `accelerometer` - Acceleration in any unit, must be non-zero
    /// * `magnetometer` - Magnetic field in any unit, must be non-zero
    ///
    /// # Errors
    /// Returns an error for non-finite readings or a zero-magnitude
    /// accelerometer or magnetometer reading. The orientation is left
    /// unchanged in that case.
    pub fn update(
        &mut self,
        gyroscope: Vector3<f32>,
        accelerometer: Vector3<f32>,
        magnetometer: Vector3<f32>,
    ) -> Result<()> {
        check_finite(Sensor::Gyroscope, &gyroscope)?;
        let a = unit_reading(Sensor::Accelerometer, &accelerometer)?;
        let m = unit_reading(Sensor::Magnetometer, &magnetometer)?;

        let gradient = self.marg_gradient(&a, &m);
        self.integrate(gyroscope, gradient);
        Ok(())
    }

    /// Update the filter with one gyroscope and accelerometer sample
    ///
    /// Only roll and pitch are corrected. Heading follows the integrated
    /// gyroscope and will drift with its bias.
    ///
    /// # Errors
    /// Returns an error for non-finite readings or a zero-magnitude
    /// accelerometer reading. The orientation is left unchanged in that case.
    pub fn update_imu(&mut self, gyroscope: Vector3<f32>, accelerometer: Vector3<f32>) -> Result<()> {
        check_finite(Sensor::Gyroscope, &gyroscope)?;
        let a = unit_reading(Sensor::Accelerometer, &accelerometer)?;

        let gradient = self.imu_gradient(&a);
        self.integrate(gyroscope, gradient);
        Ok(())
    }

    /// Gradient of the gravity and magnetic field objective at the current orientation
    ///
    /// `a` and `m` must be unit vectors.
    fn marg_gradient(&self, a: &Vector3<f32>, m: &Vector3<f32>) -> Vector4<f32> {
        let q = self.quaternion.as_ref();
        let (q1, q2, q3, q4) = (q.w, q.i, q.j, q.k);

        // Measured field rotated into the earth frame, h = q (0, m) q*
        let q1q1 = q1 * q1;
        let q2q2 = q2 * q2;
        let q3q3 = q3 * q3;
        let q4q4 = q4 * q4;
        let q1q2 = q1 * q2;
        let q1q3 = q1 * q3;
        let q1q4 = q1 * q4;
        let q2q3 = q2 * q3;
        let q2q4 = q2 * q4;
        let q3q4 = q3 * q4;

        let hx = m.x * (q1q1 + q2q2 - q3q3 - q4q4)
            + 2.0 * m.y * (q2q3 - q1q4)
            + 2.0 * m.z * (q2q4 + q1q3);
        let hy = 2.0 * m.x * (q2q3 + q1q4)
            + m.y * (q1q1 - q2q2 + q3q3 - q4q4)
            + 2.0 * m.z * (q3q4 - q1q2);
        let hz = 2.0 * m.x * (q2q4 - q1q3)
            + 2.0 * m.y * (q3q4 + q1q2)
            + m.z * (q1q1 - q2q2 - q3q3 + q4q4);

        // Earth field reference (bx, 0, bz): the horizontal part is assumed to point north
        let bx = Vector2::new(hx, hy).norm();
        let bz = hz;

        gravity_field_gradient(&self.quaternion, a, m, bx, bz)
    }

    /// Gradient of the gravity objective at the current orientation
    ///
    /// `a` must be a unit vector.
    fn imu_gradient(&self, a: &Vector3<f32>) -> Vector4<f32> {
        let (f1, f2, f3) = gravity_residuals(&self.quaternion, a);
        let q = self.quaternion.as_ref();
        let (_2q1, _2q2, _2q3, _2q4) = (2.0 * q.w, 2.0 * q.i, 2.0 * q.j, 2.0 * q.k);
        let (_4q2, _4q3) = (4.0 * q.i, 4.0 * q.j);

        Vector4::new(
            -_2q3 * f1 + _2q2 * f2,
            _2q4 * f1 + _2q1 * f2 - _4q2 * f3,
            -_2q1 * f1 + _2q4 * f2 - _4q3 * f3,
            _2q2 * f1 + _2q3 * f2,
        )
    }

    /// Integrate the gyroscope rate, corrected by the normalised gradient, over one sample period
    fn integrate(&mut self, gyroscope: Vector3<f32>, gradient: Vector4<f32>) {
        let q = self.quaternion.as_ref();

        // qDot = 0.5 * q * (0, w)
        let mut q_dot = q * Quaternion::from_parts(0.0, gyroscope * 0.5);

        if let Some(s) = gradient.try_normalize(MIN_GRADIENT_NORM) {
            q_dot -= Quaternion::new(s[0], s[1], s[2], s[3]) * self.settings.beta;
        }

        // First-order integration, renormalised every step
        let integrated = q + q_dot * self.settings.sample_period;
        self.quaternion = UnitQuaternion::from_quaternion(integrated);
    }
}

impl Default for Madgwick {
    fn default() -> Self {
        Self {
            settings: MadgwickSettings::default(),
            quaternion: UnitQuaternion::identity(),
        }
    }
}

fn check_finite(sensor: Sensor, reading: &Vector3<f32>) -> Result<()> {
    if reading.all_finite() {
        Ok(())
    } else {
        log_warn!("rejected {} sample: non-finite value", sensor);
        Err(MadgwickError::NonFiniteInput(sensor))
    }
}

fn unit_reading(sensor: Sensor, reading: &Vector3<f32>) -> Result<Vector3<f32>> {
    check_finite(sensor, reading)?;
    reading.try_unit(MIN_SENSOR_NORM).ok_or_else(|| {
        log_warn!("rejected {} sample: zero magnitude", sensor);
        match sensor {
            Sensor::Magnetometer => MadgwickError::DegenerateMagnetometer,
            _ => MadgwickError::DegenerateAccelerometer,
        }
    })
}

/// Difference between the gravity direction predicted by `q` and the measured one
///
/// Each component is the sensor-frame prediction of earth Z, `q* (0, 0, 0, 1) q`,
/// minus the unit accelerometer reading.
fn gravity_residuals(q: &UnitQuaternion<f32>, a: &Vector3<f32>) -> (f32, f32, f32) {
    let (q1, q2, q3, q4) = (q.w, q.i, q.j, q.k);
    (
        2.0 * (q2 * q4 - q1 * q3) - a.x,
        2.0 * (q1 * q2 + q3 * q4) - a.y,
        2.0 * (0.5 - q2 * q2 - q3 * q3) - a.z,
    )
}

/// Difference between the field direction predicted by `q` for reference `(bx, 0, bz)` and the measured one
fn field_residuals(
    q: &UnitQuaternion<f32>,
    m: &Vector3<f32>,
    bx: f32,
    bz: f32,
) -> (f32, f32, f32) {
    let (q1, q2, q3, q4) = (q.w, q.i, q.j, q.k);
    let (_2bx, _2bz) = (2.0 * bx, 2.0 * bz);
    (
        _2bx * (0.5 - q3 * q3 - q4 * q4) + _2bz * (q2 * q4 - q1 * q3) - m.x,
        _2bx * (q2 * q3 - q1 * q4) + _2bz * (q1 * q2 + q3 * q4) - m.y,
        _2bx * (q1 * q3 + q2 * q4) + _2bz * (0.5 - q2 * q2 - q3 * q3) - m.z,
    )
}

/// Gradient Jᵀf of the stacked gravity and field objective, with `(bx, bz)` held constant
fn gravity_field_gradient(
    q: &UnitQuaternion<f32>,
    a: &Vector3<f32>,
    m: &Vector3<f32>,
    bx: f32,
    bz: f32,
) -> Vector4<f32> {
    let (f1, f2, f3) = gravity_residuals(q, a);
    let (f4, f5, f6) = field_residuals(q, m, bx, bz);

    let (q1, q2, q3, q4) = (q.w, q.i, q.j, q.k);
    let (_2q1, _2q2, _2q3, _2q4) = (2.0 * q1, 2.0 * q2, 2.0 * q3, 2.0 * q4);
    let (_4q2, _4q3) = (4.0 * q2, 4.0 * q3);
    let (_2bx, _2bz) = (2.0 * bx, 2.0 * bz);
    let (_4bx, _4bz) = (4.0 * bx, 4.0 * bz);

    Vector4::new(
        -_2q3 * f1 + _2q2 * f2 - _2bz * q3 * f4
            + (-_2bx * q4 + _2bz * q2) * f5
            + _2bx * q3 * f6,
        _2q4 * f1 + _2q1 * f2 - _4q2 * f3
            + _2bz * q4 * f4
            + (_2bx * q3 + _2bz * q1) * f5
            + (_2bx * q4 - _4bz * q2) * f6,
        -_2q1 * f1 + _2q4 * f2 - _4q3 * f3
            + (-_4bx * q3 - _2bz * q1) * f4
            + (_2bx * q2 + _2bz * q4) * f5
            + (_2bx * q1 - _4bz * q3) * f6,
        _2q2 * f1 + _2q3 * f2
            + (-_4bx * q4 + _2bz * q2) * f4
            + (-_2bx * q1 + _2bz * q3) * f5
            + _2bx * q2 * f6,
    )
}
