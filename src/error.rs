//! Error types for the Madgwick filter

use core::fmt;
use thiserror::Error;

/// Sensor that supplied a rejected reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sensor {
    /// Angular rate sensor
    Gyroscope,
    /// Linear acceleration sensor
    Accelerometer,
    /// Magnetic field sensor
    Magnetometer,
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sensor::Gyroscope => write!(f, "gyroscope"),
            Sensor::Accelerometer => write!(f, "accelerometer"),
            Sensor::Magnetometer => write!(f, "magnetometer"),
        }
    }
}

/// Errors reported by filter construction and updates
///
/// A failed update never modifies the filter: the orientation from the last
/// accepted sample is kept and the next sample can be supplied as usual.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MadgwickError {
    /// Sample period is zero, negative or not finite
    #[error("invalid sample period: {0} s (must be finite and positive)")]
    InvalidSamplePeriod(f32),

    /// Filter gain is zero, negative or not finite
    #[error("invalid beta: {0} (must be finite and positive)")]
    InvalidBeta(f32),

    /// Accelerometer reading has (near-)zero magnitude and cannot be normalised
    #[error("degenerate accelerometer reading: zero magnitude")]
    DegenerateAccelerometer,

    /// Magnetometer reading has (near-)zero magnitude and cannot be normalised
    #[error("degenerate magnetometer reading: zero magnitude")]
    DegenerateMagnetometer,

    /// A reading contains NaN or infinite components
    #[error("{0} reading contains NaN or infinite values")]
    NonFiniteInput(Sensor),
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, MadgwickError>;
