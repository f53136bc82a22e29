//! Filter configuration for the Madgwick AHRS library

use crate::error::{MadgwickError, Result};

/// Default sensor output rate in Hz
pub const DEFAULT_SAMPLE_RATE: f32 = 256.0;

/// Default filter gain
pub const DEFAULT_BETA: f32 = 0.1;

/// Madgwick filter settings
///
/// Both values are fixed for the lifetime of a filter. The sample period must
/// match the rate at which the sensors actually produce data, since the
/// gyroscope integration step is scaled by it.
///
/// # Example
/// ```
/// use madgwick_ahrs::{Madgwick, MadgwickSettings};
///
/// let settings = MadgwickSettings {
///     beta: 0.04, // Trust the gyroscope more
///     ..Default::default()
/// };
/// let filter = Madgwick::with_settings(settings).unwrap();
/// assert_eq!(filter.beta(), 0.04);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MadgwickSettings {
    /// Time between two samples in seconds (reciprocal of the sample rate)
    pub sample_period: f32,
    /// Filter gain (typically 0.01 to 0.5)
    ///
    /// Higher values pull the estimate towards the accelerometer and
    /// magnetometer faster but let more of their noise through. Lower values
    /// give a smoother estimate that relies mostly on gyroscope integration.
    pub beta: f32,
}

impl MadgwickSettings {
    /// Build settings from a sample rate in Hz
    ///
    /// ```
    /// use madgwick_ahrs::MadgwickSettings;
    ///
    /// let settings = MadgwickSettings::from_sample_rate(100.0, 0.1);
    /// assert!((settings.sample_period - 0.01).abs() < 1e-9);
    /// ```
    pub fn from_sample_rate(sample_rate: f32, beta: f32) -> Self {
        Self {
            sample_period: 1.0 / sample_rate,
            beta,
        }
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f32 {
        1.0 / self.sample_period
    }

    /// Check that both parameters are finite and strictly positive
    pub fn validate(&self) -> Result<()> {
        if !(self.sample_period.is_finite() && self.sample_period > 0.0) {
            return Err(MadgwickError::InvalidSamplePeriod(self.sample_period));
        }
        if !(self.beta.is_finite() && self.beta > 0.0) {
            return Err(MadgwickError::InvalidBeta(self.beta));
        }
        Ok(())
    }
}

impl Default for MadgwickSettings {
    fn default() -> Self {
        Self {
            sample_period: 1.0 / DEFAULT_SAMPLE_RATE,
            beta: DEFAULT_BETA,
        }
    }
}
