#![no_std]

//! Madgwick AHRS - gradient-descent orientation filter for inertial and magnetic sensors
//!
//! This crate implements Madgwick's orientation filter: it fuses one gyroscope,
//! accelerometer and magnetometer sample at a time into a unit quaternion
//! describing the orientation of the sensor relative to the earth. It is meant
//! for flight controllers, IMU boards and other targets that sample at a fixed
//! rate.
//!
//! Each update integrates the gyroscope rate and then takes one normalised
//! gradient-descent step, of size `beta`, towards the orientation in which the
//! predicted gravity and magnetic field directions match the measured ones.
//!
//! # Features
//!
//! - MARG update (gyroscope, accelerometer, magnetometer) and IMU update
//!   (gyroscope, accelerometer)
//! - Magnetic reference re-estimated every sample, so the local inclination
//!   does not need to be known
//! - Degenerate and non-finite readings are rejected without touching the state
//! - `#![no_std]` compatible for embedded systems
//! - Optional `defmt` or `log` diagnostics
//!
//! # Quick Start
//!
//! ```rust
//! use madgwick_ahrs::{Madgwick, QuaternionExt};
//! use nalgebra::Vector3;
//!
//! let mut filter = Madgwick::new(1.0 / 256.0, 0.1)?;
//!
//! // Sensor readings
//! let gyroscope = Vector3::new(0.0, 0.0, 0.1);      // rad/s
//! let accelerometer = Vector3::new(0.0, 0.0, 9.81); // any unit
//! let magnetometer = Vector3::new(22.0, 0.0, -40.0); // any unit
//!
//! filter.update(gyroscope, accelerometer, magnetometer)?;
//!
//! // Roll, pitch and yaw in degrees
//! let euler = filter.quaternion().roll_pitch_yaw_degrees();
//! # Ok::<(), madgwick_ahrs::MadgwickError>(())
//! ```

mod error;
mod logging;
mod madgwick;
mod math;
mod types;

// Re-export all public types and functions
pub use error::{MadgwickError, Result, Sensor};
pub use madgwick::{MIN_GRADIENT_NORM, MIN_SENSOR_NORM, Madgwick};
pub use math::{DEG_TO_RAD, QuaternionExt, RAD_TO_DEG, Vector3Ext};
pub use types::*;
