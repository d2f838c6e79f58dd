//! Inertial sensor trait

use super::SensorError;

/// One IMU sample
///
/// Only `temperature_c` is transmitted; the motion axes are kept so
/// drivers can report everything a read returns.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSample {
    /// Acceleration in m/s² (x, y, z)
    pub accel: [f32; 3],
    /// Angular rate in rad/s (x, y, z)
    pub gyro: [f32; 3],
    /// Die temperature in °C
    pub temperature_c: f32,
}

/// Trait for inertial measurement units
///
/// Takes `&mut self` because a read is a bus transaction.
pub trait MotionSensor {
    /// Read one accelerometer/gyro/temperature sample
    fn read(&mut self) -> impl core::future::Future<Output = Result<MotionSample, SensorError>>;
}
