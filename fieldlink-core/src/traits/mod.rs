//! Sensor capability traits
//!
//! These traits define the interface between the sampling logic and the
//! drivers that talk to real sensors, so the sampler can be exercised with
//! synthetic inputs.

pub mod gas;
pub mod gps;
pub mod motion;

pub use gas::{Gas, GasReader};
pub use gps::{FixDate, FixDecoder, FixTime, GpsFix, Location};
pub use motion::{MotionSample, MotionSensor};

/// Errors reported by sensor drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Device did not answer on its bus
    NotResponding,
    /// Device answered with an unexpected identity
    WrongDevice,
    /// Bus transfer failed
    Bus,
    /// ADC conversion error
    ConversionError,
    /// Reading out of the range the driver can interpret
    OutOfRange,
    /// Driver used before its calibration step
    NotCalibrated,
}
