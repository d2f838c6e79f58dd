//! Sampler node logic
//!
//! One [`Sampler`] owns the outgoing record and the two independent
//! refresh timers. The firmware loop drains the GPS stream, reads the
//! IMU and soil sensor, then hands everything to [`Sampler::cycle`].

pub mod convert;
pub mod cycle;
pub mod interval;

pub use convert::{local_hour, map_range, soil_percent};
pub use cycle::{CycleInputs, CycleOutcome, Sampler};
pub use interval::Interval;
