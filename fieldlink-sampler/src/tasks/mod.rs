//! Embassy async tasks

pub mod sampling;

pub use sampling::{sampling_task, Sensors};
