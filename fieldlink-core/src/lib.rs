//! Board-agnostic core logic for the Fieldlink nodes
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Capability traits for the sensor collaborators (GPS, gas, IMU)
//! - Sampler cycle: record assembly, sentinel substitution, refresh timers
//! - Presenter input handling: joystick, button, screen selection
//! - Compile-time configuration types

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod presenter;
pub mod sampler;
pub mod traits;
