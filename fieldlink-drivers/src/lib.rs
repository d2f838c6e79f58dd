//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the capability traits
//! defined in fieldlink-core, on top of the fieldlink-hal traits and the
//! embedded-hal bus traits:
//!
//! - GPS: incremental NMEA decoder (GGA + RMC), fixed-window stream drain
//! - Gas: MQ-2 concentration estimator
//! - IMU: MPU6050 over I2C
//! - Soil: capacitive moisture sensor
//! - Input: analog joystick and push button

#![no_std]
#![deny(unsafe_code)]

pub mod gas;
pub mod gps;
pub mod imu;
pub mod input;
pub mod soil;
