//! ESP32-family HAL for the Fieldlink nodes
//!
//! This crate provides esp-hal / esp-wifi implementations of the shared
//! `fieldlink-hal` traits:
//!
//! - One-shot ADC channels sharing a single ADC1 instance
//! - Digital inputs
//! - Async UART receive
//! - ESP-NOW transmit and receive halves
//!
//! Build with exactly one chip feature (`esp32` or `esp32s3`).

#![no_std]

pub mod adc;
pub mod gpio;
pub mod radio;
pub mod uart;

pub use adc::AdcInput;
pub use gpio::DigitalInput;
pub use radio::{register_peer, EspNowRx, EspNowTx};
pub use uart::UartSource;
