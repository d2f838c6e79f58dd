//! Fieldlink Hardware Abstraction Layer
//!
//! This crate defines the hardware traits shared by both Fieldlink nodes.
//! Chip-specific firmware (ESP32 presenter, ESP32-S3 sampler) implements
//! them on top of esp-hal, and the driver crate consumes them, so the
//! drivers stay host-testable.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware (sampler, presenter)          │
//! └─────────────────────────────────────────┘
//!          │ implements          │ uses
//!          ▼                     ▼
//! ┌──────────────────┐   ┌──────────────────┐
//! │ fieldlink-hal    │◄──│ fieldlink-drivers│
//! │ (this crate)     │   │                  │
//! └──────────────────┘   └──────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input (joystick button)
//! - [`adc::AnalogInput`] - One-shot ADC channel (soil, gas, joystick axes)
//! - [`uart::ByteSource`] - Serial receive stream (GPS)
//! - [`radio::RadioTx`], [`radio::RadioRx`] - Connectionless radio link

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod radio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::{AdcError, AnalogInput};
pub use gpio::InputPin;
pub use radio::{PeerAddress, RadioError, RadioRx, RadioTx, ReceivedFrame};
pub use uart::{ByteSource, UartError};
