//! Fieldlink Telemetry Record
//!
//! This crate defines the single binary contract between the sampler node
//! and the presenter node: a fixed-layout record sent verbatim as the
//! payload of one radio frame. There is no header, no checksum beyond the
//! link layer, and no versioning.
//!
//! # Wire Layout
//!
//! ```text
//! ┌──────────┬──────┬─────┬─────┬───────┬──────┬─────┬────────────┬────────────┬──────────────┬──────┐
//! │ TAG      │ TEMP │ LAT │ LON │ SPEED │ SATS │ ALT │ Y / M / D  │ H / M / S  │ LPG/CO/SMOKE │ SOIL │
//! │ 32B text │ f32  │ f32 │ f32 │ f32   │ i32  │ f32 │ 3 × i32    │ 3 × i32    │ 3 × f32      │ i32  │
//! └──────────┴──────┴─────┴─────┴───────┴──────┴─────┴────────────┴────────────┴──────────────┴──────┘
//! ```
//!
//! All numeric fields are little-endian, 4-byte aligned, with no padding,
//! so the encoding is byte-identical to the packed C struct on the ESP32
//! family. Total size is [`RECORD_SIZE`] (96 bytes).

#![no_std]
#![deny(unsafe_code)]

pub mod record;

pub use record::{RecordError, TelemetryRecord, RECORD_SIZE, RECORD_TAG, TAG_LEN};
