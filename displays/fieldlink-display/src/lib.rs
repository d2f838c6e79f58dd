//! Display abstraction and page renderer for the Fieldlink presenter
//!
//! This crate provides:
//! - `DisplayBackend` trait for the physical panel
//! - `Screen`, an off-screen character buffer with per-line colour
//! - Page layouts for the three telemetry screens
//!
//! # Architecture
//!
//! The render loop draws into a `Screen` and pushes it to the backend once
//! per frame, so the panel only ever shows complete frames:
//!
//! ```text
//! TelemetryRecord ──► pages::draw_* ──► Screen ──► DisplayBackend ──► panel
//! ```
//!
//! The header band is only redrawn when the selected page changes; the
//! data rows below it are rebuilt every frame.

#![no_std]

pub mod backend;
pub mod pages;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError, Tone};
pub use pages::PageRenderer;
pub use screen::{Align, Screen, SCREEN_COLS, SCREEN_ROWS};
