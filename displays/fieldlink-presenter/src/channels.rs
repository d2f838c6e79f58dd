//! Inter-task communication
//!
//! The receive task publishes each decoded record; the render loop takes
//! whatever is newest once per frame. Intermediate records are dropped.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU32;

use fieldlink_protocol::TelemetryRecord;

/// Most recent record from the sampler
pub static LATEST_RECORD: Signal<CriticalSectionRawMutex, TelemetryRecord> = Signal::new();

/// Frames decoded and published
pub static FRAMES_RECEIVED: AtomicU32 = AtomicU32::new(0);

/// Frames dropped for having the wrong length
pub static FRAMES_REJECTED: AtomicU32 = AtomicU32::new(0);
