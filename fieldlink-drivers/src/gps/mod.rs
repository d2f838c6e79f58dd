//! GPS receivers

pub mod drain;
pub mod nmea;

pub use self::drain::{drain, DrainReport};
pub use self::nmea::NmeaDecoder;
