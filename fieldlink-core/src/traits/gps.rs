//! GPS fix decoder trait

/// A position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// Calendar date as reported by the receiver (UTC)
///
/// Not validated: all zeros until the first sentence carrying a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// Time of day as reported by the receiver (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Latest decoded GPS solution
///
/// Each optional field is `None` until the decoder has seen a sentence
/// that makes it valid, and goes back to `None` when the receiver reports
/// the solution as lost.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpsFix {
    /// Position
    pub location: Option<Location>,
    /// Ground speed in km/h
    pub speed_kmph: Option<f32>,
    /// Satellites used in the solution
    pub satellites: Option<u32>,
    /// Altitude above mean sea level in meters
    pub altitude_m: Option<f32>,
    /// Date (unvalidated)
    pub date: FixDate,
    /// Time of day (unvalidated)
    pub time: FixTime,
}

impl GpsFix {
    /// Check if a position is available
    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }
}

/// Trait for incremental NMEA decoders
///
/// Bytes are fed one at a time as they arrive from the receiver; partial
/// sentences are buffered internally and [`FixDecoder::fix`] always
/// returns the fields of the last complete sentences.
pub trait FixDecoder {
    /// Feed one byte from the GPS stream
    fn feed(&mut self, byte: u8);

    /// Latest decoded solution
    fn fix(&self) -> GpsFix;

    /// Feed multiple bytes
    fn feed_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.feed(byte);
        }
    }
}
