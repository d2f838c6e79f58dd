//! Telemetry record encoding and decoding
//!
//! Field order and widths are fixed:
//! - TAG (32 bytes): marker text, NUL-padded
//! - TEMPERATURE (f32): IMU die temperature, °C
//! - LATITUDE, LONGITUDE (f32): degrees, 0.0 without a fix
//! - SPEED (f32): km/h, 0.0 without a fix
//! - SATELLITES (i32): -1 without a fix
//! - ALTITUDE (f32): meters, -1.0 without a fix
//! - YEAR, MONTH, DAY (i32): GPS date, unvalidated
//! - HOUR, MINUTE, SECOND (i32): local time
//! - LPG, CO, SMOKE (f32): ppm
//! - SOIL (i32): soil humidity percent, unclamped

/// Length of the tag field in bytes
pub const TAG_LEN: usize = 32;

/// Tag written by the sampler on every record
pub const RECORD_TAG: &str = "RTF TOP";

/// Number of 4-byte numeric fields following the tag
const FIELD_COUNT: usize = 16;

/// Size of an encoded record in bytes
pub const RECORD_SIZE: usize = TAG_LEN + FIELD_COUNT * 4;

/// Errors from record encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Frame length does not match [`RECORD_SIZE`]
    Length { expected: usize, actual: usize },
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// One telemetry sample as exchanged over the radio link
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryRecord {
    /// Marker text, NUL-padded
    pub tag: [u8; TAG_LEN],
    /// Temperature in °C
    pub temperature: f32,
    /// Latitude in degrees
    pub latitude: f32,
    /// Longitude in degrees
    pub longitude: f32,
    /// Ground speed in km/h
    pub speed: f32,
    /// Satellites in view, -1 if unknown
    pub satellites: i32,
    /// Altitude in meters, -1.0 if unknown
    pub altitude: f32,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    /// Local hour (UTC + offset, wrapped)
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    /// Liquefied petroleum gas, ppm
    pub lpg: f32,
    /// Carbon monoxide, ppm
    pub co: f32,
    /// Smoke, ppm
    pub smoke: f32,
    /// Soil humidity in percent (may leave 0..=100)
    pub soil_humidity: i32,
}

impl Default for TelemetryRecord {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl TelemetryRecord {
    /// All-zero record, as held by the presenter before the first frame
    pub const EMPTY: Self = Self {
        tag: [0; TAG_LEN],
        temperature: 0.0,
        latitude: 0.0,
        longitude: 0.0,
        speed: 0.0,
        satellites: 0,
        altitude: 0.0,
        year: 0,
        month: 0,
        day: 0,
        hour: 0,
        minute: 0,
        second: 0,
        lpg: 0.0,
        co: 0.0,
        smoke: 0.0,
        soil_humidity: 0,
    };

    /// Create an empty record carrying `tag`
    pub fn with_tag(tag: &str) -> Self {
        let mut record = Self::EMPTY;
        record.set_tag(tag);
        record
    }

    /// Replace the tag
    ///
    /// Text longer than 31 bytes is cut so the field always keeps a
    /// terminating NUL.
    pub fn set_tag(&mut self, tag: &str) {
        self.tag = [0; TAG_LEN];
        let bytes = tag.as_bytes();
        let len = bytes.len().min(TAG_LEN - 1);
        self.tag[..len].copy_from_slice(&bytes[..len]);
    }

    /// Tag text up to the first NUL
    ///
    /// Returns an empty string if the bytes are not valid UTF-8.
    pub fn tag(&self) -> &str {
        let end = self.tag.iter().position(|&b| b == 0).unwrap_or(TAG_LEN);
        core::str::from_utf8(&self.tag[..end]).unwrap_or("")
    }

    /// Numeric fields as raw 32-bit words, in wire order
    fn words(&self) -> [u32; FIELD_COUNT] {
        [
            self.temperature.to_bits(),
            self.latitude.to_bits(),
            self.longitude.to_bits(),
            self.speed.to_bits(),
            self.satellites as u32,
            self.altitude.to_bits(),
            self.year as u32,
            self.month as u32,
            self.day as u32,
            self.hour as u32,
            self.minute as u32,
            self.second as u32,
            self.lpg.to_bits(),
            self.co.to_bits(),
            self.smoke.to_bits(),
            self.soil_humidity as u32,
        ]
    }

    fn from_words(tag: [u8; TAG_LEN], w: [u32; FIELD_COUNT]) -> Self {
        Self {
            tag,
            temperature: f32::from_bits(w[0]),
            latitude: f32::from_bits(w[1]),
            longitude: f32::from_bits(w[2]),
            speed: f32::from_bits(w[3]),
            satellites: w[4] as i32,
            altitude: f32::from_bits(w[5]),
            year: w[6] as i32,
            month: w[7] as i32,
            day: w[8] as i32,
            hour: w[9] as i32,
            minute: w[10] as i32,
            second: w[11] as i32,
            lpg: f32::from_bits(w[12]),
            co: f32::from_bits(w[13]),
            smoke: f32::from_bits(w[14]),
            soil_humidity: w[15] as i32,
        }
    }

    /// Encode this record into a byte buffer
    ///
    /// Returns the number of bytes written (always [`RECORD_SIZE`]).
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, RecordError> {
        if buffer.len() < RECORD_SIZE {
            return Err(RecordError::BufferTooSmall);
        }

        buffer[..TAG_LEN].copy_from_slice(&self.tag);
        for (i, word) in self.words().iter().enumerate() {
            let start = TAG_LEN + i * 4;
            buffer[start..start + 4].copy_from_slice(&word.to_le_bytes());
        }

        Ok(RECORD_SIZE)
    }

    /// Encode this record into a fixed-size array
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        // Cannot fail: the array is exactly RECORD_SIZE
        let _ = self.encode(&mut bytes);
        bytes
    }

    /// Decode a record from a received frame
    ///
    /// Any frame of exactly [`RECORD_SIZE`] bytes is accepted; field values
    /// are not checked.
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        if bytes.len() != RECORD_SIZE {
            return Err(RecordError::Length {
                expected: RECORD_SIZE,
                actual: bytes.len(),
            });
        }

        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&bytes[..TAG_LEN]);

        let mut words = [0u32; FIELD_COUNT];
        for (i, chunk) in bytes[TAG_LEN..].chunks_exact(4).enumerate() {
            words[i] = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        Ok(Self::from_words(tag, words))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TelemetryRecord {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Record[{=str} t={} pos=({},{}) sats={} {}-{}-{} {}:{}:{}]",
            self.tag(),
            self.temperature,
            self.latitude,
            self.longitude,
            self.satellites,
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> TelemetryRecord {
        TelemetryRecord {
            temperature: 24.5,
            latitude: 50.45,
            longitude: 30.52,
            speed: 3.7,
            satellites: 7,
            altitude: 180.0,
            year: 2024,
            month: 6,
            day: 1,
            hour: 15,
            minute: 0,
            second: 0,
            lpg: 1.25,
            co: 2.5,
            smoke: 3.75,
            soil_humidity: 42,
            ..TelemetryRecord::with_tag(RECORD_TAG)
        }
    }

    #[test]
    fn test_record_size() {
        assert_eq!(RECORD_SIZE, 96);
        assert_eq!(sample().to_bytes().len(), 96);
    }

    #[test]
    fn test_tag_is_nul_padded() {
        let bytes = sample().to_bytes();
        assert_eq!(&bytes[..7], b"RTF TOP");
        assert!(bytes[7..TAG_LEN].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_field_offsets() {
        let bytes = sample().to_bytes();
        // temperature directly after the tag
        assert_eq!(&bytes[32..36], &24.5f32.to_le_bytes());
        // satellites is the fifth word
        assert_eq!(&bytes[48..52], &7i32.to_le_bytes());
        // year at word 6
        assert_eq!(&bytes[56..60], &2024i32.to_le_bytes());
        // soil humidity is the last word
        assert_eq!(&bytes[92..96], &42i32.to_le_bytes());
    }

    #[test]
    fn test_negative_sentinels_survive() {
        let mut record = sample();
        record.satellites = -1;
        record.altitude = -1.0;
        record.soil_humidity = -12;
        let decoded = TelemetryRecord::decode(&record.to_bytes()).unwrap();
        assert_eq!(decoded.satellites, -1);
        assert_eq!(decoded.altitude, -1.0);
        assert_eq!(decoded.soil_humidity, -12);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let bytes = sample().to_bytes();
        assert_eq!(
            TelemetryRecord::decode(&bytes[..95]),
            Err(RecordError::Length {
                expected: 96,
                actual: 95
            })
        );
    }

    #[test]
    fn test_decode_accepts_arbitrary_bytes() {
        // No sanity checking on the receive side
        let bytes = [0xFFu8; RECORD_SIZE];
        let record = TelemetryRecord::decode(&bytes).unwrap();
        assert_eq!(record.satellites, -1);
        assert!(record.temperature.is_nan());
        assert_eq!(record.tag(), "");
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buf = [0u8; 10];
        assert_eq!(sample().encode(&mut buf), Err(RecordError::BufferTooSmall));
    }

    #[test]
    fn test_long_tag_keeps_terminator() {
        let record = TelemetryRecord::with_tag("0123456789012345678901234567890123456789");
        assert_eq!(record.tag().len(), TAG_LEN - 1);
        assert_eq!(record.tag[TAG_LEN - 1], 0);
    }

    #[test]
    fn test_empty_record() {
        let record = TelemetryRecord::default();
        assert_eq!(record.tag(), "");
        assert_eq!(record.to_bytes(), [0u8; RECORD_SIZE]);
    }

    proptest! {
        #[test]
        fn prop_layout_preserves_every_bit(words in prop::array::uniform16(any::<u32>())) {
            let record = TelemetryRecord::from_words([0x41; TAG_LEN], words);
            let decoded = TelemetryRecord::decode(&record.to_bytes()).unwrap();
            prop_assert_eq!(decoded.words(), words);
            prop_assert_eq!(decoded.tag, [0x41; TAG_LEN]);
        }
    }
}
