//! Incremental NMEA 0183 decoder
//!
//! Collects bytes from the receiver into a sentence buffer and hands each
//! complete line to the `nmea` crate. Only GGA and RMC are used:
//!
//! | Sentence | Fields taken                                   |
//! |----------|------------------------------------------------|
//! | GGA      | position, satellites, altitude, time           |
//! | RMC      | position, speed over ground, date, time        |
//!
//! A sentence that reports no fix invalidates the position and the
//! quantities derived from it. Date and time are copied whenever present.

use chrono::{Datelike, Timelike};
use fieldlink_core::traits::{FixDate, FixDecoder, FixTime, GpsFix, Location};
use heapless::Vec;
use ::nmea::sentences::rmc::RmcStatusOfFix;
use ::nmea::sentences::{GgaData, RmcData};
use ::nmea::ParseResult;

/// Longest sentence kept in the buffer
///
/// NMEA limits sentences to 82 characters; the margin covers vendor
/// extensions. Longer lines are dropped.
pub const MAX_SENTENCE_LEN: usize = 120;

/// Knots to km/h
const KNOTS_TO_KMPH: f32 = 1.852;

/// Decoder statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NmeaStats {
    /// GGA or RMC sentences merged into the fix
    pub parsed: u32,
    /// Lines rejected by the parser (bad checksum, unsupported type)
    pub rejected: u32,
    /// Lines dropped because they did not fit the buffer
    pub overflowed: u32,
}

/// Streaming NMEA decoder producing a [`GpsFix`]
pub struct NmeaDecoder {
    line: Vec<u8, MAX_SENTENCE_LEN>,
    /// Inside a sentence (after `$`, before end of line)
    in_sentence: bool,
    /// Current line overflowed and is being skipped
    overflow: bool,
    fix: GpsFix,
    stats: NmeaStats,
}

impl Default for NmeaDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl NmeaDecoder {
    /// Create a decoder with no fix
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            in_sentence: false,
            overflow: false,
            fix: GpsFix {
                location: None,
                speed_kmph: None,
                satellites: None,
                altitude_m: None,
                date: FixDate {
                    year: 0,
                    month: 0,
                    day: 0,
                },
                time: FixTime {
                    hour: 0,
                    minute: 0,
                    second: 0,
                },
            },
            stats: NmeaStats {
                parsed: 0,
                rejected: 0,
                overflowed: 0,
            },
        }
    }

    /// Decoder statistics since creation
    pub fn stats(&self) -> NmeaStats {
        self.stats
    }

    fn finish_line(&mut self) {
        if self.overflow {
            self.stats.overflowed += 1;
        } else if !self.line.is_empty() {
            match ::nmea::parse_bytes(&self.line) {
                Ok(ParseResult::GGA(gga)) => {
                    self.merge_gga(&gga);
                    self.stats.parsed += 1;
                }
                Ok(ParseResult::RMC(rmc)) => {
                    self.merge_rmc(&rmc);
                    self.stats.parsed += 1;
                }
                Ok(_) => {}
                Err(_) => {
                    self.stats.rejected += 1;
                }
            }
        }
        self.reset_line();
    }

    fn reset_line(&mut self) {
        self.line.clear();
        self.in_sentence = false;
        self.overflow = false;
    }

    fn merge_gga(&mut self, gga: &GgaData) {
        let valid = gga.fix_type.is_some_and(|t| t.is_valid());
        if valid {
            if let Some(location) = location(gga.latitude, gga.longitude) {
                self.fix.location = Some(location);
            }
            if gga.altitude.is_some() {
                self.fix.altitude_m = gga.altitude;
            }
        } else {
            self.fix.location = None;
            self.fix.altitude_m = None;
        }

        if gga.fix_satellites.is_some() {
            self.fix.satellites = gga.fix_satellites;
        }
        if let Some(time) = gga.fix_time {
            self.fix.time = fix_time(&time);
        }
    }

    fn merge_rmc(&mut self, rmc: &RmcData) {
        if matches!(rmc.status_of_fix, RmcStatusOfFix::Invalid) {
            self.fix.location = None;
            self.fix.speed_kmph = None;
        } else {
            if let Some(location) = location(rmc.lat, rmc.lon) {
                self.fix.location = Some(location);
            }
            if let Some(knots) = rmc.speed_over_ground {
                self.fix.speed_kmph = Some(knots * KNOTS_TO_KMPH);
            }
        }

        if let Some(date) = rmc.fix_date {
            self.fix.date = FixDate {
                year: u16::try_from(date.year()).unwrap_or(0),
                month: date.month() as u8,
                day: date.day() as u8,
            };
        }
        if let Some(time) = rmc.fix_time {
            self.fix.time = fix_time(&time);
        }
    }
}

fn location(lat: Option<f64>, lon: Option<f64>) -> Option<Location> {
    Some(Location { lat: lat?, lon: lon? })
}

fn fix_time(time: &chrono::NaiveTime) -> FixTime {
    FixTime {
        hour: time.hour() as u8,
        minute: time.minute() as u8,
        second: time.second() as u8,
    }
}

impl FixDecoder for NmeaDecoder {
    fn feed(&mut self, byte: u8) {
        match byte {
            b'$' => {
                // A new start marker always restarts, even mid-sentence
                self.reset_line();
                self.in_sentence = true;
                let _ = self.line.push(byte);
            }
            b'\r' | b'\n' => {
                if self.in_sentence {
                    self.finish_line();
                }
            }
            _ if !self.in_sentence || self.overflow => {}
            _ => {
                if self.line.push(byte).is_err() {
                    self.overflow = true;
                }
            }
        }
    }

    fn fix(&self) -> GpsFix {
        self.fix
    }
}
