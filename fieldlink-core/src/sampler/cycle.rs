//! Sampler record assembly and refresh timing

use fieldlink_protocol::{TelemetryRecord, RECORD_SIZE};

use super::convert::{local_hour, soil_percent};
use super::interval::Interval;
use crate::config::SamplerConfig;
use crate::traits::{Gas, GasReader, GpsFix};

/// Sentinel for latitude, longitude and speed without a fix
const INVALID_COORD: f32 = 0.0;
/// Sentinel for the satellite count without a fix
const INVALID_SATELLITES: i32 = -1;
/// Sentinel for altitude without a fix
const INVALID_ALTITUDE: f32 = -1.0;

/// Readings gathered during one sampler cycle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CycleInputs {
    /// GPS solution after the drain window
    pub fix: GpsFix,
    /// IMU die temperature, `None` if the read failed
    pub temperature_c: Option<f32>,
    /// Raw soil sensor reading, `None` if the conversion failed
    pub soil_raw: Option<u16>,
}

/// What one cycle did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleOutcome {
    /// Gas estimates were refreshed this cycle
    pub gas_refreshed: bool,
    /// Gas reads that failed during a refresh (previous value kept)
    pub gas_failures: u8,
    /// Encoded record to transmit, if the send timer fired
    pub frame: Option<[u8; RECORD_SIZE]>,
}

/// Sampler state owned by the sampling loop
///
/// The record is overwritten in place each cycle; nothing older is kept.
pub struct Sampler {
    config: SamplerConfig,
    record: TelemetryRecord,
    gas_timer: Interval,
    send_timer: Interval,
}

impl Sampler {
    /// Create a sampler with an empty record
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            record: TelemetryRecord::with_tag(config.tag),
            gas_timer: Interval::new(config.gas_refresh_ms),
            send_timer: Interval::new(config.send_interval_ms),
            config,
        }
    }

    /// Current record contents
    pub fn record(&self) -> &TelemetryRecord {
        &self.record
    }

    /// Populate the record from the readings of this cycle
    ///
    /// Fix fields that are not valid are replaced by their sentinels. A
    /// failed IMU or soil read keeps the previous value.
    pub fn update(&mut self, inputs: &CycleInputs) {
        let record = &mut self.record;
        record.set_tag(self.config.tag);

        if let Some(t) = inputs.temperature_c {
            record.temperature = t;
        }

        if let Some(raw) = inputs.soil_raw {
            record.soil_humidity = soil_percent(raw, &self.config.soil);
        }

        let fix = &inputs.fix;
        match fix.location {
            Some(location) => {
                record.latitude = location.lat as f32;
                record.longitude = location.lon as f32;
            }
            None => {
                record.latitude = INVALID_COORD;
                record.longitude = INVALID_COORD;
            }
        }
        record.speed = fix.speed_kmph.unwrap_or(INVALID_COORD);
        record.satellites = fix
            .satellites
            .map_or(INVALID_SATELLITES, |n| n.min(i32::MAX as u32) as i32);
        record.altitude = fix.altitude_m.unwrap_or(INVALID_ALTITUDE);

        record.year = fix.date.year as i32;
        record.month = fix.date.month as i32;
        record.day = fix.date.day as i32;

        record.hour = local_hour(fix.time.hour, self.config.utc_offset_hours);
        record.minute = fix.time.minute as i32;
        record.second = fix.time.second as i32;
    }

    /// Refresh the gas estimates if the gas timer fired
    ///
    /// Returns `None` when not due, otherwise the number of failed reads.
    pub fn poll_gas<G: GasReader>(&mut self, now_ms: u64, gas: &mut G) -> Option<u8> {
        if !self.gas_timer.poll(now_ms) {
            return None;
        }

        let mut failures = 0;
        for kind in Gas::ALL {
            match gas.read_ppm(kind) {
                Ok(ppm) => self.store_gas(kind, ppm),
                Err(_) => failures += 1,
            }
        }
        Some(failures)
    }

    fn store_gas(&mut self, gas: Gas, ppm: f32) {
        match gas {
            Gas::Lpg => self.record.lpg = ppm,
            Gas::Co => self.record.co = ppm,
            Gas::Smoke => self.record.smoke = ppm,
        }
    }

    /// Encode the record if the send timer fired
    pub fn poll_send(&mut self, now_ms: u64) -> Option<[u8; RECORD_SIZE]> {
        if self.send_timer.poll(now_ms) {
            Some(self.record.to_bytes())
        } else {
            None
        }
    }

    /// Run one full cycle after the GPS drain
    ///
    /// Order matches the sampling loop: populate, refresh gas if due,
    /// then encode for transmission if due.
    pub fn cycle<G: GasReader>(
        &mut self,
        now_ms: u64,
        inputs: &CycleInputs,
        gas: &mut G,
    ) -> CycleOutcome {
        self.update(inputs);
        let gas_result = self.poll_gas(now_ms, gas);
        let frame = self.poll_send(now_ms);

        CycleOutcome {
            gas_refreshed: gas_result.is_some(),
            gas_failures: gas_result.unwrap_or(0),
            frame,
        }
    }
}
