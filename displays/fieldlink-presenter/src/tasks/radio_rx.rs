//! ESP-NOW receive task
//!
//! Accepts frames of exactly one record, dumps the fields to the log and
//! hands the record to the render loop.

use defmt::*;
use portable_atomic::Ordering;

use fieldlink_hal::radio::{RadioRx, MAX_FRAME_PAYLOAD};
use fieldlink_hal_esp32::EspNowRx;
use fieldlink_protocol::{RecordError, TelemetryRecord, RECORD_SIZE};

use crate::channels::{FRAMES_RECEIVED, FRAMES_REJECTED, LATEST_RECORD};

#[embassy_executor::task]
pub async fn radio_rx_task(mut rx: EspNowRx<'static>) {
    info!("Radio RX task started");

    let mut buf = [0u8; MAX_FRAME_PAYLOAD];

    loop {
        let frame = match rx.receive(&mut buf).await {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Receive error: {:?}", e);
                continue;
            }
        };

        match TelemetryRecord::decode(&buf[..frame.len]) {
            Ok(record) => {
                let count = FRAMES_RECEIVED.fetch_add(1, Ordering::Relaxed) + 1;
                debug!("Frame #{} from {}", count, frame.source);
                log_record(frame.len, &record);
                LATEST_RECORD.signal(record);
            }
            Err(RecordError::Length { expected, actual }) => {
                FRAMES_REJECTED.fetch_add(1, Ordering::Relaxed);
                warn!(
                    "Dropped frame from {}: {} bytes, expected {}",
                    frame.source, actual, expected
                );
            }
            Err(e) => {
                FRAMES_REJECTED.fetch_add(1, Ordering::Relaxed);
                warn!("Dropped frame: {:?}", e);
            }
        }
    }
}

fn log_record(len: usize, r: &TelemetryRecord) {
    info!("Bytes received: {}", len);
    info!("Char: {=str}", r.tag());
    info!("Temp: {} C", r.temperature);
    info!("Lat: {}", r.latitude);
    info!("Lon: {}", r.longitude);
    info!("Speed: {} km/h", r.speed);
    info!("Satellites: {}", r.satellites);
    info!("Height: {} m", r.altitude);
    info!("Date: {}/{}/{}", r.day, r.month, r.year);
    info!("Time: {}:{}:{}", r.hour, r.minute, r.second);
    info!("LPG: {} ppm", r.lpg);
    info!("CO: {} ppm", r.co);
    info!("Smoke: {} ppm", r.smoke);
    info!("Humidity Soil: {}%", r.soil_humidity);
    info!("Struct size: {}", RECORD_SIZE);
}
