//! Sampling loop
//!
//! Each cycle drains the GPS stream for a fixed window, reads the IMU and
//! the soil sensor, then lets the [`Sampler`] decide whether the gas
//! estimates are refreshed and whether a record goes out.

use defmt::*;
use embassy_time::{Duration, Instant, Timer};
use esp_hal::gpio::GpioPin;
use esp_hal::i2c::master::I2c;
use esp_hal::Async;

use fieldlink_core::sampler::{CycleInputs, Sampler};
use fieldlink_core::traits::{FixDecoder, MotionSensor};
use fieldlink_drivers::gas::Mq2;
use fieldlink_drivers::gps::{drain, NmeaDecoder};
use fieldlink_drivers::imu::Mpu6050;
use fieldlink_drivers::soil::SoilSensor;
use fieldlink_hal::radio::{PeerAddress, RadioTx};
use fieldlink_hal_esp32::{AdcInput, EspNowTx, UartSource};

use crate::config::SAMPLER;

/// Everything the loop reads from
pub struct Sensors {
    /// `None` when the GPS UART could not be configured
    pub gps: Option<UartSource<'static>>,
    /// `None` when the IMU did not answer at setup
    pub imu: Option<Mpu6050<I2c<'static, Async>>>,
    /// Soil sensor on GPIO5
    pub soil: SoilSensor<AdcInput<'static, GpioPin<5>>>,
    /// MQ-2 on GPIO1
    pub gas: Mq2<AdcInput<'static, GpioPin<1>>>,
}

#[embassy_executor::task]
pub async fn sampling_task(mut sensors: Sensors, mut tx: EspNowTx<'static>) {
    info!("Sampling task started");

    let peer = PeerAddress::new(SAMPLER.peer);
    let window = Duration::from_millis(SAMPLER.gps_window_ms as u64);
    let mut sampler = Sampler::new(SAMPLER);
    let mut decoder = NmeaDecoder::new();

    loop {
        let report = drain(&mut sensors.gps, &mut decoder, Timer::after(window)).await;
        let fix = decoder.fix();
        trace!(
            "GPS: {} bytes, {} read errors, location {}, {} sentences",
            report.bytes,
            report.errors,
            fix.has_location(),
            decoder.stats().parsed
        );

        let temperature_c = match sensors.imu.as_mut() {
            Some(imu) => match imu.read().await {
                Ok(sample) => Some(sample.temperature_c),
                Err(e) => {
                    warn!("IMU read failed: {:?}", e);
                    None
                }
            },
            None => None,
        };

        let soil_raw = match sensors.soil.read_raw() {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!("Soil read failed: {:?}", e);
                None
            }
        };

        let inputs = CycleInputs {
            fix,
            temperature_c,
            soil_raw,
        };
        let now = Instant::now().as_millis();
        let outcome = sampler.cycle(now, &inputs, &mut sensors.gas);

        if outcome.gas_refreshed {
            let record = sampler.record();
            debug!(
                "Gas: LPG {} CO {} Smoke {} ppm",
                record.lpg, record.co, record.smoke
            );
            if outcome.gas_failures > 0 {
                warn!("{} gas reads failed, keeping previous values", outcome.gas_failures);
            }
        }

        if let Some(frame) = outcome.frame {
            match tx.send(&peer, &frame).await {
                Ok(()) => info!("Sent with success"),
                Err(e) => warn!("Send failed: {:?}", e),
            }
        }
    }
}
