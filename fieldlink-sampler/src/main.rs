//! Fieldlink Sampler Firmware
//!
//! ESP32-S3 sensor node. Reads a GPS receiver, an MPU6050, an MQ-2 gas
//! sensor and a capacitive soil sensor, and sends one telemetry record per
//! second to the presenter over ESP-NOW.

#![no_std]
#![no_main]

mod config;
mod setup;
mod tasks;

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use esp_hal::analog::adc::{Adc, AdcConfig, Attenuation};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::peripherals::ADC1;
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::uart::{Config as UartConfig, Uart};
use esp_wifi::EspWifiController;
use static_cell::StaticCell;
use {esp_backtrace as _, esp_println as _};

use fieldlink_core::traits::SensorError;
use fieldlink_drivers::gas::Mq2;
use fieldlink_drivers::imu::Mpu6050;
use fieldlink_drivers::soil::SoilSensor;
use fieldlink_hal::radio::PeerAddress;
use fieldlink_hal_esp32::{AdcInput, UartSource};

use crate::config::SAMPLER;
use crate::setup::SetupError;
use crate::tasks::{sampling_task, Sensors};

/// GPS receiver line rate
const GPS_BAUD: u32 = 9600;

static ADC: StaticCell<RefCell<Adc<'static, ADC1>>> = StaticCell::new();
static WIFI: StaticCell<EspWifiController<'static>> = StaticCell::new();

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    info!("Fieldlink sampler starting...");

    let p = esp_hal::init(esp_hal::Config::default());
    esp_alloc::heap_allocator!(72 * 1024);

    let timg0 = TimerGroup::new(p.TIMG0);
    let timg1 = TimerGroup::new(p.TIMG1);
    esp_hal_embassy::init(timg1.timer0);

    info!(
        "Config: tag={}, gps={}ms, gas={}ms, send={}ms, UTC offset {}h",
        SAMPLER.tag,
        SAMPLER.gps_window_ms,
        SAMPLER.gas_refresh_ms,
        SAMPLER.send_interval_ms,
        SAMPLER.utc_offset_hours
    );

    // ESP-NOW transmit to the presenter
    let peer = PeerAddress::new(SAMPLER.peer);
    let wifi = match esp_wifi::init(timg0.timer0, Rng::new(p.RNG), p.RADIO_CLK) {
        Ok(wifi) => WIFI.init(wifi),
        Err(e) => {
            error!("Radio init failed: {:?}", e);
            park(SetupError::Radio).await
        }
    };
    let tx = match setup::radio(wifi, p.WIFI, &peer) {
        Ok(tx) => tx,
        Err(e) => park(e).await,
    };

    // MPU6050 on I2C0 (SDA=7, SCL=6)
    let imu = match I2c::new(p.I2C0, I2cConfig::default()) {
        Ok(i2c) => {
            let i2c = i2c.with_sda(p.GPIO7).with_scl(p.GPIO6).into_async();
            let mut imu = Mpu6050::new(i2c);
            match imu.init().await {
                Ok(()) => {
                    info!("MPU6050 initialized");
                    Some(imu)
                }
                Err(e) => {
                    warn!("MPU6050 not found ({:?}), temperature stays at 0", e);
                    None
                }
            }
        }
        Err(e) => {
            warn!("I2C configuration rejected: {:?}", e);
            None
        }
    };

    // GPS on UART1 (RX=4, TX=3)
    let gps = match Uart::new(p.UART1, UartConfig::default().with_baudrate(GPS_BAUD)) {
        Ok(uart) => {
            let (rx, _tx) = uart
                .with_rx(p.GPIO4)
                .with_tx(p.GPIO3)
                .into_async()
                .split();
            info!("GPS UART at {} baud", GPS_BAUD);
            Some(UartSource::new(rx))
        }
        Err(e) => {
            warn!("GPS UART configuration rejected ({:?}), sending without a fix", e);
            None
        }
    };

    // Soil sensor (GPIO5) and MQ-2 (GPIO1) on ADC1
    let mut adc_config = AdcConfig::new();
    let soil_pin = adc_config.enable_pin(p.GPIO5, Attenuation::_11dB);
    let gas_pin = adc_config.enable_pin(p.GPIO1, Attenuation::_11dB);
    let adc = &*ADC.init(RefCell::new(Adc::new(p.ADC1, adc_config)));
    let soil = SoilSensor::new(AdcInput::new(adc, soil_pin));
    let mut gas = Mq2::new(AdcInput::new(adc, gas_pin));

    info!("Calibrating MQ-2 in clean air...");
    match gas.calibrate(SAMPLER.gas_calibration_samples) {
        Ok(r0) => info!("MQ-2 calibrated: R0 = {} kOhm", r0),
        Err(SensorError::OutOfRange) => warn!("MQ-2 reading out of range, gas values stay at 0"),
        Err(e) => warn!("MQ-2 calibration failed: {:?}", e),
    }

    let sensors = Sensors {
        gps,
        imu,
        soil,
        gas,
    };
    if let Err(e) = spawner.spawn(sampling_task(sensors, tx)) {
        error!("Failed to spawn sampling task: {:?}", e);
    }

    info!("All tasks spawned");
}

/// Keep the node alive for logging after a setup failure
async fn park(reason: SetupError) -> ! {
    error!("Setup aborted: {:?}", reason);
    loop {
        Timer::after_secs(5).await;
        warn!("Setup failed ({:?}); sampler idle", reason);
    }
}
