//! Fieldlink Presenter Firmware
//!
//! ESP32 with a 1.8" ST7735 TFT and an analog joystick. Receives telemetry
//! records over ESP-NOW and renders one of three pages.

#![no_std]
#![no_main]

mod channels;
mod config;
mod st7735;
mod tasks;

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::analog::adc::{Adc, AdcConfig, Attenuation};
use esp_hal::delay::Delay;
use esp_hal::gpio::{Input, Level, Output, Pull};
use esp_hal::peripherals::ADC1;
use esp_hal::rng::Rng;
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::spi::Mode;
use esp_hal::time::RateExtU32;
use esp_hal::timer::timg::TimerGroup;
use esp_wifi::esp_now::EspNow;
use esp_wifi::EspWifiController;
use portable_atomic::Ordering;
use static_cell::{ConstStaticCell, StaticCell};
use {esp_backtrace as _, esp_println as _};

use fieldlink_display::PageRenderer;
use fieldlink_drivers::input::{ButtonPin, InputPanel, JoystickAxes};
use fieldlink_hal_esp32::{AdcInput, DigitalInput, EspNowRx};

use crate::channels::{FRAMES_RECEIVED, FRAMES_REJECTED};
use crate::st7735::{FrameBuffer, St7735};
use crate::tasks::{radio_rx_task, render_task, Display};

/// Interval between link statistics in the log
const STATS_INTERVAL_SECS: u64 = 10;

static FRAME: ConstStaticCell<FrameBuffer> = ConstStaticCell::new(FrameBuffer::new());
static ADC: StaticCell<RefCell<Adc<'static, ADC1>>> = StaticCell::new();
static WIFI: StaticCell<EspWifiController<'static>> = StaticCell::new();

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    info!("Fieldlink presenter starting...");

    let p = esp_hal::init(esp_hal::Config::default());
    esp_alloc::heap_allocator!(72 * 1024);

    let timg0 = TimerGroup::new(p.TIMG0);
    let timg1 = TimerGroup::new(p.TIMG1);
    esp_hal_embassy::init(timg1.timer0);

    info!(
        "Config: frame={}ms, joystick {}..{} / {}..{}, gate={}ms, debounce={}ms",
        config::PRESENTER.frame_ms,
        config::PRESENTER.joystick.left,
        config::PRESENTER.joystick.right,
        config::PRESENTER.joystick.up,
        config::PRESENTER.joystick.down,
        config::PRESENTER.joystick_gate_ms,
        config::PRESENTER.button_debounce_ms
    );

    // TFT on SPI2 (SCK=18, MOSI=23, CS=5, DC=21)
    let spi = match Spi::new(
        p.SPI2,
        SpiConfig::default()
            .with_frequency(26.MHz())
            .with_mode(Mode::_0),
    ) {
        Ok(spi) => spi.with_sck(p.GPIO18).with_mosi(p.GPIO23),
        Err(e) => {
            error!("SPI configuration rejected: {:?}", e);
            park("no display").await
        }
    };
    let cs = Output::new(p.GPIO5, Level::High);
    let dc = Output::new(p.GPIO21, Level::Low);
    let Ok(spi_dev) = ExclusiveDevice::new_no_delay(spi, cs) else {
        error!("Failed to claim panel chip select");
        park("no display").await
    };

    let mut display: Display = St7735::new(spi_dev, dc, FRAME.take());
    let mut renderer = PageRenderer::new();
    match display.init(&mut Delay::new()) {
        Ok(()) => {
            info!("TFT initialized");
            renderer.splash();
            if let Err(e) = renderer.push(&mut display) {
                warn!("Splash failed: {:?}", e);
            }
        }
        Err(e) => warn!("TFT init failed: {:?}", e),
    }

    // Joystick on ADC1 (X=GPIO39, Y=GPIO36), button on GPIO4
    let mut adc_config = AdcConfig::new();
    let x_pin = adc_config.enable_pin(p.GPIO39, Attenuation::_11dB);
    let y_pin = adc_config.enable_pin(p.GPIO36, Attenuation::_11dB);
    let adc = &*ADC.init(RefCell::new(Adc::new(p.ADC1, adc_config)));
    let inputs = InputPanel::new(
        JoystickAxes::new(AdcInput::new(adc, x_pin), AdcInput::new(adc, y_pin)),
        ButtonPin::new(DigitalInput::new(Input::new(p.GPIO4, Pull::Up))),
    );

    // Pages render from the empty record until the link delivers one
    if let Err(e) = spawner.spawn(render_task(display, renderer, inputs)) {
        error!("Failed to spawn render task: {:?}", e);
    }

    // ESP-NOW receive
    let wifi = match esp_wifi::init(timg0.timer0, Rng::new(p.RNG), p.RADIO_CLK) {
        Ok(wifi) => WIFI.init(wifi),
        Err(e) => {
            error!("Radio init failed: {:?}", e);
            park("no radio link").await
        }
    };
    let esp_now = match EspNow::new(wifi, p.WIFI) {
        Ok(esp_now) => esp_now,
        Err(e) => {
            error!("ESP-NOW init failed: {:?}", e);
            park("no radio link").await
        }
    };
    info!("ESP-NOW ready, firmware version {}", esp_now.version().unwrap_or(0));
    let (_manager, _sender, receiver) = esp_now.split();

    if let Err(e) = spawner.spawn(radio_rx_task(EspNowRx::new(receiver))) {
        error!("Failed to spawn radio task: {:?}", e);
    }

    info!("All tasks spawned");

    loop {
        Timer::after_secs(STATS_INTERVAL_SECS).await;
        info!(
            "Link: {} frames received, {} rejected",
            FRAMES_RECEIVED.load(Ordering::Relaxed),
            FRAMES_REJECTED.load(Ordering::Relaxed)
        );
    }
}

/// Keep the main task alive for logging after a setup failure
///
/// Tasks spawned before the failure keep running.
async fn park(reason: &'static str) -> ! {
    loop {
        Timer::after_secs(5).await;
        warn!("Setup incomplete: {=str}", reason);
    }
}
