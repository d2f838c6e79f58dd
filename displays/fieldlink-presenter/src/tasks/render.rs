//! Render loop
//!
//! Runs at a fixed frame rate: take the newest record, poll the joystick
//! and button, compose the selected page and push it to the panel.

use defmt::*;
use embassy_time::{Instant, Timer};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use esp_hal::gpio::{GpioPin, Output};
use esp_hal::spi::master::Spi;
use esp_hal::Blocking;

use fieldlink_core::presenter::Navigator;
use fieldlink_display::PageRenderer;
use fieldlink_drivers::input::InputPanel;
use fieldlink_hal_esp32::{AdcInput, DigitalInput};
use fieldlink_protocol::TelemetryRecord;

use crate::channels::LATEST_RECORD;
use crate::config::PRESENTER;
use crate::st7735::St7735;

/// SPI bus with the panel as its only device
pub type PanelSpi = ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, NoDelay>;

/// TFT panel
pub type Display = St7735<'static, PanelSpi, Output<'static>>;

/// Joystick X on GPIO39, Y on GPIO36, button on GPIO4
pub type Inputs =
    InputPanel<AdcInput<'static, GpioPin<39>>, AdcInput<'static, GpioPin<36>>, DigitalInput<'static>>;

#[embassy_executor::task]
pub async fn render_task(mut display: Display, mut renderer: PageRenderer, mut inputs: Inputs) {
    info!("Render task started ({} ms/frame)", PRESENTER.frame_ms);

    let mut navigator = Navigator::new(&PRESENTER);
    let mut record = TelemetryRecord::EMPTY;

    loop {
        if let Some(latest) = LATEST_RECORD.try_take() {
            record = latest;
        }

        let now = Instant::now().as_millis();
        let nav = navigator.poll(now, inputs.sample());
        if nav.button_pressed {
            info!("Button pressed");
        }
        if let Some(direction) = nav.direction {
            debug!("Joystick {:?} -> {:?}", direction, nav.page);
        }

        renderer.frame(&nav, &record);
        if let Err(e) = renderer.push(&mut display) {
            warn!("Display update failed: {:?}", e);
        }

        Timer::after_millis(PRESENTER.frame_ms as u64).await;
    }
}
