//! Presenter node input logic
//!
//! The render loop polls the button and the joystick once per frame and
//! feeds the results into a [`Navigator`], which owns the screen selection.
//! Drawing is done by the display crate.

pub mod button;
pub mod joystick;
pub mod screens;

pub use button::Button;
pub use joystick::{classify, Direction, Joystick};
pub use screens::{Page, ScreenSelector, PAGE_COUNT};

use crate::config::PresenterConfig;

/// Raw input levels sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSample {
    /// Joystick X axis, raw ADC counts
    pub x: u16,
    /// Joystick Y axis, raw ADC counts
    pub y: u16,
    /// Button is physically held down
    pub button_down: bool,
}

/// Result of one navigation poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Navigation {
    /// Page to render this frame
    pub page: Page,
    /// Page changed since the last frame; header must be redrawn
    pub redraw_header: bool,
    /// Button press recognized this frame
    pub button_pressed: bool,
    /// Joystick transition recognized this frame
    pub direction: Option<Direction>,
}

/// Per-frame input handling for the presenter loop
pub struct Navigator {
    button: Button,
    joystick: Joystick,
    selector: ScreenSelector,
}

impl Navigator {
    /// Create a navigator on the first page
    pub fn new(config: &PresenterConfig) -> Self {
        Self {
            button: Button::new(config.button_debounce_ms),
            joystick: Joystick::new(config.joystick, config.joystick_gate_ms),
            selector: ScreenSelector::new(),
        }
    }

    /// Process one frame of input
    ///
    /// Button first (press resets to the first page), then the joystick.
    pub fn poll(&mut self, now_ms: u64, input: InputSample) -> Navigation {
        let button_pressed = self.button.poll(now_ms, input.button_down);
        if button_pressed {
            self.selector.reset();
        }

        let direction = self.joystick.poll(now_ms, input.x, input.y);
        if let Some(direction) = direction {
            self.selector.apply(direction);
        }

        let redraw_header = self.selector.take_header_redraw();

        Navigation {
            page: self.selector.current(),
            redraw_header,
            button_pressed,
            direction,
        }
    }
}
