//! Presenter input devices
//!
//! An analog joystick (two ADC axes) and its push button. The button is
//! wired to ground with a pull-up, so it reads low while held.

use fieldlink_core::presenter::InputSample;
use fieldlink_hal::adc::{AnalogInput, ADC_MAX};
use fieldlink_hal::gpio::InputPin;

/// Reading substituted for a failed conversion (stick centred)
pub const AXIS_CENTER: u16 = ADC_MAX / 2 + 1;

/// Two-axis analog joystick
pub struct JoystickAxes<X, Y> {
    x: X,
    y: Y,
}

impl<X: AnalogInput, Y: AnalogInput> JoystickAxes<X, Y> {
    pub fn new(x: X, y: Y) -> Self {
        Self { x, y }
    }

    /// Read both axes; a failed conversion reads as centred
    pub fn read(&mut self) -> (u16, u16) {
        let x = self.x.read_raw().unwrap_or(AXIS_CENTER);
        let y = self.y.read_raw().unwrap_or(AXIS_CENTER);
        (x, y)
    }
}

/// Active-low push button
pub struct ButtonPin<P> {
    pin: P,
}

impl<P: InputPin> ButtonPin<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Button is physically held down
    pub fn is_down(&self) -> bool {
        self.pin.is_low()
    }
}

/// Joystick and button sampled together once per frame
pub struct InputPanel<X, Y, P> {
    axes: JoystickAxes<X, Y>,
    button: ButtonPin<P>,
}

impl<X: AnalogInput, Y: AnalogInput, P: InputPin> InputPanel<X, Y, P> {
    pub fn new(axes: JoystickAxes<X, Y>, button: ButtonPin<P>) -> Self {
        Self { axes, button }
    }

    /// Sample all inputs
    pub fn sample(&mut self) -> InputSample {
        let (x, y) = self.axes.read();
        InputSample {
            x,
            y,
            button_down: self.button.is_down(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use fieldlink_hal::adc::AdcError;

    struct Axis<'a>(&'a Cell<Result<u16, AdcError>>);

    impl AnalogInput for Axis<'_> {
        fn read_raw(&mut self) -> Result<u16, AdcError> {
            self.0.get()
        }
    }

    struct Pin<'a>(&'a Cell<bool>);

    impl InputPin for Pin<'_> {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_sample_reads_levels() {
        let x = Cell::new(Ok(500));
        let y = Cell::new(Ok(3500));
        let level = Cell::new(true);
        let mut panel = InputPanel::new(
            JoystickAxes::new(Axis(&x), Axis(&y)),
            ButtonPin::new(Pin(&level)),
        );

        assert_eq!(
            panel.sample(),
            InputSample {
                x: 500,
                y: 3500,
                button_down: false
            }
        );

        level.set(false);
        assert!(panel.sample().button_down);
    }

    #[test]
    fn test_failed_axis_reads_centre() {
        let x = Cell::new(Err(AdcError::Conversion));
        let y = Cell::new(Ok(100));
        let mut axes = JoystickAxes::new(Axis(&x), Axis(&y));
        assert_eq!(axes.read(), (AXIS_CENTER, 100));
        assert!(AXIS_CENTER > 1000 && AXIS_CENTER < 3000);
    }
}
