//! GPIO implementation

use esp_hal::gpio::Input;

/// Digital input backed by an esp-hal pin
pub struct DigitalInput<'d> {
    pin: Input<'d>,
}

impl<'d> DigitalInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl fieldlink_hal::gpio::InputPin for DigitalInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
