//! Digital input abstraction
//!
//! The only digital input in the link is the presenter's joystick button,
//! wired active-low with a pull-up.

/// Level-sampled digital input
pub trait InputPin {
    /// Pin is at logic 1
    fn is_high(&self) -> bool;

    /// Pin is at logic 0 (an active-low switch is closed)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
