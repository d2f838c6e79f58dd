//! Push-button debouncing

/// Debounced push button with press-edge detection
///
/// A raw level must stay unchanged for the debounce time before it becomes
/// the steady state. A press is reported once, on the transition of the
/// steady state from released to held.
pub struct Button {
    debounce_ms: u64,
    last_raw: bool,
    last_change_ms: u64,
    steady: bool,
}

impl Button {
    /// Create a released button
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms: debounce_ms as u64,
            last_raw: false,
            last_change_ms: 0,
            steady: false,
        }
    }

    /// Sample the button at `now_ms`
    ///
    /// `held` is the raw physical state (true while pressed). Returns true
    /// exactly once per debounced press.
    pub fn poll(&mut self, now_ms: u64, held: bool) -> bool {
        if held != self.last_raw {
            self.last_raw = held;
            self.last_change_ms = now_ms;
        }

        if now_ms.saturating_sub(self.last_change_ms) < self.debounce_ms {
            return false;
        }

        let was_held = self.steady;
        self.steady = held;
        !was_held && held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_reported_once() {
        let mut button = Button::new(30);
        assert!(!button.poll(0, true));
        assert!(button.poll(40, true));
        assert!(!button.poll(80, true));
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut button = Button::new(30);
        assert!(!button.poll(0, true));
        assert!(!button.poll(10, false));
        assert!(!button.poll(20, true));
        assert!(!button.poll(40, true));
        assert!(button.poll(50, true));
    }

    #[test]
    fn test_release_then_press_again() {
        let mut button = Button::new(30);
        button.poll(0, true);
        assert!(button.poll(200, true));
        assert!(!button.poll(400, false));
        assert!(!button.poll(600, false));
        assert!(!button.poll(800, true));
        assert!(button.poll(1000, true));
    }
}
