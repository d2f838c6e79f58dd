//! Analog joystick direction handling

use crate::config::JoystickThresholds;

/// Joystick direction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    #[default]
    Idle,
    Left,
    Right,
    Up,
    Down,
}

/// Classify raw axis readings into a direction
///
/// The X axis is checked before the Y axis, so a diagonal deflection
/// resolves to LEFT or RIGHT. Priority: LEFT > RIGHT > UP > DOWN.
pub fn classify(x: u16, y: u16, thresholds: &JoystickThresholds) -> Direction {
    if x < thresholds.left {
        Direction::Left
    } else if x > thresholds.right {
        Direction::Right
    } else if y < thresholds.up {
        Direction::Up
    } else if y > thresholds.down {
        Direction::Down
    } else {
        Direction::Idle
    }
}

/// Edge detector for joystick directions
///
/// The stick is only examined once per gate interval, and a direction is
/// reported only when it differs from the last examined one: holding the
/// stick produces a single event.
pub struct Joystick {
    thresholds: JoystickThresholds,
    gate_ms: u64,
    last_gate_ms: u64,
    last_direction: Direction,
}

impl Joystick {
    /// Create a joystick handler
    pub fn new(thresholds: JoystickThresholds, gate_ms: u32) -> Self {
        Self {
            thresholds,
            gate_ms: gate_ms as u64,
            last_gate_ms: 0,
            last_direction: Direction::Idle,
        }
    }

    /// Sample the axes at `now_ms`
    ///
    /// Returns the new direction if a transition was recognized. Returning
    /// to IDLE is a transition too.
    pub fn poll(&mut self, now_ms: u64, x: u16, y: u16) -> Option<Direction> {
        let current = classify(x, y, &self.thresholds);

        if now_ms.saturating_sub(self.last_gate_ms) < self.gate_ms {
            return None;
        }
        self.last_gate_ms = now_ms;

        if current == self.last_direction {
            return None;
        }
        self.last_direction = current;
        Some(current)
    }
}
