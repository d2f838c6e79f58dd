//! Screen selection state

use super::joystick::Direction;

/// Number of pages in the cycle
pub const PAGE_COUNT: usize = 3;

/// Pages shown by the presenter, in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    /// Live-link screen: date, local time, temperature
    Link,
    /// GPS screen: position, altitude, speed, satellites
    Gps,
    /// Gas and soil screen
    Gas,
}

impl Page {
    /// All pages in cycle order
    pub const ALL: [Page; PAGE_COUNT] = [Page::Link, Page::Gps, Page::Gas];

    /// Position in the cycle
    pub fn index(self) -> usize {
        match self {
            Page::Link => 0,
            Page::Gps => 1,
            Page::Gas => 2,
        }
    }
}

/// Selected page plus the page the header was last drawn for
pub struct ScreenSelector {
    current: usize,
    rendered: Option<usize>,
}

impl Default for ScreenSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenSelector {
    /// Start on the first page with nothing rendered yet
    pub fn new() -> Self {
        Self {
            current: 0,
            rendered: None,
        }
    }

    /// Apply a joystick transition
    ///
    /// LEFT moves back and RIGHT forward, wrapping at both ends. Other
    /// directions are ignored.
    pub fn apply(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                self.current = (self.current + PAGE_COUNT - 1) % PAGE_COUNT;
            }
            Direction::Right => {
                self.current = (self.current + 1) % PAGE_COUNT;
            }
            Direction::Up | Direction::Down | Direction::Idle => {}
        }
    }

    /// Jump back to the first page
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Selected page
    pub fn current(&self) -> Page {
        Page::ALL[self.current]
    }

    /// Check whether the header must be redrawn, marking it drawn
    ///
    /// True on the first call and whenever the selection changed since the
    /// previous call.
    pub fn take_header_redraw(&mut self) -> bool {
        if self.rendered == Some(self.current) {
            return false;
        }
        self.rendered = Some(self.current);
        true
    }
}
