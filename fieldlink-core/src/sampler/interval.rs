//! Periodic timers driven by a millisecond clock

/// Fires at most once per `period_ms`
///
/// Mirrors the `now - last >= period` idiom: the timer starts at time zero,
/// so the first poll at or after `period_ms` fires, and each firing restarts
/// the period from the poll time (no catch-up of missed periods).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval {
    period_ms: u64,
    last_ms: u64,
}

impl Interval {
    /// Create a new interval timer
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms as u64,
            last_ms: 0,
        }
    }

    /// Check the timer at `now_ms`, restarting it if it fired
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_ms) >= self.period_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}
