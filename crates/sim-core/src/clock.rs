//! Peripheral clock configuration.

use crate::Ticks;

/// Frequency of the single synchronous clock driving the peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasterClock {
    /// Clock frequency in Hz (e.g. `10_000_000` for a 100 ns period).
    pub frequency_hz: u64,
}

impl MasterClock {
    #[must_use]
    pub const fn new(frequency_hz: u64) -> Self {
        Self { frequency_hz }
    }

    /// Clock period in nanoseconds (integer division).
    #[must_use]
    pub const fn period_ns(&self) -> u64 {
        1_000_000_000 / self.frequency_hz
    }

    /// Convert a tick count to simulated nanoseconds.
    #[must_use]
    pub const fn elapsed_ns(&self, ticks: Ticks) -> u64 {
        ticks.get() * self.period_ns()
    }
}

impl Default for MasterClock {
    fn default() -> Self {
        Self::new(10_000_000)
    }
}
