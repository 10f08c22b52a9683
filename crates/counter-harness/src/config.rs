//! Harness configuration.

use edge_counter::ConfigError;
use sim_core::{MasterClock, Ticks};

use crate::HarnessError;

/// Configuration for a simulated counter system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Peripheral clock (default 10 MHz).
    pub clock: MasterClock,
    /// Ticks between consecutive wire changes of the driver (default 10).
    pub inter_bit_delay: Ticks,
    /// Number of physical input pins, 1-8 (default 8).
    pub input_width: u8,
    /// Print every driver step to stderr.
    pub trace_bus: bool,
}

impl HarnessConfig {
    pub fn validate(&self) -> Result<(), HarnessError> {
        if !(1..=1_000_000_000).contains(&self.clock.frequency_hz) {
            return Err(HarnessError::ClockFrequency(self.clock.frequency_hz));
        }
        // The responder needs at least one tick to see each wire change.
        if self.inter_bit_delay.is_zero() {
            return Err(HarnessError::InterBitDelay);
        }
        if !(1..=8).contains(&self.input_width) {
            return Err(ConfigError::InputWidth(self.input_width).into());
        }
        Ok(())
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            clock: MasterClock::new(10_000_000),
            inter_bit_delay: Ticks::new(10),
            input_width: 8,
            trace_bus: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(HarnessConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_delay_rejected() {
        let config = HarnessConfig {
            inter_bit_delay: Ticks::ZERO,
            ..HarnessConfig::default()
        };
        assert_eq!(config.validate(), Err(HarnessError::InterBitDelay));
    }

    #[test]
    fn bad_width_rejected() {
        let config = HarnessConfig {
            input_width: 9,
            ..HarnessConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(HarnessError::Config(ConfigError::InputWidth(9)))
        );
    }

    #[test]
    fn zero_clock_rejected() {
        let config = HarnessConfig {
            clock: MasterClock::new(0),
            ..HarnessConfig::default()
        };
        assert_eq!(config.validate(), Err(HarnessError::ClockFrequency(0)));
    }
}
