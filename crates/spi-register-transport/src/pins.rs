//! The four transport wires as one typed value.

/// State of the transport wires at one instant.
///
/// Transforms are pure: each returns the new wire state and leaves the
/// original untouched, so a step of the driver reads as one expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpiPins {
    /// Chip-select, active low.
    pub chip_select: bool,
    /// Serial clock.
    pub clock: bool,
    /// Driver to peripheral.
    pub data_out: bool,
    /// Peripheral to driver.
    pub data_in: bool,
}

impl SpiPins {
    /// Bus at rest: deselected, clock low, both data lines low.
    pub const IDLE: Self = Self {
        chip_select: true,
        clock: false,
        data_out: false,
        data_in: false,
    };

    /// Pull chip-select low.
    #[must_use]
    pub const fn select(self) -> Self {
        Self {
            chip_select: false,
            ..self
        }
    }

    /// Release chip-select high.
    #[must_use]
    pub const fn deselect(self) -> Self {
        Self {
            chip_select: true,
            ..self
        }
    }

    /// Toggle the serial clock. Two toggles make one bit period.
    #[must_use]
    pub const fn invert_clock(self) -> Self {
        Self {
            clock: !self.clock,
            ..self
        }
    }

    /// Drive data-out.
    #[must_use]
    pub const fn drive(self, bit: bool) -> Self {
        Self {
            data_out: bit,
            ..self
        }
    }

    /// Drive data-in (peripheral side only).
    #[must_use]
    pub const fn respond(self, bit: bool) -> Self {
        Self {
            data_in: bit,
            ..self
        }
    }

    #[must_use]
    pub const fn is_selected(&self) -> bool {
        !self.chip_select
    }
}

impl Default for SpiPins {
    fn default() -> Self {
        Self::IDLE
    }
}
