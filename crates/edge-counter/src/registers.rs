//! Register map.

/// Addressable registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    Reset = 0x00,
    Inc = 0x01,
    Value = 0x02,
    Cfg = 0x03,
    Pins = 0x04,
}

impl Register {
    pub const ALL: [Register; 5] = [
        Register::Reset,
        Register::Inc,
        Register::Value,
        Register::Cfg,
        Register::Pins,
    ];

    /// Decode a 4-bit address. `None` for unmapped addresses.
    #[must_use]
    pub const fn from_address(address: u8) -> Option<Self> {
        match address {
            0x00 => Some(Register::Reset),
            0x01 => Some(Register::Inc),
            0x02 => Some(Register::Value),
            0x03 => Some(Register::Cfg),
            0x04 => Some(Register::Pins),
            _ => None,
        }
    }

    #[must_use]
    pub const fn address(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Register::Reset => "RESET",
            Register::Inc => "INC",
            Register::Value => "VALUE",
            Register::Cfg => "CFG",
            Register::Pins => "PINS",
        }
    }
}
