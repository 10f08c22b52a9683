//! Register access vocabulary shared by transports and peripherals.

/// Direction of a register operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
}

/// One decoded register operation: 4-bit address, 8-bit data.
///
/// For reads, `data` carries the value returned to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterOp {
    pub access: Access,
    pub address: u8,
    pub data: u8,
}

impl RegisterOp {
    #[must_use]
    pub const fn write(address: u8, data: u8) -> Self {
        Self {
            access: Access::Write,
            address,
            data,
        }
    }

    #[must_use]
    pub const fn read(address: u8, data: u8) -> Self {
        Self {
            access: Access::Read,
            address,
            data,
        }
    }

    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(self.access, Access::Write)
    }
}

/// Peripheral side of a register interface.
///
/// Transports read committed state directly but never mutate it; writes are
/// handed over whole and take effect at the peripheral's next tick boundary.
pub trait RegisterFile {
    /// Committed value of a register. Must not change peripheral state.
    fn read(&self, address: u8) -> u8;

    /// Queue a completed write. Applied during the next tick.
    fn commit(&mut self, op: RegisterOp);
}

/// Driver side of a register interface.
///
/// Blocking: each call runs the whole transaction before returning. Any
/// transport (bit-banged serial, processor bus) can sit behind this.
pub trait RegisterPort {
    type Error;

    /// Write `data` to the register at `address`.
    fn write_reg(&mut self, address: u8, data: u8) -> Result<(), Self::Error>;

    /// Read the register at `address`.
    fn read_reg(&mut self, address: u8) -> Result<u8, Self::Error>;
}
