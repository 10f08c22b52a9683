//! Frame layout and encoding.

use sim_core::{Access, RegisterOp};

use crate::FramingError;

/// Reserved bits between the command bit and the address.
pub const DONT_CARE_BITS: u8 = 3;
/// Address field width.
pub const ADDRESS_BITS: u8 = 4;
/// Data field width.
pub const DATA_BITS: u8 = 8;
/// Command, reserved and address bits: everything before the data field.
pub const HEADER_BITS: u8 = 1 + DONT_CARE_BITS + ADDRESS_BITS;
/// Clock edges in one well-formed frame.
pub const FRAME_BITS: u8 = HEADER_BITS + DATA_BITS;
/// Highest addressable register.
pub const MAX_ADDRESS: u8 = (1 << ADDRESS_BITS) - 1;

/// Frame command bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Read,
    Write,
}

impl Command {
    /// Level driven on data-out for the command bit.
    #[must_use]
    pub const fn bit(self) -> bool {
        matches!(self, Command::Write)
    }

    #[must_use]
    pub const fn from_bit(bit: bool) -> Self {
        if bit { Command::Write } else { Command::Read }
    }
}

impl From<Command> for Access {
    fn from(command: Command) -> Self {
        match command {
            Command::Read => Access::Read,
            Command::Write => Access::Write,
        }
    }
}

/// One register operation as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    pub command: Command,
    pub address: u8,
    pub data: u8,
}

impl Frame {
    pub fn new(command: Command, address: u8, data: u8) -> Result<Self, FramingError> {
        if address > MAX_ADDRESS {
            return Err(FramingError::AddressWidth { address });
        }
        Ok(Self {
            command,
            address,
            data,
        })
    }

    pub fn write(address: u8, data: u8) -> Result<Self, FramingError> {
        Self::new(Command::Write, address, data)
    }

    /// Read frames drive data-out low throughout the data field.
    pub fn read(address: u8) -> Result<Self, FramingError> {
        Self::new(Command::Read, address, 0)
    }

    /// The 16 bits of the frame in wire order, first bit in bit 15.
    #[must_use]
    pub const fn word(&self) -> u16 {
        let command = if self.command.bit() { 1u16 << 15 } else { 0 };
        command | ((self.address as u16 & 0x0F) << DATA_BITS) | self.data as u16
    }

    /// Decode 16 captured bits. Reserved bits are ignored.
    #[must_use]
    pub const fn from_word(word: u16) -> Self {
        Self {
            command: Command::from_bit(word & 0x8000 != 0),
            address: ((word >> DATA_BITS) & 0x0F) as u8,
            data: word as u8,
        }
    }

    /// Whether the responder decoded this frame. Read data is not compared.
    #[must_use]
    pub fn decoded_as(&self, op: &RegisterOp) -> bool {
        let sent = self.into_op();
        sent.access == op.access
            && sent.address == op.address
            && (self.command == Command::Read || sent.data == op.data)
    }

    #[must_use]
    pub fn into_op(self) -> RegisterOp {
        RegisterOp {
            access: self.command.into(),
            address: self.address,
            data: self.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_constants() {
        assert_eq!(HEADER_BITS, 8);
        assert_eq!(FRAME_BITS, 16);
        assert_eq!(MAX_ADDRESS, 0x0F);
    }

    #[test]
    fn write_sets_command_bit() {
        let frame = Frame::write(0x3, 0xA5).expect("valid address");
        assert_eq!(frame.word(), 0x83A5);
    }

    #[test]
    fn read_clears_command_bit_and_data() {
        let frame = Frame::read(0x2).expect("valid address");
        assert_eq!(frame.word(), 0x0200);
    }

    #[test]
    fn reserved_bits_ignored_on_decode() {
        let frame = Frame::from_word(0xF4C3);
        assert_eq!(frame.command, Command::Write);
        assert_eq!(frame.address, 0x4);
        assert_eq!(frame.data, 0xC3);
    }

    #[test]
    fn wide_address_rejected() {
        assert_eq!(
            Frame::write(0x10, 0),
            Err(FramingError::AddressWidth { address: 0x10 })
        );
    }

    #[test]
    fn decoded_as_ignores_read_data() {
        let read = Frame::read(0x4).expect("valid address");
        assert!(read.decoded_as(&RegisterOp::read(0x4, 0x3C)));
        assert!(!read.decoded_as(&RegisterOp::read(0x8, 0)));
        assert!(!read.decoded_as(&RegisterOp::write(0x4, 0)));

        let write = Frame::write(0x4, 0x06).expect("valid address");
        assert!(write.decoded_as(&RegisterOp::write(0x4, 0x06)));
        assert!(!write.decoded_as(&RegisterOp::write(0x4, 0x03)));
        assert!(!write.decoded_as(&RegisterOp::read(0x8, 0)));
    }

    #[test]
    fn into_op_keeps_direction() {
        let op = Frame::write(0x1, 7).expect("valid address").into_op();
        assert_eq!(op, RegisterOp::write(0x1, 7));
        assert!(!Frame::read(0x2).expect("valid address").into_op().is_write());
    }
}
