//! Bit-banged SPI register transport.
//!
//! Four wires: chip-select (idle high), serial clock (idle low), data-out
//! (driver to peripheral) and data-in (peripheral to driver). Clock phase 0,
//! MSB first. One chip-select-low period carries one register operation:
//!
//! | Bits  | Field                                   |
//! |-------|-----------------------------------------|
//! | 15    | Command (1 = write, 0 = read)           |
//! | 14-12 | Reserved, driven low                    |
//! | 11-8  | Register address                        |
//! | 7-0   | Data (driver for writes, peripheral for reads) |
//!
//! The driver side ([`SpiMaster`]) sets data up on falling clock edges and
//! the peripheral side ([`SpiResponder`]) captures on rising ones. For reads
//! the responder shifts the register out on data-in after the address is
//! complete. The operation is committed on the chip-select rising edge and
//! only if exactly 16 bits were clocked.

mod error;
mod frame;
mod master;
mod pins;
mod responder;

pub use error::FramingError;
pub use frame::{
    ADDRESS_BITS, Command, DATA_BITS, DONT_CARE_BITS, FRAME_BITS, Frame, HEADER_BITS, MAX_ADDRESS,
};
pub use master::{FramePhase, SpiMaster, Step};
pub use pins::SpiPins;
pub use responder::SpiResponder;
