use sim_core::RegisterOp;
use thiserror::Error;

/// Caller contract violations on the serial transport.
///
/// A framing error aborts that one operation; nothing is committed to the
/// peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FramingError {
    #[error("address {address:#04X} does not fit in 4 bits")]
    AddressWidth { address: u8 },
    #[error("a frame is already being clocked")]
    FrameInFlight,
    #[error("chip-select released after {received} clock edges (expected 16)")]
    BitCount { received: u8 },
    #[error("frame ended without the responder committing it")]
    NotCommitted,
    #[error("responder decoded {decoded:?}, driver sent {sent:?}")]
    Mismatch { sent: RegisterOp, decoded: RegisterOp },
}
