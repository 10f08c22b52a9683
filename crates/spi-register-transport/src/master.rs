//! Driver side of the transport: turns a [`Frame`] into wire toggles.
//!
//! The driver is an explicit state machine. Each call to [`SpiMaster::step`]
//! performs exactly one change on the wires; the caller lets the peripheral
//! clock run for the inter-bit delay between steps. A frame is 35 steps:
//!
//! 1. Idle: chip-select high, clock low.
//! 2. Command: chip-select low with the command bit on data-out, then clock
//!    high.
//! 3. Don't-care, address, data: per bit, clock low with the next bit on
//!    data-out (setup), then clock high (capture).
//! 4. End: clock low, then chip-select high.

use crate::frame::{ADDRESS_BITS, DATA_BITS, DONT_CARE_BITS};
use crate::{Command, Frame, FramingError, SpiPins};

/// Where the driver is within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramePhase {
    Idle,
    Command,
    DontCare,
    Address,
    Data,
    End,
}

impl FramePhase {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            FramePhase::Idle => "IDLE",
            FramePhase::Command => "CMD",
            FramePhase::DontCare => "DONTCARE",
            FramePhase::Address => "ADDRESS",
            FramePhase::Data => "DATA",
            FramePhase::End => "END",
        }
    }
}

/// Half of a bit period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Half {
    /// Clock falls, next bit goes on data-out.
    Setup,
    /// Clock rises, responder captures.
    Capture,
}

/// Result of one driver step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No frame loaded; the wires were not touched.
    Idle,
    /// Frame still in progress.
    Busy,
    /// Chip-select just released. Carries the sampled byte for reads.
    Complete(Option<u8>),
}

/// Frame encoder for the driver end of the bus.
#[derive(Debug, Clone)]
pub struct SpiMaster {
    frame: Option<Frame>,
    phase: FramePhase,
    half: Half,
    /// Bits left in the current phase. Doubles as the MSB-first bit index.
    remaining: u8,
    /// Data-in bits sampled so far (reads only).
    received: u8,
}

impl SpiMaster {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: None,
            phase: FramePhase::Idle,
            half: Half::Setup,
            remaining: 0,
            received: 0,
        }
    }

    /// Load a frame. The next [`step`](Self::step) starts clocking it.
    pub fn begin(&mut self, frame: Frame) -> Result<(), FramingError> {
        if self.is_busy() {
            return Err(FramingError::FrameInFlight);
        }
        self.frame = Some(frame);
        self.phase = FramePhase::Idle;
        self.half = Half::Setup;
        self.remaining = 0;
        self.received = 0;
        Ok(())
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.frame.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    #[must_use]
    pub fn bits_remaining(&self) -> u8 {
        self.remaining
    }

    /// Perform the next wire change of the loaded frame.
    pub fn step(&mut self, bus: &mut SpiPins) -> Step {
        let Some(frame) = self.frame else {
            return Step::Idle;
        };

        match (self.phase, self.half) {
            (FramePhase::Idle, _) => {
                *bus = SpiPins {
                    clock: false,
                    ..bus.deselect()
                };
                self.enter(FramePhase::Command, 1);
            }
            (FramePhase::Command, Half::Setup) => {
                *bus = bus.select().drive(frame.command.bit());
                self.half = Half::Capture;
            }
            (FramePhase::End, Half::Setup) => {
                *bus = bus.invert_clock();
                self.half = Half::Capture;
            }
            (FramePhase::End, Half::Capture) => {
                *bus = bus.deselect();
                self.frame = None;
                self.enter(FramePhase::Idle, 0);
                let read = matches!(frame.command, Command::Read).then_some(self.received);
                return Step::Complete(read);
            }
            (_, Half::Setup) => {
                *bus = bus.invert_clock().drive(self.next_bit(&frame));
                self.half = Half::Capture;
            }
            (phase, Half::Capture) => {
                if phase == FramePhase::Data && frame.command == Command::Read {
                    self.received = (self.received << 1) | u8::from(bus.data_in);
                }
                *bus = bus.invert_clock();
                self.remaining -= 1;
                if self.remaining > 0 {
                    self.half = Half::Setup;
                } else {
                    match phase {
                        FramePhase::Command => self.enter(FramePhase::DontCare, DONT_CARE_BITS),
                        FramePhase::DontCare => self.enter(FramePhase::Address, ADDRESS_BITS),
                        FramePhase::Address => self.enter(FramePhase::Data, DATA_BITS),
                        _ => self.enter(FramePhase::End, 0),
                    }
                }
            }
        }
        Step::Busy
    }

    fn enter(&mut self, phase: FramePhase, bits: u8) {
        self.phase = phase;
        self.half = Half::Setup;
        self.remaining = bits;
    }

    fn next_bit(&self, frame: &Frame) -> bool {
        let index = self.remaining - 1;
        match (self.phase, frame.command) {
            (FramePhase::Address, _) => (frame.address >> index) & 1 != 0,
            (FramePhase::Data, Command::Write) => (frame.data >> index) & 1 != 0,
            _ => false,
        }
    }
}

impl Default for SpiMaster {
    fn default() -> Self {
        Self::new()
    }
}
