//! Peripheral side of the transport: samples the wires once per peripheral
//! clock tick and turns a chip-select period into one register operation.

use log::{debug, trace, warn};
use sim_core::{Observable, RegisterFile, RegisterOp, Value};

use crate::frame::{FRAME_BITS, HEADER_BITS};
use crate::{Command, Frame, FramingError, SpiPins};

/// Frame decoder for the peripheral end of the bus.
#[derive(Debug, Clone)]
pub struct SpiResponder {
    prev_chip_select: bool,
    prev_clock: bool,
    in_frame: bool,
    /// Rising clock edges seen in the current frame (saturating).
    bits: u8,
    shift: u16,
    /// Register value latched for a read once the header is in.
    read_data: Option<u8>,
}

impl SpiResponder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            prev_chip_select: true,
            prev_clock: false,
            in_frame: false,
            bits: 0,
            shift: 0,
            read_data: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Sample the wires for one peripheral tick.
    ///
    /// Drives `bus.data_in` during reads. Returns the decoded operation (or
    /// the framing error) on the tick that sees chip-select rise; the caller
    /// owns handing a write to the register file.
    pub fn clock<R: RegisterFile>(
        &mut self,
        bus: &mut SpiPins,
        registers: &R,
    ) -> Option<Result<RegisterOp, FramingError>> {
        let selected_now = bus.is_selected();
        let cs_fell = self.prev_chip_select && selected_now;
        let cs_rose = !self.prev_chip_select && !selected_now;
        let clock_rose = !self.prev_clock && bus.clock;
        let clock_fell = self.prev_clock && !bus.clock;
        self.prev_chip_select = bus.chip_select;
        self.prev_clock = bus.clock;

        if cs_fell {
            self.in_frame = true;
            self.bits = 0;
            self.shift = 0;
            self.read_data = None;
        }

        if self.in_frame && selected_now {
            if clock_rose {
                self.capture(bus.data_out, registers);
            }
            if clock_fell {
                *bus = bus.respond(self.output_bit());
            }
        }

        if cs_rose && self.in_frame {
            self.in_frame = false;
            *bus = bus.respond(false);
            return Some(self.finish());
        }
        None
    }

    fn capture<R: RegisterFile>(&mut self, bit: bool, registers: &R) {
        self.shift = (self.shift << 1) | u16::from(bit);
        self.bits = self.bits.saturating_add(1);
        if self.bits == HEADER_BITS {
            let header = Frame::from_word(self.shift << 8);
            trace!(
                "spi header: {:?} address {:#03X}",
                header.command, header.address
            );
            if header.command == Command::Read {
                self.read_data = Some(registers.read(header.address));
            }
        }
    }

    /// Data-in level for the bit about to be captured.
    fn output_bit(&self) -> bool {
        match self.read_data {
            Some(data) if (HEADER_BITS..FRAME_BITS).contains(&self.bits) => {
                let index = FRAME_BITS - 1 - self.bits;
                (data >> index) & 1 != 0
            }
            _ => false,
        }
    }

    fn finish(&mut self) -> Result<RegisterOp, FramingError> {
        if self.bits != FRAME_BITS {
            warn!("spi frame discarded after {} clock edges", self.bits);
            return Err(FramingError::BitCount {
                received: self.bits,
            });
        }
        let mut frame = Frame::from_word(self.shift);
        if let Some(data) = self.read_data {
            frame.data = data;
        }
        debug!(
            "spi frame: {:?} address {:#03X} data {:#04X}",
            frame.command, frame.address, frame.data
        );
        Ok(frame.into_op())
    }

    #[must_use]
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    #[must_use]
    pub fn bits_received(&self) -> u8 {
        self.bits
    }
}

impl Default for SpiResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl Observable for SpiResponder {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "in_frame" => Some(self.in_frame.into()),
            "bits" => Some(self.bits.into()),
            "shift" => Some(Value::U64(u64::from(self.shift))),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &["in_frame", "bits", "shift"]
    }
}
