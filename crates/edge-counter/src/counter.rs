//! The counter peripheral: register file plus counting state machine.

use std::collections::VecDeque;

use log::{debug, trace};
use sim_core::{Observable, RegisterFile, RegisterOp, Tickable, Value};

use crate::{ConfigError, EdgeMode, Register, Synchronizer, segment};

/// Pin mask at power-on: pin 0 only.
pub const DEFAULT_PIN_MASK: u8 = 0x01;

/// Edge-triggered event counter.
pub struct EdgeCounter {
    /// Raw input pins, sampled on every tick. Driven by the system.
    pub inputs: u8,
    /// Pins physically present.
    input_mask: u8,

    counter: u8,
    /// CFG register: 2-bit edge mode field as written.
    cfg: u8,
    pin_mask: u8,
    sync: Synchronizer,

    /// Writes committed by the transport, applied at the next tick.
    pending: VecDeque<RegisterOp>,

    ticks: u64,
    /// Edges counted since power-on (diagnostic).
    edges: u64,
}

impl EdgeCounter {
    /// Counter with eight input pins.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inputs: 0,
            input_mask: 0xFF,
            counter: 0,
            cfg: EdgeMode::None.code(),
            pin_mask: DEFAULT_PIN_MASK,
            sync: Synchronizer::new(),
            pending: VecDeque::new(),
            ticks: 0,
            edges: 0,
        }
    }

    /// Counter with `width` input pins (1-8). Pins above the width never
    /// reach the composite signal.
    pub fn with_input_width(width: u8) -> Result<Self, ConfigError> {
        if !(1..=8).contains(&width) {
            return Err(ConfigError::InputWidth(width));
        }
        let mut counter = Self::new();
        counter.input_mask = u8::MAX >> (8 - width);
        Ok(counter)
    }

    /// Power-on reset. Unlike the RESET register this also restores CFG
    /// and PINS and drops uncommitted writes.
    pub fn reset(&mut self) {
        let input_mask = self.input_mask;
        *self = Self::new();
        self.input_mask = input_mask;
    }

    /// OR of the selected input pins.
    #[must_use]
    pub fn composite(&self) -> bool {
        self.inputs & self.pin_mask & self.input_mask != 0
    }

    /// Counter value as of the last completed tick.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.counter
    }

    #[must_use]
    pub fn edge_mode(&self) -> EdgeMode {
        EdgeMode::from_register(self.cfg)
    }

    #[must_use]
    pub fn pin_mask(&self) -> u8 {
        self.pin_mask
    }

    /// Seven-segment pattern for the counter's low nibble.
    #[must_use]
    pub fn display(&self) -> u8 {
        segment::encode(self.counter)
    }

    #[must_use]
    pub fn synchronizer(&self) -> &Synchronizer {
        &self.sync
    }

    /// Committed writes not yet applied.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn apply(&mut self, op: RegisterOp, next: &mut u8, composite: bool) {
        let Some(register) = Register::from_address(op.address) else {
            debug!("write {:#04X} to unmapped {:#03X} ignored", op.data, op.address);
            return;
        };
        debug!("{} <- {:#04X}", register.name(), op.data);
        match register {
            Register::Reset => {
                *next = 0;
                self.sync.flush(composite);
            }
            Register::Inc => *next = next.wrapping_add(1),
            Register::Cfg => {
                self.cfg = op.data & 0b11;
                debug!("edge mode {}", self.edge_mode().name());
            }
            Register::Pins => self.pin_mask = op.data,
            Register::Value => {}
        }
    }
}

impl Default for EdgeCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Tickable for EdgeCounter {
    fn tick(&mut self) {
        self.ticks += 1;

        let composite = self.composite();
        let edge = self.sync.clock(composite);

        let mut next = self.counter;
        if self.edge_mode().counts(edge) {
            next = next.wrapping_add(1);
            self.edges += 1;
            trace!("tick {}: {:?} edge counted", self.ticks, edge);
        }

        // Register side effects land after edge detection, in commit order.
        while let Some(op) = self.pending.pop_front() {
            self.apply(op, &mut next, composite);
        }

        self.counter = next;
    }
}

impl RegisterFile for EdgeCounter {
    fn read(&self, address: u8) -> u8 {
        match Register::from_address(address) {
            Some(Register::Value) => self.counter,
            Some(Register::Cfg) => self.cfg,
            Some(Register::Pins) => self.pin_mask,
            Some(Register::Reset | Register::Inc) | None => 0,
        }
    }

    fn commit(&mut self, op: RegisterOp) {
        if op.is_write() {
            self.pending.push_back(op);
        }
    }
}

impl Observable for EdgeCounter {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "value" => Some(self.counter.into()),
            "cfg" => Some(self.cfg.into()),
            "edge_mode" => Some(self.edge_mode().name().into()),
            "pin_mask" => Some(self.pin_mask.into()),
            "display" => Some(self.display().into()),
            "inputs" => Some(self.inputs.into()),
            "composite" => Some(self.composite().into()),
            "sync.stages" => Some(self.sync.stages().to_vec().into()),
            "sync.settled" => Some(self.sync.settled().into()),
            "pending" => Some(Value::U64(self.pending.len() as u64)),
            "ticks" => Some(self.ticks.into()),
            "edges" => Some(self.edges.into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "value",
            "cfg",
            "edge_mode",
            "pin_mask",
            "display",
            "inputs",
            "composite",
            "sync.stages",
            "sync.settled",
            "pending",
            "ticks",
            "edges",
        ]
    }
}
