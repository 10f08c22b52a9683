//! The complete simulated system: driver, wires, responder, peripheral.

use edge_counter::EdgeCounter;
use sim_core::{Observable, RegisterFile, RegisterOp, RegisterPort, Tickable, Ticks, Value};
use spi_register_transport::{Frame, FramingError, SpiMaster, SpiPins, SpiResponder, Step};

use crate::{HarnessConfig, HarnessError};

/// Edge counter wired to the SPI transport under one clock.
pub struct CounterSystem {
    config: HarnessConfig,
    bus: SpiPins,
    master: SpiMaster,
    responder: SpiResponder,
    counter: EdgeCounter,
    /// Most recent responder outcome, kept for inspection.
    last_frame: Option<Result<RegisterOp, FramingError>>,
    /// Peripheral clock ticks since construction.
    cycle: u64,
}

impl CounterSystem {
    /// Create a system in its power-on state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        let counter = EdgeCounter::with_input_width(config.input_width)?;
        Ok(Self {
            config,
            bus: SpiPins::IDLE,
            master: SpiMaster::new(),
            responder: SpiResponder::new(),
            counter,
            last_frame: None,
            cycle: 0,
        })
    }

    /// Power-on reset of every component. The cycle count keeps running.
    pub fn reset(&mut self) {
        self.bus = SpiPins::IDLE;
        self.master = SpiMaster::new();
        self.responder.reset();
        self.counter.reset();
        self.last_frame = None;
        if self.config.trace_bus {
            eprintln!("[BUS] cycle {}: reset", self.cycle);
        }
    }

    /// Drive the raw input pins. Held until changed.
    pub fn set_inputs(&mut self, value: u8) {
        self.counter.inputs = value;
    }

    #[must_use]
    pub fn inputs(&self) -> u8 {
        self.counter.inputs
    }

    /// Let the peripheral clock run for `count` ticks.
    pub fn clock_cycles(&mut self, count: u64) {
        self.tick_n(Ticks::new(count));
    }

    /// Seven-segment output.
    #[must_use]
    pub fn display(&self) -> u8 {
        self.counter.display()
    }

    #[must_use]
    pub fn counter(&self) -> &EdgeCounter {
        &self.counter
    }

    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Current state of the four transport wires.
    #[must_use]
    pub fn bus(&self) -> SpiPins {
        self.bus
    }

    /// Override the driver-owned wires directly. Data-in stays with the
    /// responder.
    pub fn drive_bus(&mut self, pins: SpiPins) {
        self.bus = SpiPins {
            data_in: self.bus.data_in,
            ..pins
        };
    }

    /// Outcome of the most recent chip-select release.
    #[must_use]
    pub fn last_frame(&self) -> Option<&Result<RegisterOp, FramingError>> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn elapsed(&self) -> Ticks {
        Ticks::new(self.cycle)
    }

    #[must_use]
    pub fn elapsed_ns(&self) -> u64 {
        self.config.clock.elapsed_ns(self.elapsed())
    }

    /// Clock one frame through the driver, blocking until chip-select is
    /// released. Returns the sampled byte for reads.
    fn transact(&mut self, frame: Frame) -> Result<Option<u8>, HarnessError> {
        self.master.begin(frame)?;
        self.last_frame = None;
        loop {
            let step = self.master.step(&mut self.bus);
            if self.config.trace_bus {
                eprintln!(
                    "[BUS] cycle {}: {:<8} cs={} sclk={} mosi={} miso={}",
                    self.cycle,
                    self.master.phase().name(),
                    u8::from(self.bus.chip_select),
                    u8::from(self.bus.clock),
                    u8::from(self.bus.data_out),
                    u8::from(self.bus.data_in),
                );
            }
            self.clock_cycles(self.config.inter_bit_delay.get());
            match step {
                Step::Busy => {}
                Step::Idle => return Err(FramingError::NotCommitted.into()),
                Step::Complete(read) => {
                    return match self.last_frame {
                        Some(Ok(decoded)) if frame.decoded_as(&decoded) => Ok(read),
                        Some(Ok(decoded)) => Err(FramingError::Mismatch {
                            sent: frame.into_op(),
                            decoded,
                        }
                        .into()),
                        Some(Err(e)) => Err(e.into()),
                        None => Err(FramingError::NotCommitted.into()),
                    };
                }
            }
        }
    }
}

impl Tickable for CounterSystem {
    fn tick(&mut self) {
        self.cycle += 1;
        if let Some(outcome) = self.responder.clock(&mut self.bus, &self.counter) {
            if let Ok(op) = outcome {
                self.counter.commit(op);
            }
            self.last_frame = Some(outcome);
        }
        self.counter.tick();
    }
}

impl RegisterPort for CounterSystem {
    type Error = HarnessError;

    fn write_reg(&mut self, address: u8, data: u8) -> Result<(), HarnessError> {
        self.transact(Frame::write(address, data)?).map(|_| ())
    }

    fn read_reg(&mut self, address: u8) -> Result<u8, HarnessError> {
        self.transact(Frame::read(address)?)
            .map(Option::unwrap_or_default)
    }
}

impl Observable for CounterSystem {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("counter.") {
            self.counter.query(rest)
        } else if let Some(rest) = path.strip_prefix("responder.") {
            self.responder.query(rest)
        } else {
            match path {
                "cycle" => Some(self.cycle.into()),
                "time_ns" => Some(self.elapsed_ns().into()),
                "bus.cs" => Some(self.bus.chip_select.into()),
                "bus.sclk" => Some(self.bus.clock.into()),
                "bus.mosi" => Some(self.bus.data_out.into()),
                "bus.miso" => Some(self.bus.data_in.into()),
                "spi.phase" => Some(self.master.phase().name().into()),
                "spi.bits_remaining" => Some(self.master.bits_remaining().into()),
                "display" => Some(self.display().into()),
                _ => None,
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "cycle",
            "time_ns",
            "bus.cs",
            "bus.sclk",
            "bus.mosi",
            "bus.miso",
            "spi.phase",
            "spi.bits_remaining",
            "display",
            "responder.in_frame",
            "responder.bits",
            "responder.shift",
            "counter.value",
            "counter.cfg",
            "counter.edge_mode",
            "counter.pin_mask",
            "counter.display",
            "counter.inputs",
            "counter.composite",
            "counter.sync.stages",
            "counter.sync.settled",
            "counter.pending",
            "counter.ticks",
            "counter.edges",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> CounterSystem {
        CounterSystem::new(HarnessConfig::default()).expect("default config")
    }

    #[test]
    fn frame_takes_350_ticks() {
        let mut sys = system();
        let start = sys.elapsed();
        sys.write_reg(0x01, 0).expect("write");
        assert_eq!((sys.elapsed() - start).get(), 350);
        assert_eq!(sys.elapsed_ns(), 35_000);
    }

    #[test]
    fn bus_returns_to_idle() {
        let mut sys = system();
        sys.write_reg(0x01, 0).expect("write");
        assert_eq!(sys.bus().chip_select, SpiPins::IDLE.chip_select);
        assert!(!sys.bus().clock);
        assert_eq!(sys.query("spi.phase"), Some(Value::from("IDLE")));
        assert_eq!(sys.query("responder.in_frame"), Some(Value::Bool(false)));
    }

    #[test]
    fn last_frame_records_write() {
        let mut sys = system();
        sys.write_reg(0x04, 0x06).expect("write");
        assert_eq!(sys.last_frame(), Some(&Ok(RegisterOp::write(0x04, 0x06))));
    }

    #[test]
    fn query_paths_resolve() {
        let sys = system();
        for path in sys.query_paths() {
            assert!(sys.query(path).is_some(), "path {path}");
        }
    }

    #[test]
    fn reset_restores_power_on_registers() {
        let mut sys = system();
        sys.write_reg(0x03, 1).expect("write");
        sys.write_reg(0x01, 0).expect("write");
        sys.reset();
        assert_eq!(sys.counter().value(), 0);
        assert_eq!(sys.read_reg(0x03).expect("read"), 0);
        assert_eq!(sys.read_reg(0x04).expect("read"), 0x01);
    }
}
