//! Clocked harness around the edge counter peripheral.
//!
//! One peripheral clock drives everything. Register operations travel over
//! the bit-banged SPI transport: the driver changes one wire per step and
//! lets the clock run for the inter-bit delay between steps, the responder
//! samples the wires on every tick, and the peripheral sees a write only
//! once chip-select has risen on a well-formed frame.
//!
//! At the default 10 MHz clock and 10-tick inter-bit delay one register
//! access takes 350 ticks (35 µs).

mod config;
mod error;
pub mod mcp;
mod system;

pub use config::HarnessConfig;
pub use error::HarnessError;
pub use sim_core::RegisterPort;
pub use system::CounterSystem;
