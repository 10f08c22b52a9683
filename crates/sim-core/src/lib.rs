//! Core traits and types for cycle-accurate peripheral simulation.
//!
//! One synchronous clock domain drives everything. The peripheral advances
//! once per tick; a bit-serial driver straddles many ticks per register
//! operation but only ever hands over complete, committed operations.

mod clock;
mod observable;
mod port;
mod tickable;
mod ticks;

pub use clock::MasterClock;
pub use observable::{Observable, Value};
pub use port::{Access, RegisterFile, RegisterOp, RegisterPort};
pub use tickable::Tickable;
pub use ticks::Ticks;
