//! Edge-triggered event counter peripheral.
//!
//! Counts transitions on the logical OR of a selectable subset of input
//! pins, after a 2-flop input synchronizer. The low nibble of the counter
//! drives a seven-segment display output.
//!
//! # Registers ($0-$4)
//!
//! | Reg | Name  | Write                                   | Read              |
//! |-----|-------|-----------------------------------------|-------------------|
//! | $0  | RESET | Counter := 0, synchronizer flushed      | 0                 |
//! | $1  | INC   | Counter += 1                            | 0                 |
//! | $2  | VALUE | Ignored                                 | Counter           |
//! | $3  | CFG   | Edge mode := value & 3                  | Edge mode         |
//! | $4  | PINS  | Pin mask := value                       | Pin mask          |
//!
//! Addresses $5-$F are unmapped: writes are dropped, reads return 0.
//!
//! # Tick order
//!
//! 1. OR the masked input pins into one composite signal.
//! 2. Shift it through the synchronizer.
//! 3. Compare the settled value with the previous settled value.
//! 4. Count the edge if it matches the edge mode.
//! 5. Apply register writes committed since the last tick.
//! 6. The display follows the new counter value.
//!
//! An input change made before tick `t` is counted by tick `t + 2`: three
//! ticks from the pin to the VALUE register.

mod counter;
mod edge;
mod registers;
pub mod segment;
mod sync;

pub use counter::{DEFAULT_PIN_MASK, EdgeCounter};
pub use edge::{ConfigError, Edge, EdgeMode};
pub use registers::Register;
pub use sync::Synchronizer;
