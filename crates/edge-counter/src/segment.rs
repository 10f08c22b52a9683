//! Seven-segment encoder for the counter's low nibble.
//!
//! Bit layout is `0gfedcba`: bit 0 drives segment a (top), bit 6 segment g
//! (middle). Bit 7 is never set. Nibbles 10-15 have no decimal digit and
//! render blank.

/// Segment patterns for decimal digits 0-9.
const DIGITS: [u8; 10] = [
    0b0011_1111, // 0
    0b0000_0110, // 1
    0b0101_1011, // 2
    0b0100_1111, // 3
    0b0110_0110, // 4
    0b0110_1101, // 5
    0b0111_1101, // 6
    0b0000_0111, // 7
    0b0111_1111, // 8
    0b0110_1111, // 9
];

/// All segments off.
pub const BLANK: u8 = 0;

/// Segment pattern for the low nibble of `value`.
#[must_use]
pub fn encode(value: u8) -> u8 {
    DIGITS
        .get(usize::from(value & 0x0F))
        .copied()
        .unwrap_or(BLANK)
}
