//! Edge modes and transition classification.

use thiserror::Error;

/// Invalid peripheral configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("edge mode code {0} is reserved")]
    ReservedEdgeMode(u8),
    #[error("input width {0} is outside 1..=8")]
    InputWidth(u8),
}

/// Transition seen on the settled composite signal in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    None,
    Rising,
    Falling,
}

impl Edge {
    #[must_use]
    pub const fn between(prev: bool, now: bool) -> Self {
        match (prev, now) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            _ => Edge::None,
        }
    }
}

/// Which transition increments the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeMode {
    #[default]
    None = 0,
    Rising = 1,
    Falling = 2,
}

impl EdgeMode {
    /// Decode the 2-bit CFG field. Never fails: the reserved code 3 has
    /// bit 1 set and counts falling edges.
    #[must_use]
    pub const fn from_register(code: u8) -> Self {
        match code & 0b11 {
            0 => EdgeMode::None,
            1 => EdgeMode::Rising,
            _ => EdgeMode::Falling,
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn counts(self, edge: Edge) -> bool {
        matches!(
            (self, edge),
            (EdgeMode::Rising, Edge::Rising) | (EdgeMode::Falling, Edge::Falling)
        )
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EdgeMode::None => "NONE",
            EdgeMode::Rising => "RISING",
            EdgeMode::Falling => "FALLING",
        }
    }
}

impl TryFrom<u8> for EdgeMode {
    type Error = ConfigError;

    /// Strict decode for typed configuration paths.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(EdgeMode::None),
            1 => Ok(EdgeMode::Rising),
            2 => Ok(EdgeMode::Falling),
            other => Err(ConfigError::ReservedEdgeMode(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_classification() {
        assert_eq!(Edge::between(false, true), Edge::Rising);
        assert_eq!(Edge::between(true, false), Edge::Falling);
        assert_eq!(Edge::between(true, true), Edge::None);
        assert_eq!(Edge::between(false, false), Edge::None);
    }

    #[test]
    fn register_decode_is_total() {
        assert_eq!(EdgeMode::from_register(0), EdgeMode::None);
        assert_eq!(EdgeMode::from_register(1), EdgeMode::Rising);
        assert_eq!(EdgeMode::from_register(2), EdgeMode::Falling);
        assert_eq!(EdgeMode::from_register(3), EdgeMode::Falling);
        // Upper bits are not part of the field.
        assert_eq!(EdgeMode::from_register(0xFD), EdgeMode::Rising);
    }

    #[test]
    fn strict_decode_rejects_reserved() {
        assert_eq!(EdgeMode::try_from(2), Ok(EdgeMode::Falling));
        assert_eq!(EdgeMode::try_from(3), Err(ConfigError::ReservedEdgeMode(3)));
    }

    #[test]
    fn none_counts_nothing() {
        for edge in [Edge::None, Edge::Rising, Edge::Falling] {
            assert!(!EdgeMode::None.counts(edge));
        }
        assert!(EdgeMode::Rising.counts(Edge::Rising));
        assert!(!EdgeMode::Rising.counts(Edge::Falling));
        assert!(EdgeMode::Falling.counts(Edge::Falling));
        assert!(!EdgeMode::Falling.counts(Edge::Rising));
    }
}
