//! Two-flop input synchronizer.

use crate::Edge;

/// Two-stage sampler for the composite input, plus the previous settled
/// value used for edge detection.
///
/// A composite change sampled in tick `t` is settled in tick `t + 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Synchronizer {
    /// `stages[0]` was sampled last tick, `stages[1]` the tick before.
    stages: [bool; 2],
    prev_settled: bool,
}

impl Synchronizer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stages: [false; 2],
            prev_settled: false,
        }
    }

    /// Clock one sample in. Returns the transition between the previous
    /// and the current settled value.
    pub fn clock(&mut self, sample: bool) -> Edge {
        let settled = self.stages[1];
        self.stages = [sample, self.stages[0]];
        let edge = Edge::between(self.prev_settled, settled);
        self.prev_settled = settled;
        edge
    }

    /// Load every stage with `level`, discarding transitions in flight.
    pub fn flush(&mut self, level: bool) {
        self.stages = [level; 2];
        self.prev_settled = level;
    }

    #[must_use]
    pub const fn stages(&self) -> [bool; 2] {
        self.stages
    }

    /// Settled value as of the last tick.
    #[must_use]
    pub const fn settled(&self) -> bool {
        self.prev_settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_edge_on_third_tick() {
        let mut sync = Synchronizer::new();
        assert_eq!(sync.clock(true), Edge::None);
        assert_eq!(sync.clock(true), Edge::None);
        assert_eq!(sync.clock(true), Edge::Rising);
        assert_eq!(sync.clock(true), Edge::None);
    }

    #[test]
    fn single_tick_pulse_still_propagates() {
        let mut sync = Synchronizer::new();
        let edges: Vec<Edge> = [true, false, false, false, false]
            .into_iter()
            .map(|s| sync.clock(s))
            .collect();
        assert_eq!(
            edges,
            [Edge::None, Edge::None, Edge::Rising, Edge::Falling, Edge::None]
        );
    }

    #[test]
    fn flush_discards_pending_transition() {
        let mut sync = Synchronizer::new();
        sync.clock(true);
        sync.flush(false);
        for _ in 0..4 {
            assert_eq!(sync.clock(false), Edge::None);
        }
    }

    #[test]
    fn flush_high_suppresses_edge_from_held_input() {
        let mut sync = Synchronizer::new();
        sync.flush(true);
        assert!(sync.settled());
        for _ in 0..4 {
            assert_eq!(sync.clock(true), Edge::None);
        }
        assert_eq!(sync.stages(), [true, true]);
    }
}
