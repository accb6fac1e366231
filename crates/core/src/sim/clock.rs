//! Explicit suspension points on the simulation clock.

use tracing::trace;

/// Source of clock edges the testbench waits on.
pub trait Clock {
    /// Suspends for `cycles` rising edges.
    fn wait_cycles(&mut self, cycles: u64);

    /// Returns the number of edges elapsed so far.
    fn now(&self) -> u64;
}

/// Cycle counter standing in for a simulator clock; waiting returns immediately.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    cycle: u64,
}

impl SimClock {
    /// Creates a clock at cycle zero.
    pub const fn new() -> Self {
        Self { cycle: 0 }
    }
}

impl Clock for SimClock {
    fn wait_cycles(&mut self, cycles: u64) {
        self.cycle = self.cycle.saturating_add(cycles);
        trace!("clock advanced {cycles} cycles to {}", self.cycle);
    }

    fn now(&self) -> u64 {
        self.cycle
    }
}
