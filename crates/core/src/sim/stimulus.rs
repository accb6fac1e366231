//! Randomized stimulus.
//!
//! A xorshift64 generator picks framing parameters from the encodable domains and a full
//! 32-bit data word per character. Runs are reproducible from the seed.

use crate::codec::{ControlFields, DataWidth, Parity, StopBits};

/// Replacement for a zero seed, which would lock xorshift at zero.
const FALLBACK_SEED: u64 = 123_456_789;

/// Seeded generator of framing parameters and data words.
#[derive(Debug, Clone)]
pub struct Stimulus {
    state: u64,
}

impl Stimulus {
    /// Creates a generator from `seed`.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { FALLBACK_SEED } else { seed },
        }
    }

    /// Returns the next raw 64-bit value.
    pub const fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Returns a random data word; the UART keeps only the configured width of it.
    pub const fn data(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Picks a stop-bit count, an encodable parity mode and a width.
    pub const fn control_fields(&mut self) -> ControlFields {
        let stop = StopBits::ALL[self.index(StopBits::ALL.len())];
        let parity = Parity::ENCODABLE[self.index(Parity::ENCODABLE.len())];
        let width = DataWidth::ALL[self.index(DataWidth::ALL.len())];
        ControlFields::new(stop, parity, width)
    }

    const fn index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }
}
