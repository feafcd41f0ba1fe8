//! Seeded randomness for the generators that need it.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// `StdRng` paired with the seed it was built from.
///
/// Generators take one of these by `&mut` instead of reaching for a global
/// generator, so a seed fully determines their output.
#[derive(Debug, Clone)]
pub struct RngHandle {
    seed: u64,
    rng: StdRng,
}

impl RngHandle {
    /// Handle positioned at the start of the stream for `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed the handle was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewinds to the start of the stream.
    pub fn rewind(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
