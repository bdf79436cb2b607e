// Random number generation.
//
// OS entropy through `rand::rng()` for production sampling, and a seeded
// `DebugRng` so tests can replay the same field elements.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::U512;

fn sample_u512<R: Rng + ?Sized>(rng: &mut R) -> U512 {
    U512::from_words(std::array::from_fn(|_| rng.random::<u64>()))
}

/// Get 512 uniformly random bits from OS entropy.
pub fn get_random_u512() -> U512 {
    sample_u512(&mut rand::rng())
}

/// Deterministic RNG for testing, seeded from a u64.
pub struct DebugRng {
    inner: StdRng,
}

impl DebugRng {
    pub fn new(seed: u64) -> Self {
        Self { inner: StdRng::seed_from_u64(seed) }
    }

    pub fn get_random_u64(&mut self) -> u64 {
        self.inner.random()
    }

    pub fn get_random_u512(&mut self) -> U512 {
        sample_u512(&mut self.inner)
    }
}
