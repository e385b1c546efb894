//! Seeded randomness for damage rolls, enemy decisions and shouts.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform value in `0..=max`. Non-positive `max` always rolls 0.
    pub fn roll(&mut self, max: i32) -> i32 {
        if max <= 0 {
            return 0;
        }
        let span = u64::from(max.unsigned_abs()) + 1;
        (self.rng.next_u64() % span) as i32
    }

    pub fn coin_flip(&mut self) -> bool {
        self.rng.next_u64() & 1 == 1
    }

    pub fn pick<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T> {
        if options.is_empty() {
            return None;
        }
        let index = (self.rng.next_u64() % options.len() as u64) as usize;
        options.get(index)
    }
}
