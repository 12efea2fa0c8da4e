//! Deterministic random number generation.
//!
//! The battle rules themselves are fully deterministic. Randomness only
//! enters through optional opponent policies, and even there it must be
//! reproducible: the same seed and the same turn always make the same
//! choice, so a battle can be replayed from its event history.
//!
//! ```
//! use ccg_battle::core::GameRng;
//!
//! let targets = [10, 20, 30, 40];
//! let mut a = GameRng::new(7).for_turn(3);
//! let mut b = GameRng::new(7).for_turn(3);
//! assert_eq!(a.choose(&targets), b.choose(&targets));
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Golden-ratio increment used to spread derived seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Independent stream for one turn of a battle.
    ///
    /// Derived from the seed only, never from how much of this stream has
    /// been consumed.
    #[must_use]
    pub fn for_turn(&self, turn: u32) -> Self {
        let turn_seed = self
            .seed
            .wrapping_add(u64::from(turn).wrapping_add(1).wrapping_mul(SEED_STRIDE));
        Self::new(turn_seed)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
