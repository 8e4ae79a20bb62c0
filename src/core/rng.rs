//! Seeded random number generation.
//!
//! Every game session owns exactly one `GameRng`, held by its spawner.
//! Marker colors and spawn cells are both drawn from it, so a fixed seed
//! replays an identical game.
//!
//! ```
//! use rust_lines::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.gen_range_usize(0..81), b.gen_range_usize(0..81));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform draw from `range`.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Uniform pick from a slice; `None` when it is empty.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(a.gen_range_usize(0..81), b.gen_range_usize(0..81));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = GameRng::new(1);
        let mut b = GameRng::new(2);

        let first: Vec<_> = (0..10).map(|_| a.gen_range_usize(0..1000)).collect();
        let second: Vec<_> = (0..10).map(|_| b.gen_range_usize(0..1000)).collect();

        assert_ne!(first, second);
    }

    #[test]
    fn test_choose_stays_in_slice() {
        let mut rng = GameRng::new(42);
        let cells = [3usize, 17, 40, 80];

        for _ in 0..20 {
            assert!(cells.contains(rng.choose(&cells).unwrap()));
        }

        let empty: [usize; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_clone_continues_identically() {
        let mut rng = GameRng::new(9);
        rng.gen_range_usize(0..81);
        let mut copy = rng.clone();

        let a: Vec<_> = (0..10).map(|_| rng.gen_range_usize(0..81)).collect();
        let b: Vec<_> = (0..10).map(|_| copy.gen_range_usize(0..81)).collect();
        assert_eq!(a, b);
    }
}
