//! Random source for piece and color selection
//!
//! The game only ever asks for "a number below n", so that is the whole
//! interface. Seeded runs use ChaCha8 so a seed replays the same game on
//! every platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniformly distributed indices
pub trait RandomSource {
    /// Next value in `0..upper`. `upper` is always non-zero.
    fn next_in_range(&mut self, upper: usize) -> usize;
}

/// ChaCha8-backed random source
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
/// Values are reduced modulo the requested range.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<usize>,
    next: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(values: Vec<usize>) -> Self {
        assert!(!values.is_empty(), "script needs at least one value");
        Self { values, next: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_in_range(&mut self, upper: usize) -> usize {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value % upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_stays_in_range() {
        let mut source = SeededRandom::with_seed(7);
        for upper in 1..20 {
            for _ in 0..50 {
                assert!(source.next_in_range(upper) < upper);
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRandom::with_seed(1234);
        let mut b = SeededRandom::with_seed(1234);
        let xs: Vec<usize> = (0..32).map(|_| a.next_in_range(7)).collect();
        let ys: Vec<usize> = (0..32).map(|_| b.next_in_range(7)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_seeded_hits_every_shape() {
        let mut source = SeededRandom::with_seed(99);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[source.next_in_range(7)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_scripted_cycles() {
        let mut source = ScriptedRandom::new(vec![3, 9]);
        assert_eq!(source.next_in_range(7), 3);
        assert_eq!(source.next_in_range(7), 2);
        assert_eq!(source.next_in_range(7), 3);
    }
}
