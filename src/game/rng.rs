//! Seedable random source used for mine placement.
//!
//! `XorShiftRng` is value-stable, so a seed reproduces the same layout on
//! every platform and across `rand_xorshift` patch releases. Ranges are
//! mapped with a plain modulo, which is biased by at most `n / 2^32`.

use rand::{RngCore, SeedableRng};
use rand_xorshift::XorShiftRng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Random source for one board.
#[derive(Debug, Clone)]
pub struct MineRng(XorShiftRng);
impl MineRng {
    /// Returns a generator seeded from `seed`.
    pub fn new(seed: u64) -> Self {
        Self(XorShiftRng::seed_from_u64(seed))
    }

    /// Returns a value in `0..n`.
    ///
    /// # Panics
    ///
    /// This function panics if `n` is zero.
    pub fn below(&mut self, n: u32) -> u32 {
        assert!(n > 0, "empty range");
        self.0.next_u32() % n
    }
}

/// Returns a seed derived from the wall clock.
pub fn time_seed() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.as_nanos() as u64 ^ now.as_secs().rotate_left(32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_deterministic() {
        let mut a = MineRng::new(42);
        let mut b = MineRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.below(1000), b.below(1000));
        }
    }

    #[test]
    fn test_known_sequence() {
        // Layouts must stay reproducible, so the engine and the range
        // mapping are pinned.
        let mut rng = MineRng::new(0);
        let mut reference = XorShiftRng::seed_from_u64(0);
        for n in 1..50 {
            assert_eq!(rng.below(n), reference.next_u32() % n);
        }
    }

    #[test]
    fn test_below_bounds() {
        let mut rng = MineRng::new(123);
        for _ in 0..1000 {
            assert!(rng.below(10) < 10);
        }
        assert_eq!(rng.below(1), 0);
    }
}
