//! RNG module - piece selection randomness
//!
//! The session only ever asks for "an integer below `bound`", so the random
//! source is a one-method trait. A small deterministic LCG implements it for
//! reproducible games and tests.

/// Pseudo-random source used for piece selection
pub trait RandomSource {
    /// Next value in `[0, bound)`. `bound` must be nonzero.
    fn next(&mut self, bound: u32) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    seed: u32,
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let seed = if seed == 0 { 1 } else { seed };
        Self { seed, state: seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        // High bits of an LCG are the better-distributed ones
        (self.next_u32() >> 16) % bound.max(1)
    }
}

/// Replays a fixed list of values, wrapping around (for tests and demos)
#[derive(Debug, Clone)]
pub struct ScriptedRng<const N: usize> {
    values: [u32; N],
    index: usize,
}

impl<const N: usize> ScriptedRng<N> {
    pub fn new(values: [u32; N]) -> Self {
        Self { values, index: 0 }
    }
}

impl<const N: usize> RandomSource for ScriptedRng<N> {
    fn next(&mut self, bound: u32) -> u32 {
        if N == 0 {
            return 0;
        }
        let value = self.values[self.index % N];
        self.index = self.index.wrapping_add(1);
        value % bound.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut a = SimpleRng::new(12345);
        let mut b = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.seed(), 1);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_stays_in_bound_and_covers_it() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 4];
        for _ in 0..1000 {
            let v = rng.next(4);
            assert!(v < 4);
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_scripted_rng_wraps() {
        let mut rng = ScriptedRng::new([3, 1]);
        assert_eq!(rng.next(4), 3);
        assert_eq!(rng.next(4), 1);
        assert_eq!(rng.next(4), 3);
        assert_eq!(rng.next(2), 1);
    }
}
