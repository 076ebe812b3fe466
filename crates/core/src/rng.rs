//! RNG module - deterministic randomness for tile spawning
//!
//! Spawning needs two draws per tile: a uniform pick among the empty cells and
//! a weighted pick of the tile value. A seeded LCG keeps whole games
//! reproducible from a single `u32`, which the tests and the benchmark rely on.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max).
    ///
    /// Uses the high bits; the low bits of an LCG with a power-of-two modulus
    /// cycle with very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max <= 1 {
            self.next_u32();
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Returns true with probability `numerator / denominator`.
    pub fn chance(&mut self, numerator: u32, denominator: u32) -> bool {
        if denominator == 0 {
            return false;
        }
        self.next_range(denominator) < numerator
    }

    /// Current internal state (can seed an identical generator).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
