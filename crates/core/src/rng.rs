//! RNG module - deterministic shape selection
//!
//! Shapes are drawn independently and uniformly from the seven templates (no bag,
//! no anti-repetition). A small seeded LCG keeps games reproducible, which the
//! tests and benchmarks rely on.

use crate::types::ShapeKind;

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        assert!(max > 0, "next_range needs a non-empty range");
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Draw one of the seven shapes uniformly
    pub fn next_shape(&mut self) -> ShapeKind {
        let idx = self.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[idx]
    }
}
