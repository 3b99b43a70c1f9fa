//! RNG module - random source seam for the simulation
//!
//! Every random decision (next shape, next category, spawn rotation, spawn
//! column, particle velocity and size) is drawn through [`RandomSource`].
//! [`SimpleRng`] is a deterministic LCG so the same seed replays the same game.

/// Source of uniform random integers consumed by the simulation.
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max)
    ///
    /// Returns 0 when `max` is 0.
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }
}

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

    /// Current internal state (a valid seed for replaying from here).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Lets tests pin exact spawn shapes, categories, rotations and columns.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
