//! Deterministic Random Number Generator
//!
//! A 32-bit linear congruential generator. Every random decision in a
//! session (word choice, lane preference, lane index) is drawn from one
//! generator, so a session is fully reproducible from its seed.

use serde::{Serialize, Deserialize};

/// LCG multiplier.
pub const LCG_MULTIPLIER: u32 = 1_103_515_245;

/// LCG increment.
pub const LCG_INCREMENT: u32 = 12_345;

/// Deterministic PRNG: `seed = seed * 1103515245 + 12345 (mod 2^32)`.
///
/// The whole state is the current seed. Each draw overwrites it and
/// returns the new value.
///
/// # Example
///
/// ```
/// use typeracer::core::rng::DeterministicRng;
///
/// let mut rng = DeterministicRng::new(1);
/// assert_eq!(rng.next_u32(), 1_103_527_590);
/// assert_eq!(rng.next_bounded(22), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    seed: u32,
}

impl DeterministicRng {
    /// Create a generator from a seed.
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Advance the generator and return the new seed.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.seed = self
            .seed
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.seed
    }

    /// Draw a value in `[0, n)`.
    ///
    /// Plain modulo, no rejection sampling: the bias is part of the
    /// reproducible stream. `n` must be non-zero; callers skip the draw
    /// when there is nothing to choose from.
    #[inline]
    pub fn next_bounded(&mut self, n: u32) -> u32 {
        debug_assert!(n > 0, "next_bounded called with n == 0");
        self.next_u32() % n
    }

    /// Select an element of a slice, or `None` without drawing if empty.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            let idx = self.next_bounded(slice.len() as u32) as usize;
            slice.get(idx)
        }
    }

    /// Current seed (for checkpointing and hashing).
    pub fn state(&self) -> u32 {
        self.seed
    }

    /// Restore a saved seed.
    pub fn set_state(&mut self, seed: u32) {
        self.seed = seed;
    }
}

// =============================================================================
// TESTS
// =============================================================================
