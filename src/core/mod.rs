//! Core deterministic primitives.
//!
//! Everything a session's reproducibility depends on lives here.

pub mod rng;
pub mod hash;

// Re-export core types
pub use rng::DeterministicRng;
pub use hash::{compute_state_hash, StateHash, StateHasher};
