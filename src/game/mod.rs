//! Game Logic Module
//!
//! All session simulation code. Deterministic given a seed, a dictionary
//! and a keystroke sequence; wall-clock time only feeds statistics.
//!
//! ## Module Structure
//!
//! - `state`: Session state, live words, play field
//! - `lanes`: Lane scheduler (where and whether words spawn)
//! - `words`: Word movement and expiry
//! - `input`: Keystrokes, typing buffer, recorded scripts
//! - `typing`: Typing engine (matching and scoring)
//! - `tick`: Authoritative loop iteration and replay
//! - `stats`: Derived session statistics
//! - `events`: Game events for presentation and replay comparison

pub mod state;
pub mod lanes;
pub mod words;
pub mod input;
pub mod typing;
pub mod tick;
pub mod stats;
pub mod events;

// Re-export key types
pub use input::{InputBuffer, Keystroke, KeystrokeScript, INPUT_CAPACITY};
pub use lanes::{LaneCensus, LaneOccupancy};
pub use state::{SessionState, SessionPhase, WordEntity, WordId, PlayField};
pub use stats::{SessionStats, SessionSummary};
pub use tick::{tick, replay_session, TickAction, TickResult};
pub use events::{GameEvent, GameEventData};
