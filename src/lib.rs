//! # TypeRacer
//!
//! Terminal typing game with a deterministic core: words appear in lanes
//! and drift to the right; type one before it leaves the screen.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         TYPERACER                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                 │
//! │  ├── rng.rs      - Linear congruential generator            │
//! │  └── hash.rs     - State hashing for replay verification    │
//! │                                                             │
//! │  game/           - Game logic (deterministic)               │
//! │  ├── state.rs    - Session state, live words, play field    │
//! │  ├── lanes.rs    - Lane scheduler                           │
//! │  ├── words.rs    - Word movement and expiry                 │
//! │  ├── input.rs    - Keystrokes, typing buffer, scripts       │
//! │  ├── typing.rs   - Matching and scoring                     │
//! │  ├── tick.rs     - Loop iteration and replay                │
//! │  ├── stats.rs    - CPS / WPM / accuracy                     │
//! │  └── events.rs   - Events for presentation                  │
//! │                                                             │
//! │  config.rs       - Settings and normalization               │
//! │  dictionary.rs   - Word lists and discovery                 │
//! │  bot.rs          - Scripted typist for headless runs        │
//! │                                                             │
//! │  terminal/       - Presentation (non-deterministic)         │
//! │  ├── keys.rs     - Key mapping                              │
//! │  ├── menu.rs     - Settings menu                            │
//! │  ├── render.rs   - Play screen and status bar               │
//! │  ├── play.rs     - Interactive loop                         │
//! │  └── summary.rs  - Game-over screen                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are deterministic:
//! - No HashMap (uses BTreeMap for spawn-order iteration)
//! - Wall-clock time only feeds statistics, never the simulation
//! - All randomness from the seeded generator, one draw order
//!
//! Given the same seed, dictionary, play field and keystroke script, a
//! session produces identical states tick for tick.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod bot;
pub mod config;
pub mod core;
pub mod dictionary;
pub mod game;
pub mod terminal;

// Re-export commonly used types
pub use config::{GameSettings, SessionParams};
pub use core::rng::DeterministicRng;
pub use dictionary::Dictionary;
pub use game::input::{InputBuffer, Keystroke, KeystrokeScript};
pub use game::state::{PlayField, SessionPhase, SessionState, WordEntity, WordId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wall-clock length of one loop iteration (milliseconds)
pub const TICK_INTERVAL_MS: u64 = 5;
