//! Deterministic Auto-Typist
//!
//! A scripted player for headless simulation. It reads the same state a
//! human sees, types the most urgent word one key at a time and makes
//! mistakes at a fixed rate. Its own generator is separate from the
//! session's, so the session stream is untouched.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::SessionParams;
use crate::core::rng::DeterministicRng;
use crate::dictionary::Dictionary;
use crate::game::input::{is_typeable, Keystroke, KeystrokeScript, INPUT_CAPACITY};
use crate::game::state::{PlayField, SessionState, WordEntity};
use crate::game::tick::tick;

/// Auto-typist tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypistConfig {
    /// Ticks between keystrokes
    pub key_interval: u64,
    /// Chance of a wrong key, in percent
    pub error_percent: u32,
    /// Seed of the typist's own generator
    pub seed: u32,
}

impl Default for TypistConfig {
    fn default() -> Self {
        Self {
            key_interval: 40,
            error_percent: 5,
            seed: 0x5eed,
        }
    }
}

/// Scripted player.
#[derive(Debug, Clone)]
pub struct Typist {
    config: TypistConfig,
    rng: DeterministicRng,
    pending_backspace: bool,
}

impl Typist {
    /// Create a typist.
    pub fn new(config: TypistConfig) -> Self {
        Self {
            rng: DeterministicRng::new(config.seed),
            config,
            pending_backspace: false,
        }
    }

    /// Keystroke for the current tick, if the typist acts on it.
    pub fn next_key(&mut self, state: &SessionState) -> Option<Keystroke> {
        if state.tick % self.config.key_interval.max(1) != 0 {
            return None;
        }

        if self.pending_backspace {
            self.pending_backspace = false;
            return Some(Keystroke::Backspace);
        }

        let typed = state.input.as_str();
        let typed_len = state.input.len();

        let Some(target) = pick_target(state, typed, typed_len) else {
            return (!state.input.is_empty()).then_some(Keystroke::Clear);
        };

        let next = target.text.chars().nth(typed_len)?;

        if self.config.error_percent > 0 && self.rng.next_bounded(100) < self.config.error_percent {
            self.pending_backspace = true;
            let wrong = if next.eq_ignore_ascii_case(&'q') { 'Z' } else { 'Q' };
            return Some(Keystroke::Char(wrong));
        }

        Some(Keystroke::Char(next))
    }
}

/// Most urgent word the typist can still finish from the current buffer.
fn pick_target<'a>(state: &'a SessionState, typed: &str, typed_len: usize) -> Option<&'a WordEntity> {
    state
        .live_words()
        .filter(|word| is_typeable_word(word))
        .filter(|word| word.typed_prefix_len(typed) == typed_len && word.len() as usize > typed_len)
        .max_by_key(|word| (word.end(), std::cmp::Reverse(word.id)))
}

fn is_typeable_word(word: &WordEntity) -> bool {
    !word.is_empty()
        && word.len() as usize <= INPUT_CAPACITY
        && word.text.chars().all(is_typeable)
}

/// Play a whole session with the typist, recording its keystrokes.
///
/// Stops when the session ends or after `max_ticks` iterations.
pub fn play_session(
    params: SessionParams,
    field: PlayField,
    dictionary: &Dictionary,
    config: TypistConfig,
    max_ticks: u64,
    started_at: DateTime<Utc>,
) -> (SessionState, KeystrokeScript) {
    let mut state = SessionState::new(params, field, started_at);
    let mut typist = Typist::new(config);
    let mut script = KeystrokeScript::new();

    while state.tick < max_ticks {
        let key = typist.next_key(&state);
        if let Some(key) = key {
            script.record(state.tick, key);
        }

        let result = tick(&mut state, dictionary, key);
        if result.session_ended {
            break;
        }
    }

    debug!(
        "Typist finished at tick {} with {} keystrokes",
        state.tick,
        script.len()
    );
    (state, script)
}
