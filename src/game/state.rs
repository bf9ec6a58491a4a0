//! Game State Definitions
//!
//! All state types for session simulation.
//! Live words are kept in a BTreeMap keyed by spawn order, so iteration
//! order is deterministic and removal during a pass is never an
//! index-shifting erase.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::config::SessionParams;
use crate::core::rng::DeterministicRng;
use crate::core::hash::{StateHash, compute_state_hash};
use crate::game::events::GameEvent;
use crate::game::input::InputBuffer;

/// Lives at the start of a session.
pub const STARTING_LIVES: u8 = 5;

/// Rows of the terminal not available as lanes (status bar and spacer).
pub const RESERVED_ROWS: u16 = 2;

// =============================================================================
// WORD ENTITY
// =============================================================================

/// Spawn-order identifier of a word (monotonic counter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WordId(pub u32);

/// A word travelling across a lane.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntity {
    /// Spawn-order id
    pub id: WordId,
    /// Text as it appears in the dictionary
    pub text: String,
    /// Lane (row) index
    pub lane: u16,
    /// Column offset of the first character
    pub position: u16,
}

impl WordEntity {
    /// Create a word at the left edge of a lane.
    pub fn new(id: WordId, text: impl Into<String>, lane: u16) -> Self {
        Self {
            id,
            text: text.into(),
            lane,
            position: 0,
        }
    }

    /// Length in characters.
    #[inline]
    pub fn len(&self) -> u32 {
        self.text.chars().count() as u32
    }

    /// True for an empty word (never produced by a `Dictionary`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Column just past the last character.
    #[inline]
    pub fn end(&self) -> u32 {
        self.position as u32 + self.len()
    }

    /// Whether the word has reached the right edge of the field.
    #[inline]
    pub fn has_exited(&self, width: u16) -> bool {
        self.end() >= width as u32
    }

    /// Case-insensitive exact comparison against typed text.
    #[inline]
    pub fn matches(&self, typed: &str) -> bool {
        self.text.to_uppercase() == typed
    }

    /// Length of the typed prefix this word shares with `typed`.
    ///
    /// Presentation only; gameplay matching is exact.
    pub fn typed_prefix_len(&self, typed: &str) -> usize {
        self.text
            .chars()
            .zip(typed.chars())
            .take_while(|(a, b)| a.to_ascii_uppercase() == *b)
            .count()
    }
}

// =============================================================================
// PLAY FIELD
// =============================================================================

/// Dimensions of the play field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayField {
    width: u16,
    lanes: u16,
}

impl PlayField {
    /// Create a field; width and lane count are raised to at least one.
    pub fn new(width: u16, lanes: u16) -> Self {
        Self {
            width: width.max(1),
            lanes: lanes.max(1),
        }
    }

    /// Field for a terminal of `cols` x `rows`.
    pub fn from_terminal(cols: u16, rows: u16) -> Self {
        Self::new(cols, rows.saturating_sub(RESERVED_ROWS))
    }

    /// Width in columns.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of lanes.
    pub fn lanes(&self) -> u16 {
        self.lanes
    }
}

// =============================================================================
// SESSION PHASE
// =============================================================================

/// Current phase of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum SessionPhase {
    /// Active gameplay
    #[default]
    Playing,
    /// All lives lost
    GameOver,
    /// Player pressed the quit key
    Quit,
}

// =============================================================================
// SESSION STATE
// =============================================================================

/// Complete state of a session.
///
/// Owned by the game loop and passed by `&mut` to each component in turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    /// Normalized session parameters (initial seed, tempo, frequency)
    pub params: SessionParams,

    /// Play field dimensions
    pub field: PlayField,

    /// Deterministic generator (current seed)
    pub rng: DeterministicRng,

    /// Ticks processed so far
    pub tick: u64,

    /// Current phase
    pub phase: SessionPhase,

    /// Remaining lives
    pub lives: u8,

    /// Sum of the lengths of completed words
    pub score: u32,

    /// Number of completed words
    pub words_completed: u32,

    /// Backspaces and clears (counted against accuracy)
    pub wasted_keystrokes: u64,

    /// Live words in spawn order
    pub words: BTreeMap<WordId, WordEntity>,

    /// Next word id (monotonic counter)
    pub next_word_id: u32,

    /// Player's typing buffer
    pub input: InputBuffer,

    /// Wall-clock start of the session
    pub started_at: DateTime<Utc>,

    /// Events generated this iteration (cleared each iteration)
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl SessionState {
    /// Create a fresh session.
    pub fn new(params: SessionParams, field: PlayField, started_at: DateTime<Utc>) -> Self {
        Self {
            params,
            field,
            rng: DeterministicRng::new(params.seed()),
            tick: 0,
            phase: SessionPhase::Playing,
            lives: STARTING_LIVES,
            score: 0,
            words_completed: 0,
            wasted_keystrokes: 0,
            words: BTreeMap::new(),
            next_word_id: 0,
            input: InputBuffer::new(),
            started_at,
            pending_events: Vec::new(),
        }
    }

    /// Initial seed of this session (what "replay" reuses).
    pub fn initial_seed(&self) -> u32 {
        self.params.seed()
    }

    /// Add a word at position 0 of `lane`.
    pub fn spawn_word(&mut self, text: &str, lane: u16) -> WordId {
        let id = WordId(self.next_word_id);
        self.next_word_id += 1;
        self.words.insert(id, WordEntity::new(id, text, lane));
        id
    }

    /// Get a live word by id.
    pub fn get_word(&self, id: &WordId) -> Option<&WordEntity> {
        self.words.get(id)
    }

    /// Live words in spawn order.
    pub fn live_words(&self) -> impl Iterator<Item = &WordEntity> {
        self.words.values()
    }

    /// Remove one life (saturating at zero).
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Whether the session still accepts ticks.
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, SessionPhase::Playing)
    }

    /// Whether the session is over (lives exhausted or quit).
    pub fn is_ended(&self) -> bool {
        !self.is_playing()
    }

    /// Compute hash of current state for determinism checks.
    ///
    /// Wall-clock start time is excluded.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.params.seed(), |hasher| {
            hasher.update_u32(self.params.tempo());
            hasher.update_u32(self.params.frequency());
            hasher.update_u32(self.rng.state());
            hasher.update_u8(self.lives);
            hasher.update_u32(self.score);
            hasher.update_u32(self.words_completed);
            hasher.update_u64(self.wasted_keystrokes);

            for word in self.words.values() {
                hasher.update_u32(word.id.0);
                hasher.update_str(&word.text);
                hasher.update_u16(word.lane);
                hasher.update_u16(word.position);
            }

            hasher.update_str(self.input.as_str());
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn epoch() -> DateTime<Utc> {
        Utc.timestamp_opt(0, 0).unwrap()
    }

    #[test]
    fn test_new_session() {
        let state = SessionState::new(SessionParams::default(), PlayField::new(80, 22), epoch());
        assert_eq!(state.lives, 5);
        assert_eq!(state.score, 0);
        assert_eq!(state.tick, 0);
        assert!(state.words.is_empty());
        assert!(state.input.is_empty());
        assert!(state.is_playing());
        assert_eq!(state.rng.state(), state.initial_seed());
    }

    #[test]
    fn test_spawn_order_iteration() {
        let mut state = SessionState::new(SessionParams::default(), PlayField::new(80, 22), epoch());
        state.spawn_word("DOG", 5);
        state.spawn_word("CAT", 1);
        state.spawn_word("EMU", 3);

        let order: Vec<_> = state.live_words().map(|w| w.text.as_str()).collect();
        assert_eq!(order, vec!["DOG", "CAT", "EMU"]);
    }

    #[test]
    fn test_word_exit_boundary() {
        let mut word = WordEntity::new(WordId(0), "HELLO", 0);
        word.position = 74;
        assert!(!word.has_exited(80));
        word.position = 75;
        assert!(word.has_exited(80));
    }

    #[test]
    fn test_word_matching_ignores_case() {
        let word = WordEntity::new(WordId(0), "cat", 0);
        assert!(word.matches("CAT"));
        assert!(!word.matches("CA"));
        assert_eq!(word.typed_prefix_len("CAX"), 2);
        assert_eq!(word.typed_prefix_len(""), 0);
    }

    #[test]
    fn test_lives_saturate() {
        let mut state = SessionState::new(SessionParams::default(), PlayField::new(80, 22), epoch());
        for _ in 0..10 {
            state.lose_life();
        }
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_play_field_from_terminal() {
        let field = PlayField::from_terminal(80, 24);
        assert_eq!(field.width(), 80);
        assert_eq!(field.lanes(), 22);

        let tiny = PlayField::from_terminal(0, 1);
        assert_eq!(tiny.width(), 1);
        assert_eq!(tiny.lanes(), 1);
    }

    #[test]
    fn test_hash_ignores_wall_clock() {
        let a = SessionState::new(SessionParams::default(), PlayField::new(80, 22), epoch());
        let b = SessionState::new(
            SessionParams::default(),
            PlayField::new(80, 22),
            Utc.timestamp_opt(1_000, 0).unwrap(),
        );
        assert_eq!(a.compute_hash(), b.compute_hash());

        let mut c = a.clone();
        c.spawn_word("CAT", 0);
        assert_ne!(a.compute_hash(), c.compute_hash());
    }
}
