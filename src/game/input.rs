//! Input Capture and Buffering
//!
//! Keystrokes as the simulation sees them, the bounded typing buffer,
//! and recorded keystroke scripts for replay.

use serde::{Serialize, Deserialize};

/// Maximum number of characters the typing buffer holds.
pub const INPUT_CAPACITY: usize = 19;

// =============================================================================
// KEYSTROKES
// =============================================================================

/// A single keystroke consumed by the typing engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keystroke {
    /// Letter, digit, apostrophe or hyphen
    Char(char),
    /// Remove the last typed character
    Backspace,
    /// Discard the whole buffer
    Clear,
    /// Leave the session
    Quit,
}

impl Keystroke {
    /// Map a typed character, or `None` if the game ignores it.
    ///
    /// Accepts ASCII letters and digits, `'` and `-`.
    pub fn from_char(c: char) -> Option<Self> {
        if is_typeable(c) {
            Some(Keystroke::Char(c))
        } else {
            None
        }
    }
}

/// Whether a character can be typed into the buffer.
#[inline]
pub fn is_typeable(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '\'' || c == '-'
}

// =============================================================================
// INPUT BUFFER
// =============================================================================

/// Bounded typing buffer.
///
/// Holds at most `INPUT_CAPACITY` uppercase characters; pushes beyond
/// that are rejected rather than growing the buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            text: String::with_capacity(INPUT_CAPACITY),
        }
    }

    /// Append a character (uppercased). Returns false when full.
    pub fn push(&mut self, c: char) -> bool {
        if self.is_full() {
            return false;
        }
        self.text.push(c.to_ascii_uppercase());
        true
    }

    /// Remove the last character, if any.
    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    /// Empty the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether another character would be rejected.
    pub fn is_full(&self) -> bool {
        self.len() >= INPUT_CAPACITY
    }

    /// Current contents.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

// =============================================================================
// KEYSTROKE SCRIPT
// =============================================================================

/// A keystroke tagged with the tick it was read on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedKeystroke {
    /// Tick of the loop iteration that consumed the key
    pub tick: u64,
    /// The key
    pub key: Keystroke,
}

/// Keystrokes of one session, at most one per tick, in tick order.
///
/// Sparse: ticks without a key are not stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystrokeScript {
    entries: Vec<TimedKeystroke>,
}

impl KeystrokeScript {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keystroke for a tick.
    ///
    /// Ticks must be recorded in increasing order; a second key for the
    /// same or an earlier tick is dropped and `false` returned.
    pub fn record(&mut self, tick: u64, key: Keystroke) -> bool {
        if self.entries.last().is_some_and(|last| last.tick >= tick) {
            return false;
        }
        self.entries.push(TimedKeystroke { tick, key });
        true
    }

    /// Keystroke for a tick, if one was recorded.
    ///
    /// Uses binary search.
    pub fn key_at(&self, tick: u64) -> Option<Keystroke> {
        self.entries
            .binary_search_by_key(&tick, |entry| entry.tick)
            .ok()
            .map(|idx| self.entries[idx].key)
    }

    /// Build a script typing `text` starting at `start_tick`, one key
    /// every `spacing` ticks. Returns the tick after the last key.
    pub fn type_text(&mut self, text: &str, start_tick: u64, spacing: u64) -> u64 {
        let spacing = spacing.max(1);
        let mut tick = start_tick;
        for c in text.chars() {
            if let Some(key) = Keystroke::from_char(c) {
                self.record(tick, key);
                tick += spacing;
            }
        }
        tick
    }

    /// All recorded entries.
    pub fn entries(&self) -> &[TimedKeystroke] {
        &self.entries
    }

    /// Number of recorded keystrokes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tick of the last recorded keystroke.
    pub fn last_tick(&self) -> Option<u64> {
        self.entries.last().map(|entry| entry.tick)
    }
}

// =============================================================================
// TESTS
// =============================================================================
