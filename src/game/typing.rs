//! Typing Engine
//!
//! Applies keystrokes to the input buffer and completes words whose
//! text the buffer matches exactly.

use tracing::debug;

use crate::game::events::GameEvent;
use crate::game::input::{is_typeable, Keystroke};
use crate::game::state::{SessionState, WordId};

/// Apply one keystroke to the session.
///
/// Returns the id of the completed word, if the keystroke completed one.
/// `Quit` is not a typing key and is ignored here; the tick loop handles
/// it. Characters the game does not accept are ignored entirely.
pub fn apply_keystroke(state: &mut SessionState, key: Keystroke) -> Option<WordId> {
    match key {
        Keystroke::Char(c) => {
            if !is_typeable(c) {
                return None;
            }
            // A full buffer silently drops the character.
            state.input.push(c);
        }
        Keystroke::Backspace => {
            if state.input.pop().is_some() {
                state.wasted_keystrokes += 1;
            }
        }
        Keystroke::Clear => {
            state.input.clear();
            state.wasted_keystrokes += 1;
        }
        Keystroke::Quit => return None,
    }

    complete_matching_word(state)
}

/// Complete the first live word (spawn order) equal to the buffer.
///
/// At most one word is consumed per call.
pub fn complete_matching_word(state: &mut SessionState) -> Option<WordId> {
    if state.input.is_empty() {
        return None;
    }

    let typed = state.input.as_str();
    let word_id = state
        .words
        .values()
        .find(|word| word.matches(typed))
        .map(|word| word.id)?;

    let word = state.words.remove(&word_id)?;
    let points = state.input.len() as u32;

    state.score = state.score.saturating_add(points);
    state.words_completed += 1;
    state.input.clear();

    debug!("Typed {:?} (+{}) at tick {}", word.text, points, state.tick);
    state.push_event(GameEvent::word_typed(
        state.tick,
        word_id,
        word.text,
        points,
        state.score,
    ));

    Some(word_id)
}
