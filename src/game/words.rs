//! Word Lifecycle
//!
//! Movement step for live words. Words that reach the right edge are
//! removed in the same step and cost a life each.

use tracing::debug;

use crate::game::events::GameEvent;
use crate::game::state::{SessionState, WordId};

/// Advance every live word one column.
///
/// Returns the ids of the words that left the field, in spawn order.
pub fn advance_words(state: &mut SessionState) -> Vec<WordId> {
    let width = state.field.width();

    let mut exited = Vec::new();
    for word in state.words.values_mut() {
        word.position = word.position.saturating_add(1);
        if word.has_exited(width) {
            exited.push(word.id);
        }
    }

    for word_id in &exited {
        let Some(word) = state.words.remove(word_id) else {
            continue;
        };
        state.lose_life();
        debug!(
            "Missed {:?} in lane {} at tick {} ({} lives left)",
            word.text, word.lane, state.tick, state.lives
        );
        state.push_event(GameEvent::word_missed(
            state.tick,
            *word_id,
            word.text,
            state.lives,
        ));
    }

    exited
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::config::SessionParams;
    use crate::game::events::GameEventData;
    use crate::game::state::PlayField;

    fn session(width: u16) -> SessionState {
        SessionState::new(
            SessionParams::default(),
            PlayField::new(width, 22),
            Utc.timestamp_opt(0, 0).unwrap(),
        )
    }

    fn place(state: &mut SessionState, text: &str, lane: u16, position: u16) -> WordId {
        let id = state.spawn_word(text, lane);
        if let Some(word) = state.words.get_mut(&id) {
            word.position = position;
        }
        id
    }

    #[test]
    fn test_words_advance_one_column() {
        let mut state = session(80);
        let a = place(&mut state, "CAT", 0, 0);
        let b = place(&mut state, "DOG", 1, 10);

        assert!(advance_words(&mut state).is_empty());
        assert_eq!(state.get_word(&a).unwrap().position, 1);
        assert_eq!(state.get_word(&b).unwrap().position, 11);
        assert_eq!(state.lives, 5);
    }

    #[test]
    fn test_word_at_edge_is_removed_same_step() {
        let mut state = session(80);
        let id = place(&mut state, "HELLO", 3, 74);

        assert_eq!(advance_words(&mut state), vec![id]);
        assert!(state.get_word(&id).is_none());
        assert_eq!(state.lives, 4);

        let events = state.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0].data,
            GameEventData::WordMissed { lives_left: 4, .. }
        ));
    }

    #[test]
    fn test_no_word_observed_past_edge() {
        let mut state = session(40);
        place(&mut state, "ALPHA", 0, 0);
        place(&mut state, "BETA", 1, 20);
        place(&mut state, "GAMMA", 2, 33);

        for _ in 0..60 {
            advance_words(&mut state);
            for word in state.live_words() {
                assert!(word.end() < 40);
            }
        }
        assert!(state.words.is_empty());
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_simultaneous_misses_cost_each_a_life() {
        let mut state = session(80);
        place(&mut state, "AAAAA", 0, 74);
        place(&mut state, "BBBBB", 1, 74);
        place(&mut state, "CCCCC", 2, 10);
        state.lives = 1;

        let exited = advance_words(&mut state);
        assert_eq!(exited.len(), 2);
        assert_eq!(state.lives, 0);
        assert_eq!(state.words.len(), 1);
    }
}
