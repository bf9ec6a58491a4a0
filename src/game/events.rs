//! Game Events
//!
//! Signals raised by the simulation for presentation (bell, flashes)
//! and for replay comparison.

use serde::{Serialize, Deserialize};

use crate::game::state::{WordId, SessionPhase};

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A word entered the field
    WordSpawned {
        word_id: WordId,
        text: String,
        lane: u16,
    },

    /// A spawn tick found no usable lane
    SpawnSkipped,

    /// A word reached the right edge and cost a life
    WordMissed {
        word_id: WordId,
        text: String,
        lives_left: u8,
    },

    /// The typed buffer matched a word
    WordTyped {
        word_id: WordId,
        text: String,
        points: u32,
        new_score: u32,
    },

    /// Session ended
    SessionEnded {
        phase: SessionPhase,
        score: u32,
        words_completed: u32,
    },
}

/// A game event with the tick it happened on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u64,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u64, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Create word spawned event.
    pub fn word_spawned(tick: u64, word_id: WordId, text: &str, lane: u16) -> Self {
        Self::new(
            tick,
            GameEventData::WordSpawned {
                word_id,
                text: text.to_string(),
                lane,
            },
        )
    }

    /// Create word missed event.
    pub fn word_missed(tick: u64, word_id: WordId, text: String, lives_left: u8) -> Self {
        Self::new(
            tick,
            GameEventData::WordMissed {
                word_id,
                text,
                lives_left,
            },
        )
    }

    /// Create word typed event.
    pub fn word_typed(tick: u64, word_id: WordId, text: String, points: u32, new_score: u32) -> Self {
        Self::new(
            tick,
            GameEventData::WordTyped {
                word_id,
                text,
                points,
                new_score,
            },
        )
    }

    /// Create session ended event.
    pub fn session_ended(tick: u64, phase: SessionPhase, score: u32, words_completed: u32) -> Self {
        Self::new(
            tick,
            GameEventData::SessionEnded {
                phase,
                score,
                words_completed,
            },
        )
    }

    /// Whether presentation should ring the bell for this event.
    pub fn is_alert(&self) -> bool {
        matches!(
            self.data,
            GameEventData::WordMissed { .. } | GameEventData::WordTyped { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_events() {
        let miss = GameEvent::word_missed(3, WordId(0), "CAT".into(), 4);
        let hit = GameEvent::word_typed(3, WordId(1), "DOG".into(), 3, 3);
        let spawn = GameEvent::word_spawned(0, WordId(2), "EMU", 7);

        assert!(miss.is_alert());
        assert!(hit.is_alert());
        assert!(!spawn.is_alert());
        assert!(!GameEvent::new(0, GameEventData::SpawnSkipped).is_alert());
    }

    #[test]
    fn test_events_serialize() {
        let event = GameEvent::word_spawned(280, WordId(4), "CAT", 3);
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
