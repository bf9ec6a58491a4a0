//! Lane Scheduler
//!
//! Decides, on each spawn tick, whether a new word enters the field and
//! in which lane. Free lanes are preferred roughly two times out of
//! three when shared lanes are also available.

use tracing::debug;

use crate::dictionary::Dictionary;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::state::{SessionState, WordEntity, WordId};

/// Extra columns a lane's newest word must have travelled before another
/// word may start behind it.
pub const SPAWN_MARGIN: u32 = 6;

/// Odds denominator for the free-lane preference (free unless the draw is 0).
const SHARED_LANE_ODDS: u32 = 3;

/// Occupancy of a lane as seen by a pending spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaneOccupancy {
    /// No words in the lane
    Free,
    /// Words present, all far enough along to share
    OkToShare,
    /// A word is too close to the left edge
    Unsafe,
}

/// Occupancy of every lane, recomputed each spawn tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaneCensus {
    lanes: Vec<LaneOccupancy>,
}

impl LaneCensus {
    /// Classify lanes for a new word of `new_word_len` characters.
    ///
    /// A lane holding any word with `position < new_word_len + SPAWN_MARGIN`
    /// is unsafe.
    pub fn take<'a, I>(words: I, lane_count: u16, new_word_len: u32) -> Self
    where
        I: IntoIterator<Item = &'a WordEntity>,
    {
        let threshold = new_word_len + SPAWN_MARGIN;
        let mut lanes = vec![LaneOccupancy::Free; lane_count as usize];

        for word in words {
            let Some(slot) = lanes.get_mut(word.lane as usize) else {
                continue;
            };
            if (word.position as u32) < threshold {
                *slot = LaneOccupancy::Unsafe;
            } else if *slot == LaneOccupancy::Free {
                *slot = LaneOccupancy::OkToShare;
            }
        }

        Self { lanes }
    }

    /// Occupancy of one lane.
    pub fn get(&self, lane: u16) -> Option<LaneOccupancy> {
        self.lanes.get(lane as usize).copied()
    }

    /// Free lanes in ascending order.
    pub fn free_lanes(&self) -> Vec<u16> {
        self.lanes_with(LaneOccupancy::Free)
    }

    /// Shareable lanes in ascending order.
    pub fn shared_lanes(&self) -> Vec<u16> {
        self.lanes_with(LaneOccupancy::OkToShare)
    }

    fn lanes_with(&self, kind: LaneOccupancy) -> Vec<u16> {
        self.lanes
            .iter()
            .enumerate()
            .filter(|(_, occupancy)| **occupancy == kind)
            .map(|(lane, _)| lane as u16)
            .collect()
    }
}

/// Run the scheduler for one spawn tick.
///
/// The word is drawn before lanes are classified, so a skipped spawn
/// still consumes one generator value.
pub fn schedule_spawn(state: &mut SessionState, dictionary: &Dictionary) -> Option<WordId> {
    let text = dictionary.pick(&mut state.rng).to_owned();
    let new_len = text.chars().count() as u32;

    let census = LaneCensus::take(state.words.values(), state.field.lanes(), new_len);
    let free = census.free_lanes();
    let shared = census.shared_lanes();

    #[cfg(feature = "debug-tracing")]
    tracing::trace!(
        "Tick {}: {} free, {} shared lanes for {:?}",
        state.tick,
        free.len(),
        shared.len(),
        text
    );

    if free.is_empty() && shared.is_empty() {
        debug!("No lane for {:?} at tick {}", text, state.tick);
        state.push_event(GameEvent::new(state.tick, GameEventData::SpawnSkipped));
        return None;
    }

    let pool = if shared.is_empty()
        || (!free.is_empty() && state.rng.next_bounded(SHARED_LANE_ODDS) != 0)
    {
        &free
    } else {
        &shared
    };

    let lane = pool[state.rng.next_bounded(pool.len() as u32) as usize];
    let word_id = state.spawn_word(&text, lane);

    debug!("Spawned {:?} in lane {} at tick {}", text, lane, state.tick);
    state.push_event(GameEvent::word_spawned(state.tick, word_id, &text, lane));

    Some(word_id)
}
