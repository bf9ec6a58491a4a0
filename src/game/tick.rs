//! Authoritative Simulation Tick
//!
//! One iteration of the game loop: the spawn-or-move step selected by
//! the tick counter, then at most one keystroke, then the counter
//! advances. Everything here is deterministic given the seed, the
//! dictionary and the keystroke sequence.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::SessionParams;
use crate::dictionary::Dictionary;
use crate::game::events::GameEvent;
use crate::game::input::{Keystroke, KeystrokeScript};
use crate::game::lanes::schedule_spawn;
use crate::game::state::{SessionState, SessionPhase, PlayField};
use crate::game::typing::apply_keystroke;
use crate::game::words::advance_words;

/// What the simulation does on a given tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickAction {
    /// Run the lane scheduler
    Spawn,
    /// Advance live words
    Move,
    /// Neither
    Idle,
}

/// Select the action for a tick.
///
/// Spawning wins: a tick that is a multiple of both `frequency` and
/// `tempo` spawns and does not move. Replays depend on this.
pub fn tick_action(tick: u64, params: &SessionParams) -> TickAction {
    if tick % params.frequency() as u64 == 0 {
        TickAction::Spawn
    } else if tick % params.tempo() as u64 == 0 {
        TickAction::Move
    } else {
        TickAction::Idle
    }
}

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Action taken (`None` if the session had already ended)
    pub action: Option<TickAction>,
    /// Whether the session ended this tick (or already had)
    pub session_ended: bool,
}

impl TickResult {
    /// Whether any event asks presentation for an alert.
    pub fn has_alert(&self) -> bool {
        self.events.iter().any(GameEvent::is_alert)
    }
}

/// Run one loop iteration.
///
/// # Arguments
///
/// * `state` - The session state (will be mutated)
/// * `dictionary` - Word source for spawns
/// * `key` - The keystroke polled this iteration, if any
///
/// `Keystroke::Quit` ends the session immediately without advancing the
/// tick counter. Otherwise the session ends after this iteration when
/// no lives remain.
pub fn tick(
    state: &mut SessionState,
    dictionary: &Dictionary,
    key: Option<Keystroke>,
) -> TickResult {
    let mut result = TickResult::default();

    if state.is_ended() {
        result.session_ended = true;
        return result;
    }

    // 1. Spawn or move
    let action = tick_action(state.tick, &state.params);
    match action {
        TickAction::Spawn => {
            schedule_spawn(state, dictionary);
        }
        TickAction::Move => {
            advance_words(state);
        }
        TickAction::Idle => {}
    }
    result.action = Some(action);

    // 2. Keystroke
    match key {
        Some(Keystroke::Quit) => {
            end_session(state, SessionPhase::Quit);
            result.session_ended = true;
            result.events = state.take_events();
            return result;
        }
        Some(key) => {
            apply_keystroke(state, key);
        }
        None => {}
    }

    // 3. Advance tick counter
    state.tick += 1;

    // 4. Check end condition
    if state.lives == 0 {
        end_session(state, SessionPhase::GameOver);
        result.session_ended = true;
    }

    result.events = state.take_events();
    result
}

/// End the session in the given phase.
fn end_session(state: &mut SessionState, phase: SessionPhase) {
    state.phase = phase;
    info!(
        "Session ended ({:?}) at tick {}: score {}, {} words",
        phase, state.tick, state.score, state.words_completed
    );
    state.push_event(GameEvent::session_ended(
        state.tick,
        phase,
        state.score,
        state.words_completed,
    ));
}

/// Replay a session from recorded keystrokes.
///
/// Runs until the session ends or `max_ticks` iterations have run.
/// Returns the final state and every event in order.
pub fn replay_session(
    params: SessionParams,
    field: PlayField,
    dictionary: &Dictionary,
    script: &KeystrokeScript,
    max_ticks: u64,
    started_at: DateTime<Utc>,
) -> (SessionState, Vec<GameEvent>) {
    let mut state = SessionState::new(params, field, started_at);
    let mut all_events = Vec::new();

    while state.tick < max_ticks {
        let key = script.key_at(state.tick);
        let result = tick(&mut state, dictionary, key);
        all_events.extend(result.events);

        if result.session_ended {
            break;
        }
    }

    (state, all_events)
}
