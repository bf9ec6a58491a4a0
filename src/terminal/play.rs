//! Interactive game loop.

use std::thread;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event};
use tracing::{debug, info};

use super::keys::{map_key, InputKey};
use super::render::draw_frame;
use super::{Terminal, TerminalError};
use crate::config::SessionParams;
use crate::dictionary::Dictionary;
use crate::game::input::Keystroke;
use crate::game::state::{PlayField, SessionState};
use crate::game::stats::SessionStats;
use crate::game::tick::tick;

/// Pause between loop iterations.
pub const FRAME_SLEEP: Duration = Duration::from_millis(crate::TICK_INTERVAL_MS);

/// How an interactive session stopped.
#[derive(Debug)]
pub enum SessionEnd {
    /// Game over or quit; show the summary
    Finished(SessionState),
    /// Ctrl-C; leave without a summary
    Interrupted,
}

/// Poll at most one key without blocking.
fn poll_key() -> Result<Option<InputKey>, TerminalError> {
    if !event::poll(Duration::ZERO)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}

/// Play one session on the terminal until it ends.
pub fn run_session(
    term: &mut Terminal,
    params: SessionParams,
    dictionary: &Dictionary,
) -> Result<SessionEnd, TerminalError> {
    let field = PlayField::from_terminal(term.cols(), term.rows());
    let mut state = SessionState::new(params, field, Utc::now());
    let rows = term.rows();

    info!(
        "Session started: seed {}, tempo {}, frequency {}, {} lanes x {} columns",
        params.seed(),
        params.tempo(),
        params.frequency(),
        field.lanes(),
        field.width()
    );

    loop {
        let key = match poll_key()? {
            Some(InputKey::Interrupt) => {
                info!("Interrupted at tick {}", state.tick);
                return Ok(SessionEnd::Interrupted);
            }
            Some(InputKey::Game(key)) => Some(key),
            None => None,
        };

        let result = tick(&mut state, dictionary, key);
        for event in &result.events {
            debug!("{:?}", event);
        }
        if result.has_alert() {
            term.beep()?;
        }

        if result.session_ended {
            if key != Some(Keystroke::Quit) {
                // Last frame with zero lives before the summary.
                let stats = SessionStats::from_state(&state, Utc::now());
                draw_frame(term.out(), &state, &stats, rows)?;
            }
            return Ok(SessionEnd::Finished(state));
        }

        let stats = SessionStats::from_state(&state, Utc::now());
        draw_frame(term.out(), &state, &stats, rows)?;

        thread::sleep(FRAME_SLEEP);
    }
}
