//! Session Statistics
//!
//! Derived figures shown on the status bar and the game-over screen.
//! Pure functions of the session state and the elapsed time.

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::game::state::{SessionState, SessionPhase};

/// Statistics at a point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Sum of completed word lengths
    pub score: u32,
    /// Completed words
    pub words_completed: u32,
    /// Backspaces and clears
    pub wasted_keystrokes: u64,
    /// Whole seconds since the session started
    pub elapsed_secs: u64,
    /// Characters per second
    pub cps: u32,
    /// Words per minute (rounded up)
    pub wpm: u32,
    /// Percentage; 100 when nothing has been scored
    pub accuracy: f64,
}

impl SessionStats {
    /// Compute statistics for `elapsed_secs` seconds of play.
    ///
    /// Rates divide by at least one second.
    pub fn compute(score: u32, words_completed: u32, wasted_keystrokes: u64, elapsed_secs: u64) -> Self {
        let divisor = elapsed_secs.max(1);

        let cps = (score as u64 / divisor) as u32;
        let wpm = (words_completed as u64 * 60).div_ceil(divisor) as u32;
        let accuracy = if score == 0 {
            100.0
        } else {
            100.0 - (wasted_keystrokes as f64 * 100.0 / score as f64)
        };

        Self {
            score,
            words_completed,
            wasted_keystrokes,
            elapsed_secs,
            cps,
            wpm,
            accuracy,
        }
    }

    /// Statistics of a session as of `now`.
    pub fn from_state(state: &SessionState, now: DateTime<Utc>) -> Self {
        let elapsed = (now - state.started_at).num_seconds().max(0) as u64;
        Self::compute(
            state.score,
            state.words_completed,
            state.wasted_keystrokes,
            elapsed,
        )
    }

    /// Elapsed time as `m:ss`.
    pub fn elapsed_display(&self) -> String {
        format!("{}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }

    /// Accuracy with two decimals and a percent sign.
    pub fn accuracy_display(&self) -> String {
        format!("{:.2}%", self.accuracy)
    }
}

/// Everything the game-over screen shows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Seed the session started from
    pub seed: u32,
    /// Ticks between movement steps
    pub tempo: u32,
    /// Ticks between spawn attempts
    pub frequency: u32,
    /// Ticks simulated
    pub ticks: u64,
    /// Lives left
    pub lives: u8,
    /// How the session ended
    pub phase: SessionPhase,
    /// Final statistics
    pub stats: SessionStats,
    /// Hex fingerprint of the final state
    pub state_hash: String,
}

impl SessionSummary {
    /// Summarize a finished (or running) session.
    pub fn from_state(state: &SessionState, now: DateTime<Utc>) -> Self {
        Self {
            seed: state.initial_seed(),
            tempo: state.params.tempo(),
            frequency: state.params.frequency(),
            ticks: state.tick,
            lives: state.lives,
            phase: state.phase,
            stats: SessionStats::from_state(state, now),
            state_hash: hex::encode(state.compute_hash()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use crate::config::SessionParams;
    use crate::game::state::PlayField;

    #[test]
    fn test_zero_elapsed_divides_by_one() {
        let stats = SessionStats::compute(30, 5, 0, 0);
        assert_eq!(stats.cps, 30);
        assert_eq!(stats.wpm, 300);
        assert_eq!(stats.elapsed_display(), "0:00");
    }

    #[test]
    fn test_wpm_rounds_up() {
        // 7 words in 100 s = 4.2 wpm -> 5
        let stats = SessionStats::compute(21, 7, 0, 100);
        assert_eq!(stats.wpm, 5);
        assert_eq!(stats.cps, 0);

        let stats = SessionStats::compute(120, 10, 0, 60);
        assert_eq!(stats.wpm, 10);
        assert_eq!(stats.cps, 2);
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(SessionStats::compute(0, 0, 12, 10).accuracy, 100.0);
        assert_eq!(SessionStats::compute(50, 10, 5, 10).accuracy, 90.0);
        assert_eq!(SessionStats::compute(50, 10, 5, 10).accuracy_display(), "90.00%");
        // More waste than score goes negative, never above 100.
        assert!(SessionStats::compute(3, 1, 10, 10).accuracy < 0.0);
    }

    #[test]
    fn test_elapsed_display() {
        let stats = SessionStats::compute(0, 0, 0, 125);
        assert_eq!(stats.elapsed_display(), "2:05");
    }

    #[test]
    fn test_from_state_uses_wall_clock() {
        let start = Utc.timestamp_opt(1_000, 0).unwrap();
        let mut state = SessionState::new(SessionParams::default(), PlayField::new(80, 22), start);
        state.score = 40;
        state.words_completed = 8;
        state.wasted_keystrokes = 2;

        let stats = SessionStats::from_state(&state, start + Duration::seconds(20));
        assert_eq!(stats.elapsed_secs, 20);
        assert_eq!(stats.cps, 2);
        assert_eq!(stats.wpm, 24);
        assert_eq!(stats.accuracy, 95.0);

        // Clock going backwards is treated as no time elapsed.
        let stats = SessionStats::from_state(&state, start - Duration::seconds(5));
        assert_eq!(stats.elapsed_secs, 0);
    }

    #[test]
    fn test_summary_carries_seed_and_hash() {
        let start = Utc.timestamp_opt(0, 0).unwrap();
        let state = SessionState::new(SessionParams::new(777, 90, 300), PlayField::new(80, 22), start);
        let summary = SessionSummary::from_state(&state, start);
        assert_eq!(summary.seed, 777);
        assert_eq!(summary.tempo, 90);
        assert_eq!(summary.frequency, 300);
        assert_eq!(summary.state_hash.len(), 64);
    }
}
