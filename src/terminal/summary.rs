//! Game-over screen.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use super::render::{EMPHASIS_COLOR, SELECTED_COLOR, TEXT_COLOR, UNSELECTED_COLOR, WINDOW_COLOR};
use super::{Terminal, TerminalError, LOGO};
use crate::game::stats::SessionSummary;

/// What the player picked on the game-over screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Back to the settings menu
    NewGame,
    /// Start again with the same settings and seed
    Replay,
    /// Leave the program
    Exit,
}

impl Outcome {
    /// Buttons in display order.
    pub const ALL: [Outcome; 3] = [Outcome::NewGame, Outcome::Replay, Outcome::Exit];

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::NewGame => "New game",
            Outcome::Replay => "Replay",
            Outcome::Exit => "Exit",
        }
    }

    /// Button text, framed when focused.
    pub fn button(self, selected: bool) -> String {
        if selected {
            format!("/ {} /", self.label())
        } else {
            format!("  {}  ", self.label())
        }
    }

    /// Next button, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Outcome::NewGame => Outcome::Replay,
            Outcome::Replay => Outcome::Exit,
            Outcome::Exit => Outcome::NewGame,
        }
    }

    /// Previous button, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Outcome::NewGame => Outcome::Exit,
            Outcome::Replay => Outcome::NewGame,
            Outcome::Exit => Outcome::Replay,
        }
    }
}

/// Label and value of each statistic shown under the logo.
pub fn summary_lines(summary: &SessionSummary) -> Vec<(&'static str, String)> {
    let stats = &summary.stats;
    vec![
        ("Score:     ", stats.score.to_string()),
        ("Words:     ", stats.words_completed.to_string()),
        ("Time:      ", stats.elapsed_display()),
        ("CPS:       ", stats.cps.to_string()),
        ("WPM:       ", stats.wpm.to_string()),
        ("Seed:      ", summary.seed.to_string()),
        ("Frequency: ", summary.frequency.to_string()),
        ("Tempo:     ", summary.tempo.to_string()),
        ("Accuracy:  ", stats.accuracy_display()),
    ]
}

fn draw<W: Write>(out: &mut W, summary: &SessionSummary, selected: Outcome) -> io::Result<()> {
    queue!(out, Hide, Clear(ClearType::All), SetForegroundColor(EMPHASIS_COLOR))?;

    let mut row = 1;
    for line in LOGO {
        queue!(out, MoveTo(4, row), Print(line))?;
        row += 1;
    }

    row += 1;
    queue!(
        out,
        MoveTo(8, row),
        SetForegroundColor(WINDOW_COLOR),
        Print(" /// GAME OVER /// ")
    )?;
    row += 2;

    for (label, value) in summary_lines(summary) {
        queue!(
            out,
            MoveTo(8, row),
            SetForegroundColor(TEXT_COLOR),
            Print(label),
            SetForegroundColor(EMPHASIS_COLOR),
            Print(value)
        )?;
        row += 1;
    }

    row += 1;
    for outcome in Outcome::ALL {
        let focused = outcome == selected;
        let color = if focused { SELECTED_COLOR } else { UNSELECTED_COLOR };
        queue!(
            out,
            MoveTo(8, row),
            SetForegroundColor(color),
            Print(outcome.button(focused))
        )?;
        row += 1;
    }

    queue!(out, ResetColor)?;
    out.flush()
}

/// Show the game-over screen and wait for a choice.
///
/// Ctrl-C counts as `Exit`.
pub fn show_summary(term: &mut Terminal, summary: &SessionSummary) -> Result<Outcome, TerminalError> {
    let mut selected = Outcome::NewGame;

    loop {
        draw(term.out(), summary, selected)?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Outcome::Exit);
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Right => selected = selected.next(),
            KeyCode::BackTab | KeyCode::Up | KeyCode::Left => selected = selected.prev(),
            KeyCode::Enter => return Ok(selected),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::SessionPhase;
    use crate::game::stats::SessionStats;

    fn summary(stats: SessionStats) -> SessionSummary {
        SessionSummary {
            seed: 4242,
            tempo: 80,
            frequency: 280,
            ticks: 9_000,
            lives: 0,
            phase: SessionPhase::GameOver,
            stats,
            state_hash: String::new(),
        }
    }

    #[test]
    fn test_button_cycle() {
        assert_eq!(Outcome::NewGame.next(), Outcome::Replay);
        assert_eq!(Outcome::Exit.next(), Outcome::NewGame);
        assert_eq!(Outcome::NewGame.prev(), Outcome::Exit);
        for outcome in Outcome::ALL {
            assert_eq!(outcome.next().prev(), outcome);
        }
    }

    #[test]
    fn test_button_framing() {
        assert_eq!(Outcome::Replay.button(true), "/ Replay /");
        assert_eq!(Outcome::Replay.button(false), "  Replay  ");
    }

    #[test]
    fn test_summary_lines() {
        let lines = summary_lines(&summary(SessionStats::compute(50, 10, 5, 75)));
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[2].1, "1:15");
        assert_eq!(lines[5].1, "4242");
        assert_eq!(lines[8].1, "90.00%");
    }

    #[test]
    fn test_draw_highlights_selection() {
        let mut out = Vec::new();
        draw(&mut out, &summary(SessionStats::compute(0, 0, 0, 0)), Outcome::Replay).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("/ Replay /"));
        assert!(text.contains("  Exit  "));
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("100.00%"));
    }
}
