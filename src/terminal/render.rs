//! Play screen rendering.
//!
//! Layout decisions live in plain functions so they can be tested
//! without a terminal; `draw_frame` only queues the commands.

use std::io::{self, Write};

use crossterm::{
    cursor::{MoveTo, Show},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate},
};

use crate::game::state::{SessionState, WordEntity};
use crate::game::stats::SessionStats;

/// Typed prefixes and labels.
pub const TEXT_COLOR: Color = Color::Magenta;

/// Untyped rest of a word, and help text.
pub const HINT_COLOR: Color = Color::White;

/// Untyped rest of a word close to the right edge, and values.
pub const EMPHASIS_COLOR: Color = Color::Yellow;

/// Frames and titles.
pub const WINDOW_COLOR: Color = Color::Red;

/// Focused menu entry or button.
pub const SELECTED_COLOR: Color = Color::Green;

/// Other menu entries and buttons.
pub const UNSELECTED_COLOR: Color = Color::Blue;

/// Status bar text.
pub const STATUS_FG: Color = Color::Black;

/// Status bar background.
pub const STATUS_BG: Color = Color::Cyan;

/// Column where the typing buffer starts on the status bar.
pub const BUFFER_COLUMN: u16 = 35;

/// Width the typing buffer is padded to on the status bar.
pub const BUFFER_FIELD: usize = 20;

/// How a word is split into coloured segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordStyle {
    /// Characters drawn in the text colour
    pub prefix: usize,
    /// Colour of the remaining characters
    pub tail: Color,
}

/// Style for `word` given the current buffer.
pub fn word_style(word: &WordEntity, typed: &str, width: u16) -> WordStyle {
    let tail = if word.end() > u32::from(width) * 2 / 3 {
        EMPHASIS_COLOR
    } else {
        HINT_COLOR
    };
    WordStyle {
        prefix: word.typed_prefix_len(typed),
        tail,
    }
}

/// Typing buffer padded with dots to the status bar field.
pub fn buffer_field(typed: &str) -> String {
    let len = typed.chars().count();
    let mut field = String::with_capacity(BUFFER_FIELD);
    field.push_str(typed);
    for _ in len..BUFFER_FIELD {
        field.push('.');
    }
    field
}

/// Full status bar text.
pub fn status_line(state: &SessionState, stats: &SessionStats) -> String {
    format!(
        "Score: {:010} | Words: {:05} | {} | Lives: {} | {}s {}WPM {}CPS",
        state.score,
        state.words_completed,
        buffer_field(state.input.as_str()),
        state.lives,
        stats.elapsed_secs,
        stats.wpm,
        stats.cps,
    )
}

/// Status bar text padded with blanks to the full terminal width.
pub fn status_row(state: &SessionState, stats: &SessionStats, cols: u16) -> String {
    format!("{:<width$}", status_line(state, stats), width = cols as usize)
}

/// Draw one frame of the play screen.
///
/// The cursor is left visible after the typed text.
pub fn draw_frame<W: Write>(
    out: &mut W,
    state: &SessionState,
    stats: &SessionStats,
    rows: u16,
) -> io::Result<()> {
    queue!(out, BeginSynchronizedUpdate, Clear(ClearType::All))?;

    let typed = state.input.as_str();
    let width = state.field.width();

    for word in state.live_words() {
        let style = word_style(word, typed, width);
        let split = word
            .text
            .char_indices()
            .nth(style.prefix)
            .map_or(word.text.len(), |(idx, _)| idx);
        let (head, rest) = word.text.split_at(split);

        queue!(
            out,
            MoveTo(word.position, word.lane),
            SetForegroundColor(TEXT_COLOR),
            Print(head),
            SetForegroundColor(style.tail),
            Print(rest),
        )?;
    }

    let status_y = rows.saturating_sub(1);
    let cursor_x = BUFFER_COLUMN + state.input.len() as u16;
    queue!(
        out,
        MoveTo(0, status_y),
        SetForegroundColor(STATUS_FG),
        SetBackgroundColor(STATUS_BG),
        Print(status_row(state, stats, width)),
        ResetColor,
        MoveTo(cursor_x, status_y),
        Show,
        EndSynchronizedUpdate,
    )?;

    out.flush()
}
