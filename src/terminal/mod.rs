//! Terminal Presentation
//!
//! Everything that touches the screen or the keyboard. Non-deterministic
//! by nature (wall clock, real keys); the simulation itself never
//! depends on anything in here.

pub mod keys;
pub mod menu;
pub mod play;
pub mod render;
pub mod summary;

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute,
    style::{available_color_count, ResetColor},
    terminal::{self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};
use thiserror::Error;

pub use keys::{map_key, InputKey};
pub use menu::{show_menu, MenuField, SettingsMenu};
pub use play::{run_session, SessionEnd};
pub use summary::{show_summary, Outcome};

/// Smallest usable terminal width.
pub const MIN_COLS: u16 = 80;

/// Smallest usable terminal height.
pub const MIN_ROWS: u16 = 24;

/// Fewest colours the palette needs.
pub const MIN_COLORS: u16 = 8;

/// Title art shared by the menu and the game-over screen.
pub(crate) const LOGO: [&str; 5] = [
    r" _____                ____                     ",
    r"|_   _|   _ _ __   __|  _ \ __ _  ___ ___ _ __ ",
    r"  | || | | | '_ \ / _ \ |_) / _` |/ __/ _ \ '__|",
    r"  | || |_| | |_) |  __/  _ < (_| | (_|  __/ |   ",
    r"  |_| \__, | .__/ \___|_| \_\__,_|\___\___|_|   ",
];

/// Terminal errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Terminal below the minimum size.
    #[error("terminal window too small ({cols}x{rows}, need at least {}x{})", MIN_COLS, MIN_ROWS)]
    TooSmall {
        /// Current width.
        cols: u16,
        /// Current height.
        rows: u16,
    },

    /// Terminal without colour support.
    #[error("terminal is monochrome ({0} colours, need at least {})", MIN_COLORS)]
    Monochrome(u16),

    /// I/O error talking to the terminal.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Refuse terminals the game cannot be drawn on.
pub fn check_capabilities(cols: u16, rows: u16, colors: u16) -> Result<(), TerminalError> {
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(TerminalError::TooSmall { cols, rows });
    }
    if colors < MIN_COLORS {
        return Err(TerminalError::Monochrome(colors));
    }
    Ok(())
}

/// Colours the terminal advertises; a `dumb` terminal has none.
fn color_count() -> u16 {
    match std::env::var("TERM") {
        Ok(term) if term == "dumb" => 0,
        _ => available_color_count(),
    }
}

/// Raw-mode, alternate-screen terminal; restored on drop.
pub struct Terminal {
    out: Stdout,
    cols: u16,
    rows: u16,
}

impl Terminal {
    /// Take over the terminal.
    ///
    /// Fails without touching the screen if it is smaller than
    /// `MIN_COLS` x `MIN_ROWS` or has no colours.
    pub fn enter() -> Result<Self, TerminalError> {
        let (cols, rows) = terminal::size()?;
        check_capabilities(cols, rows, color_count())?;

        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(terminal::ClearType::All)
        )?;

        Ok(Self { out, cols, rows })
    }

    /// Terminal width.
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Terminal height.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Output handle.
    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }

    /// Ring the terminal bell.
    pub fn beep(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            EnableLineWrap,
            cursor::Show,
            LeaveAlternateScreen,
            ResetColor
        );
        let _ = terminal::disable_raw_mode();
    }
}
