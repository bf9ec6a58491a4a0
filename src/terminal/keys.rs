//! Key mapping from crossterm events to game keystrokes.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::input::Keystroke;

/// A key as the game loop understands it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKey {
    /// Keystroke for the simulation
    Game(Keystroke),
    /// Ctrl-C: leave at once, no summary
    Interrupt,
}

/// Map a key event, or `None` for keys the game ignores.
pub fn map_key(event: KeyEvent) -> Option<InputKey> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(InputKey::Interrupt),
            _ => None,
        };
    }

    let key = match event.code {
        KeyCode::Char(c) => Keystroke::from_char(c)?,
        KeyCode::Backspace => Keystroke::Backspace,
        KeyCode::Enter => Keystroke::Clear,
        KeyCode::F(1) | KeyCode::Esc => Keystroke::Quit,
        _ => return None,
    };
    Some(InputKey::Game(key))
}
