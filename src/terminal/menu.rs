//! Settings menu shown before a game and after "New game".
//!
//! Editing rules live on `SettingsMenu` so they can be tested without a
//! terminal. Values are only clamped when the menu is confirmed.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crossterm::{
    cursor::{Hide, MoveTo},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use super::render::{EMPHASIS_COLOR, HINT_COLOR, SELECTED_COLOR, TEXT_COLOR, UNSELECTED_COLOR};
use super::{Terminal, TerminalError, LOGO};
use crate::config::{dictionary_name, GameSettings, SessionParams, SEED_MODULUS};

/// Seeds wrap below this when stepped.
const SEED_LIMIT: u32 = SEED_MODULUS as u32;

/// Tempo and frequency wrap below this when stepped.
const RATE_LIMIT: u32 = 10_000;

/// Width of a numeric field.
const NUMBER_WIDTH: usize = 6;

/// Width of the dictionary field.
const NAME_WIDTH: usize = 20;

/// Focusable entries, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuField {
    /// Level seed
    Seed,
    /// Ticks between movement steps
    Tempo,
    /// Ticks between spawn attempts
    Frequency,
    /// Word list
    Dictionary,
    /// Start button
    Ok,
}

impl MenuField {
    /// Entries in display order.
    pub const ALL: [MenuField; 5] = [
        MenuField::Seed,
        MenuField::Tempo,
        MenuField::Frequency,
        MenuField::Dictionary,
        MenuField::Ok,
    ];

    /// Next entry, wrapping around.
    pub fn next(self) -> Self {
        match self {
            MenuField::Seed => MenuField::Tempo,
            MenuField::Tempo => MenuField::Frequency,
            MenuField::Frequency => MenuField::Dictionary,
            MenuField::Dictionary => MenuField::Ok,
            MenuField::Ok => MenuField::Seed,
        }
    }

    /// Previous entry, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            MenuField::Seed => MenuField::Ok,
            MenuField::Tempo => MenuField::Seed,
            MenuField::Frequency => MenuField::Tempo,
            MenuField::Dictionary => MenuField::Frequency,
            MenuField::Ok => MenuField::Dictionary,
        }
    }
}

/// An edit requested from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    /// Focus the next entry
    Next,
    /// Focus the previous entry
    Prev,
    /// Step the focused value down
    Decrement,
    /// Step the focused value up
    Increment,
    /// Append a decimal digit
    Digit(u32),
    /// Drop the last decimal digit
    Erase,
    /// Press the focused entry
    Confirm,
    /// Leave the program
    Cancel,
}

/// Map a key event to a menu action.
pub fn map_menu_key(event: KeyEvent) -> Option<MenuAction> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(event.code, KeyCode::Char('c') | KeyCode::Char('C')).then_some(MenuAction::Cancel);
    }

    match event.code {
        KeyCode::Tab | KeyCode::Down => Some(MenuAction::Next),
        KeyCode::BackTab | KeyCode::Up => Some(MenuAction::Prev),
        KeyCode::Left => Some(MenuAction::Decrement),
        KeyCode::Right => Some(MenuAction::Increment),
        KeyCode::Backspace => Some(MenuAction::Erase),
        KeyCode::Enter => Some(MenuAction::Confirm),
        KeyCode::Esc => Some(MenuAction::Cancel),
        KeyCode::Char(c) => c.to_digit(10).map(MenuAction::Digit),
        _ => None,
    }
}

/// Menu state: the values being edited and the focused entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsMenu {
    seed: u32,
    tempo: u32,
    frequency: u32,
    dictionaries: Vec<PathBuf>,
    dictionary: usize,
    field: MenuField,
}

impl SettingsMenu {
    /// Pre-fill the menu from `settings`, with `selected` indexing
    /// `dictionaries`.
    pub fn new(settings: &GameSettings, dictionaries: Vec<PathBuf>, selected: usize) -> Self {
        let dictionary = selected.min(dictionaries.len().saturating_sub(1));
        Self {
            seed: settings.seed % SEED_LIMIT,
            tempo: settings.tempo % RATE_LIMIT,
            frequency: settings.frequency % RATE_LIMIT,
            dictionaries,
            dictionary,
            field: MenuField::Seed,
        }
    }

    /// Focused entry.
    pub fn field(&self) -> MenuField {
        self.field
    }

    /// Seed as edited (0 means "from the clock").
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Tempo as edited.
    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    /// Frequency as edited.
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Selected dictionary file.
    pub fn dictionary(&self) -> Option<&Path> {
        self.dictionaries.get(self.dictionary).map(PathBuf::as_path)
    }

    /// Apply one action. Returns true when the menu was confirmed.
    pub fn apply(&mut self, action: MenuAction) -> bool {
        match action {
            MenuAction::Next => self.field = self.field.next(),
            MenuAction::Prev => self.field = self.field.prev(),
            MenuAction::Decrement => self.step(false),
            MenuAction::Increment => self.step(true),
            MenuAction::Digit(digit) => self.push_digit(digit),
            MenuAction::Erase => {
                if let Some(value) = self.number_mut() {
                    *value /= 10;
                }
            }
            MenuAction::Confirm => return self.field == MenuField::Ok,
            MenuAction::Cancel => {}
        }
        false
    }

    /// Settings chosen so far, with tempo and frequency clamped.
    pub fn settings(&self) -> GameSettings {
        let clamped = SessionParams::new(self.seed, self.tempo, self.frequency);
        GameSettings {
            seed: self.seed,
            tempo: clamped.tempo(),
            frequency: clamped.frequency(),
            dictionary: self.dictionary().map(Path::to_path_buf),
        }
    }

    fn number_mut(&mut self) -> Option<&mut u32> {
        match self.field {
            MenuField::Seed => Some(&mut self.seed),
            MenuField::Tempo => Some(&mut self.tempo),
            MenuField::Frequency => Some(&mut self.frequency),
            MenuField::Dictionary | MenuField::Ok => None,
        }
    }

    fn limit(&self) -> u32 {
        if self.field == MenuField::Seed {
            SEED_LIMIT
        } else {
            RATE_LIMIT
        }
    }

    fn step(&mut self, up: bool) {
        if self.field == MenuField::Dictionary {
            let count = self.dictionaries.len();
            if count > 0 {
                self.dictionary = if up {
                    (self.dictionary + 1) % count
                } else {
                    (self.dictionary + count - 1) % count
                };
            }
            return;
        }

        let limit = self.limit();
        if let Some(value) = self.number_mut() {
            *value = if up {
                (*value + 1) % limit
            } else {
                (*value + limit - 1) % limit
            };
        }
    }

    fn push_digit(&mut self, digit: u32) {
        // One more digit must still fit the field.
        let room = self.limit() / 10;
        if let Some(value) = self.number_mut() {
            if *value < room {
                *value = *value * 10 + digit;
            }
        }
    }
}

/// Numeric field text: zero-padded to six places, padding shown as dots.
pub fn number_text(value: u32) -> String {
    let digits = value.to_string();
    if value == 0 {
        return ".".repeat(NUMBER_WIDTH);
    }
    format!("{}{}", ".".repeat(NUMBER_WIDTH.saturating_sub(digits.len())), digits)
}

/// Dictionary field text: name cut or padded to the field width.
pub fn name_text(path: Option<&Path>) -> String {
    let name: String = path
        .map(dictionary_name)
        .unwrap_or_default()
        .chars()
        .take(NAME_WIDTH)
        .collect();
    format!("{:<width$}", name, width = NAME_WIDTH)
}

fn draw<W: Write>(out: &mut W, menu: &SettingsMenu) -> io::Result<()> {
    queue!(out, Hide, Clear(ClearType::All), SetForegroundColor(EMPHASIS_COLOR))?;

    let mut row = 1;
    for line in LOGO {
        queue!(out, MoveTo(4, row), Print(line))?;
        row += 1;
    }
    row += 2;

    let entries = [
        (MenuField::Seed, "Level seed:  ", number_text(menu.seed), "  (leave empty for random)"),
        (MenuField::Tempo, "Tempo:       ", number_text(menu.tempo), "  (how quickly words move)"),
        (MenuField::Frequency, "Frequency:   ", number_text(menu.frequency), "  (how quickly words appear)"),
        (MenuField::Dictionary, "Dictionary:  ", name_text(menu.dictionary()), ""),
    ];

    for (field, label, value, hint) in entries {
        let color = if menu.field == field { SELECTED_COLOR } else { UNSELECTED_COLOR };
        queue!(
            out,
            MoveTo(8, row),
            SetForegroundColor(TEXT_COLOR),
            Print(label),
            SetForegroundColor(color),
            Print(value),
            SetForegroundColor(HINT_COLOR),
            Print(hint)
        )?;
        row += 1;
    }

    row += 1;
    let color = if menu.field == MenuField::Ok { SELECTED_COLOR } else { UNSELECTED_COLOR };
    queue!(out, MoveTo(8, row), SetForegroundColor(color), Print("<OK>"), ResetColor)?;

    out.flush()
}

/// Show the settings menu until `<OK>` is pressed.
///
/// Returns `None` when the player leaves with Ctrl-C or Esc.
pub fn show_menu(
    term: &mut Terminal,
    settings: &GameSettings,
    dictionaries: &[PathBuf],
    selected: usize,
) -> Result<Option<GameSettings>, TerminalError> {
    let mut menu = SettingsMenu::new(settings, dictionaries.to_vec(), selected);

    loop {
        draw(term.out(), &menu)?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        match map_menu_key(key) {
            Some(MenuAction::Cancel) => return Ok(None),
            Some(action) => {
                if menu.apply(action) {
                    return Ok(Some(menu.settings()));
                }
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> SettingsMenu {
        SettingsMenu::new(
            &GameSettings::default(),
            vec![PathBuf::from("dict/de.dic"), PathBuf::from("dict/en.dic")],
            1,
        )
    }

    fn focus(menu: &mut SettingsMenu, field: MenuField) {
        while menu.field() != field {
            menu.apply(MenuAction::Next);
        }
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(MenuField::Seed.prev(), MenuField::Ok);
        assert_eq!(MenuField::Ok.next(), MenuField::Seed);
        for field in MenuField::ALL {
            assert_eq!(field.next().prev(), field);
        }
    }

    #[test]
    fn test_prefilled_from_settings() {
        let settings = GameSettings { seed: 42, tempo: 120, frequency: 90, dictionary: None };
        let menu = SettingsMenu::new(&settings, vec![PathBuf::from("a.dic")], 7);
        assert_eq!(menu.seed(), 42);
        assert_eq!(menu.tempo(), 120);
        assert_eq!(menu.frequency(), 90);
        assert_eq!(menu.dictionary(), Some(Path::new("a.dic")));
        assert_eq!(menu.field(), MenuField::Seed);
    }

    #[test]
    fn test_digit_entry_and_erase() {
        let mut menu = menu();
        for digit in [1, 2, 3, 4, 5, 6, 7] {
            menu.apply(MenuAction::Digit(digit));
        }
        // The seventh digit does not fit.
        assert_eq!(menu.seed(), 123_456);

        menu.apply(MenuAction::Erase);
        assert_eq!(menu.seed(), 12_345);

        menu.apply(MenuAction::Next);
        menu.apply(MenuAction::Digit(5));
        assert_eq!(menu.tempo(), 805);
        menu.apply(MenuAction::Digit(1));
        assert_eq!(menu.tempo(), 8051);
        menu.apply(MenuAction::Digit(1));
        assert_eq!(menu.tempo(), 8051);
    }

    #[test]
    fn test_stepping_wraps() {
        let mut menu = menu();
        menu.apply(MenuAction::Decrement);
        assert_eq!(menu.seed(), 999_999);
        menu.apply(MenuAction::Increment);
        assert_eq!(menu.seed(), 0);

        focus(&mut menu, MenuField::Frequency);
        menu.apply(MenuAction::Increment);
        assert_eq!(menu.frequency(), 281);

        focus(&mut menu, MenuField::Dictionary);
        menu.apply(MenuAction::Increment);
        assert_eq!(menu.dictionary(), Some(Path::new("dict/de.dic")));
        menu.apply(MenuAction::Decrement);
        assert_eq!(menu.dictionary(), Some(Path::new("dict/en.dic")));

        // Erase and digits do nothing on the dictionary.
        menu.apply(MenuAction::Erase);
        menu.apply(MenuAction::Digit(3));
        assert_eq!(menu.dictionary(), Some(Path::new("dict/en.dic")));
    }

    #[test]
    fn test_confirm_only_on_ok_and_clamps() {
        let mut menu = menu();
        focus(&mut menu, MenuField::Tempo);
        menu.apply(MenuAction::Erase);
        menu.apply(MenuAction::Erase);
        assert_eq!(menu.tempo(), 0);
        assert!(!menu.apply(MenuAction::Confirm));

        focus(&mut menu, MenuField::Frequency);
        for digit in [9, 9] {
            menu.apply(MenuAction::Digit(digit));
        }
        assert_eq!(menu.frequency(), 2_809);

        focus(&mut menu, MenuField::Ok);
        assert!(menu.apply(MenuAction::Confirm));

        let settings = menu.settings();
        assert_eq!(settings.seed, 0);
        assert_eq!(settings.tempo, 50);
        assert_eq!(settings.frequency, 500);
        assert_eq!(settings.dictionary, Some(PathBuf::from("dict/en.dic")));
    }

    #[test]
    fn test_key_mapping() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(map_menu_key(key(KeyCode::Tab)), Some(MenuAction::Next));
        assert_eq!(map_menu_key(key(KeyCode::Up)), Some(MenuAction::Prev));
        assert_eq!(map_menu_key(key(KeyCode::Left)), Some(MenuAction::Decrement));
        assert_eq!(map_menu_key(key(KeyCode::Char('7'))), Some(MenuAction::Digit(7)));
        assert_eq!(map_menu_key(key(KeyCode::Char('x'))), None);
        assert_eq!(map_menu_key(key(KeyCode::Enter)), Some(MenuAction::Confirm));
        assert_eq!(
            map_menu_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(MenuAction::Cancel)
        );
    }

    #[test]
    fn test_field_text() {
        assert_eq!(number_text(0), "......");
        assert_eq!(number_text(280), "...280");
        assert_eq!(number_text(123_456), "123456");
        assert_eq!(name_text(Some(Path::new("dict/en.dic"))), format!("en{}", " ".repeat(18)));
        assert_eq!(name_text(None), " ".repeat(20));
    }
}
