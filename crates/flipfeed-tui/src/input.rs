use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flipfeed_core::Category;

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Flip,
    ToggleCategory(Category),
    NextPage,
    PreviousPage,
    Reload,
    OpenInBrowser,
    StartSearch,
    ClearSearch,
    ShowHelp,
    ExitMode,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if app.is_input_mode() {
        return handle_input_mode(key);
    }

    if app.mode == Mode::Help {
        // Any key closes help
        return Action::ExitMode;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => Action::MoveLeft,
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => Action::MoveRight,

        (KeyCode::Char(' '), _) | (KeyCode::Enter, _) => Action::Flip,

        (KeyCode::Char(c @ '1'..='4'), _) => {
            let index = c as usize - '1' as usize;
            Action::ToggleCategory(Category::ALL[index])
        }

        (KeyCode::Char('n'), KeyModifiers::NONE) | (KeyCode::PageDown, _) => Action::NextPage,
        (KeyCode::Char('p'), KeyModifiers::NONE) | (KeyCode::PageUp, _) => Action::PreviousPage,

        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Reload,
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::OpenInBrowser,

        (KeyCode::Char('/'), _) => Action::StartSearch,
        (KeyCode::Esc, _) if app.search.is_some() => Action::ClearSearch,
        (KeyCode::Char('?'), _) => Action::ShowHelp,

        _ => Action::None,
    }
}

/// Handle key events while editing the search text
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Key reference shown in the help popup
pub const KEY_HELP: &[(&str, &str)] = &[
    ("Space / Enter", "Flip card"),
    ("h j k l / arrows", "Move between cards"),
    ("1 2 3 4", "Toggle Entertainment, Sports, Crime, Politics"),
    ("n / p", "Next / previous page"),
    ("/", "Search (Esc clears)"),
    ("r", "Reload page"),
    ("o", "Open article in browser"),
    ("?", "Help"),
    ("q", "Quit"),
];
