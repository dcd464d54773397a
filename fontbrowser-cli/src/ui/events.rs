//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{BrowserState, InputMode};

/// What a key press asks the browser to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Install,
    EnterSearch,
    ExitSearch,
    ResetSearch,
    Next,
    Previous,
    First,
    Last,
    Type(char),
    Backspace,
    None,
}

/// Map a key press to an action for the current input mode.
pub fn map_key(mode: InputMode, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match mode {
        InputMode::Normal => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
            KeyCode::Enter | KeyCode::Char('i') => Action::Install,
            KeyCode::Char('/') => Action::EnterSearch,
            KeyCode::Char('r') => Action::ResetSearch,
            KeyCode::Down | KeyCode::Char('j') => Action::Next,
            KeyCode::Up | KeyCode::Char('k') => Action::Previous,
            KeyCode::Home | KeyCode::Char('g') => Action::First,
            KeyCode::End | KeyCode::Char('G') => Action::Last,
            _ => Action::None,
        },
        InputMode::Search => match key.code {
            KeyCode::Enter | KeyCode::Esc => Action::ExitSearch,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Down => Action::Next,
            KeyCode::Up => Action::Previous,
            KeyCode::Char(c) => Action::Type(c),
            _ => Action::None,
        },
    }
}

/// Apply `action` to `state`.
///
/// Returns the package to install when the action starts an install.
pub fn apply(state: &mut BrowserState, action: Action) -> Option<&'static str> {
    match action {
        Action::Quit => state.quit(),
        Action::Install => return state.begin_install(),
        Action::EnterSearch => state.enter_search(),
        Action::ExitSearch => state.exit_search(),
        Action::ResetSearch => state.reset_search(),
        Action::Next => state.select_next(),
        Action::Previous => state.select_previous(),
        Action::First => state.select_first(),
        Action::Last => state.select_last(),
        Action::Type(c) => state.push_query_char(c),
        Action::Backspace => state.pop_query_char(),
        Action::None => {}
    }
    None
}
