//! Key bindings
//!
//! Maps key events to semantic actions, by mode. Overlays win over the
//! active screen: error > help > menu > composer > screen keys. When a
//! composer is open, everything not handled here is fed to the text area by
//! the main loop.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::actions::{Action, Screen};
use super::state::AppState;

pub fn map_key(state: &AppState, key: KeyEvent) -> Action {
    if state.error.is_some() {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => Action::DismissError,
            _ => Action::Noop,
        };
    }

    if state.help_visible {
        return match key.code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') => Action::HideHelp,
            _ => Action::Noop,
        };
    }

    if state.menu.is_some() {
        return match key.code {
            KeyCode::Esc => Action::MenuCancel,
            KeyCode::Up | KeyCode::Char('k') => Action::MenuPrevious,
            KeyCode::Down | KeyCode::Char('j') => Action::MenuNext,
            KeyCode::Enter => Action::MenuSelect,
            _ => Action::Noop,
        };
    }

    if state.composer.is_some() {
        // Everything else goes to the text area.
        return match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Action::ComposerCancel,
            (KeyCode::Enter, KeyModifiers::NONE) => Action::ComposerSubmit,
            _ => Action::Noop,
        };
    }

    match state.current_screen {
        Screen::Feed => feed_key(key),
        Screen::Profile => profile_key(key),
    }
}

fn feed_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') | KeyCode::F(1) => Action::ShowHelp,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::Char('J') => Action::SelectNextComment,
        KeyCode::Char('K') => Action::SelectPreviousComment,
        KeyCode::Enter => Action::ToggleThread,
        KeyCode::Char('n') => Action::OpenComposer,
        KeyCode::Char('c') => Action::OpenCommentInput,
        KeyCode::Char('a') => Action::OpenMenu,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('p') => Action::NavigateTo(Screen::Profile),
        _ => Action::Noop,
    }
}

fn profile_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') | KeyCode::F(1) => Action::ShowHelp,
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('f') => Action::NavigateTo(Screen::Feed),
        _ => Action::Noop,
    }
}
