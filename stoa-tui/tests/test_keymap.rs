//! Keymap tests
//!
//! Verifies that key events map to the right semantic actions per mode, and
//! that overlays take precedence over screen keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use libstoa::api::MockFeedApi;
use libstoa::feed::FeedSnapshot;
use libstoa::types::Page;
use stoa_tui::app::{map_key, reduce, Action, AppState, Screen};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn state_with_posts(n: usize) -> AppState {
    let results: Vec<_> = (1..=n as i64)
        .map(|i| MockFeedApi::post(i, "post", 1))
        .collect();
    AppState::new(FeedSnapshot {
        loading: false,
        posts: Page {
            count: results.len(),
            next: None,
            previous: None,
            results,
        },
        ..Default::default()
    })
}

#[test]
fn feed_keys_map_to_navigation() {
    let state = state_with_posts(2);

    assert!(matches!(map_key(&state, key(KeyCode::Char('q'))), Action::Quit));
    assert!(matches!(
        map_key(&state, key(KeyCode::Char('j'))),
        Action::SelectNext
    ));
    assert!(matches!(
        map_key(&state, key(KeyCode::Char('k'))),
        Action::SelectPrevious
    ));
    assert!(matches!(
        map_key(&state, key(KeyCode::Enter)),
        Action::ToggleThread
    ));
    assert!(matches!(
        map_key(&state, key(KeyCode::Char('n'))),
        Action::OpenComposer
    ));
    assert!(matches!(
        map_key(&state, key(KeyCode::Char('a'))),
        Action::OpenMenu
    ));
    assert!(matches!(
        map_key(&state, key(KeyCode::Char('r'))),
        Action::Refresh
    ));
}

#[test]
fn shifted_jk_select_comments() {
    let state = state_with_posts(1);
    assert!(matches!(
        map_key(&state, KeyEvent::new(KeyCode::Char('J'), KeyModifiers::SHIFT)),
        Action::SelectNextComment
    ));
    assert!(matches!(
        map_key(&state, KeyEvent::new(KeyCode::Char('K'), KeyModifiers::SHIFT)),
        Action::SelectPreviousComment
    ));
}

#[test]
fn composer_owns_most_keys() {
    let mut state = state_with_posts(1);
    state = reduce(state, Action::OpenComposer);

    assert!(matches!(
        map_key(&state, key(KeyCode::Enter)),
        Action::ComposerSubmit
    ));
    assert!(matches!(
        map_key(&state, key(KeyCode::Esc)),
        Action::ComposerCancel
    ));
    // Ordinary characters go to the text area, not the keymap.
    assert!(matches!(
        map_key(&state, key(KeyCode::Char('q'))),
        Action::Noop
    ));
}

#[test]
fn menu_keys_navigate_and_dispatch() {
    let mut state = state_with_posts(1);
    state = reduce(state, Action::OpenMenu);

    assert!(matches!(
        map_key(&state, key(KeyCode::Char('j'))),
        Action::MenuNext
    ));
    assert!(matches!(
        map_key(&state, key(KeyCode::Char('k'))),
        Action::MenuPrevious
    ));
    assert!(matches!(
        map_key(&state, key(KeyCode::Enter)),
        Action::MenuSelect
    ));
    assert!(matches!(
        map_key(&state, key(KeyCode::Esc)),
        Action::MenuCancel
    ));
}

#[test]
fn error_overlay_takes_precedence() {
    let mut state = state_with_posts(1);
    state = reduce(state, Action::OpenComposer);
    state = reduce(state, Action::ShowError("boom".to_string()));

    assert!(matches!(
        map_key(&state, key(KeyCode::Esc)),
        Action::DismissError
    ));
    // Everything else is inert while the overlay is up.
    assert!(matches!(
        map_key(&state, key(KeyCode::Char('x'))),
        Action::Noop
    ));
}

#[test]
fn profile_screen_returns_to_feed() {
    let mut state = state_with_posts(1);
    state = reduce(state, Action::NavigateTo(Screen::Profile));

    assert!(matches!(
        map_key(&state, key(KeyCode::Esc)),
        Action::NavigateTo(Screen::Feed)
    ));
    assert!(matches!(map_key(&state, key(KeyCode::Char('q'))), Action::Quit));
}

#[test]
fn help_overlay_closes_on_question_mark() {
    let mut state = state_with_posts(1);
    state = reduce(state, Action::ShowHelp);

    assert!(matches!(
        map_key(&state, key(KeyCode::Char('?'))),
        Action::HideHelp
    ));
}
