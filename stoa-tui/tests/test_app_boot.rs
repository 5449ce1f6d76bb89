//! Boot flow tests
//!
//! Drives the service layer with the mock API and folds its events into
//! application state the way the main loop does.

use std::sync::Arc;
use std::time::Duration;

use libstoa::api::{MockApiConfig, MockFeedApi};
use stoa_tui::app::{reduce, Action, AppState};
use stoa_tui::services::{FeedEvent, ServiceHandle};

fn apply_events(
    mut state: AppState,
    rx: &crossbeam_channel::Receiver<FeedEvent>,
    expected: usize,
) -> AppState {
    for _ in 0..expected {
        let event = rx.recv_timeout(Duration::from_secs(5)).expect("no event");
        let action = match event {
            FeedEvent::Refreshed(snapshot) => Action::FeedRefreshed(snapshot),
            FeedEvent::Status(message) => Action::SetStatus(message),
            FeedEvent::Error(message) => Action::ShowError(message),
        };
        state = reduce(state, action);
    }
    state
}

#[test]
fn boot_renders_loading_then_the_feed() {
    let api = Arc::new(MockFeedApi::with_posts(vec![
        MockFeedApi::post(1, "first", 1),
        MockFeedApi::post(2, "second", 2),
    ]));
    let (services, rx) = ServiceHandle::new(api, 1).unwrap();

    let state = AppState::new(services.initial_snapshot());
    assert!(state.feed.loading);
    assert!(state.feed.posts.results.is_empty());

    services.load_posts();
    let state = apply_events(state, &rx, 1);

    assert!(!state.feed.loading);
    assert_eq!(state.feed.posts.count, 2);
    assert_eq!(state.feed.posts.results[0].content, "first");
}

#[test]
fn boot_with_failing_backend_settles_empty() {
    let api = Arc::new(MockFeedApi::failure(500));
    let (services, rx) = ServiceHandle::new(api, 1).unwrap();

    let state = AppState::new(services.initial_snapshot());
    services.load_posts();
    let state = apply_events(state, &rx, 1);

    // Loading cleared, feed empty, no crash.
    assert!(!state.feed.loading);
    assert_eq!(state.feed.posts.count, 0);
    assert!(state.error.is_none());
}

#[test]
fn comment_error_surfaces_as_overlay() {
    let api = Arc::new(MockFeedApi::new(MockApiConfig {
        create_comment_succeeds: false,
        ..Default::default()
    }));
    let (services, rx) = ServiceHandle::new(api, 1).unwrap();
    let state = AppState::new(services.initial_snapshot());

    services.add_comment(5, "doomed".to_string());
    let state = apply_events(state, &rx, 2); // Error + Refreshed

    assert!(state.error.as_deref().unwrap().contains("Failed to add comment"));
}

#[test]
fn thread_loads_once_and_lands_in_state() {
    let api = Arc::new(MockFeedApi::with_posts(vec![MockFeedApi::post(1, "p", 1)]));
    api.seed_comments(1, vec![MockFeedApi::comment(7, "hello", 2)]);
    let (services, rx) = ServiceHandle::new(api.clone(), 1).unwrap();

    let state = AppState::new(services.initial_snapshot());
    services.load_posts();
    services.load_comments(1);
    services.load_comments(1);
    let state = apply_events(state, &rx, 3);

    assert_eq!(api.call_count("list_comments"), 1);
    assert_eq!(state.feed.comments.get(&1).unwrap().len(), 1);
}
