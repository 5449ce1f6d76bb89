//! Service layer adapter for the TUI
//!
//! Bridges the async feed store to the synchronous event loop. The store
//! lives behind a tokio runtime owned here; every operation is spawned as a
//! task and completes by sending a [`FeedEvent`] over a crossbeam channel
//! that the event loop drains each tick. The UI thread never blocks on the
//! network.
//!
//! There is no cancellation: a result arriving for a view the user already
//! navigated away from still updates the store and is rendered (or not) from
//! the next snapshot, harmlessly.

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tokio::sync::Mutex;

use libstoa::actions::ActionItem;
use libstoa::feed::{FeedSnapshot, FeedStore};
use libstoa::FeedApi;

use crate::error::Result;

/// Completion events from store operations
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// The store settled an operation; this is its new state
    Refreshed(FeedSnapshot),

    /// A status bar message (report acknowledgments and the like)
    Status(String),

    /// A failure the user must see (comment creation propagates its error)
    Error(String),
}

/// Handle through which the event loop drives the feed store
pub struct ServiceHandle {
    store: Arc<Mutex<FeedStore>>,
    runtime: tokio::runtime::Runtime,
    tx: Sender<FeedEvent>,
    author_id: i64,
}

impl ServiceHandle {
    /// Create a handle over the given API.
    ///
    /// Returns the handle and the receiver the event loop should drain.
    pub fn new(api: Arc<dyn FeedApi>, author_id: i64) -> Result<(Self, Receiver<FeedEvent>)> {
        let runtime = tokio::runtime::Runtime::new()?;
        let store = Arc::new(Mutex::new(FeedStore::new(api, author_id)));
        let (tx, rx) = unbounded();

        Ok((
            Self {
                store,
                runtime,
                tx,
                author_id,
            },
            rx,
        ))
    }

    /// The store's current state, for initial rendering
    pub fn initial_snapshot(&self) -> FeedSnapshot {
        self.runtime
            .block_on(async { self.store.lock().await.snapshot() })
    }

    /// Fetch the feed. Called once at startup and again on manual refresh.
    pub fn load_posts(&self) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let mut store = store.lock().await;
            store.load_posts().await;
            let _ = tx.send(FeedEvent::Refreshed(store.snapshot()));
        });
    }

    /// Fetch a post's comment thread if it has never been fetched.
    pub fn load_comments(&self, post_id: i64) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let mut store = store.lock().await;
            store.ensure_comments(post_id).await;
            let _ = tx.send(FeedEvent::Refreshed(store.snapshot()));
        });
    }

    /// Create a post with the configured default author.
    pub fn add_post(&self, content: String) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let mut store = store.lock().await;
            store.add_post(&content).await;
            let _ = tx.send(FeedEvent::Refreshed(store.snapshot()));
        });
    }

    /// Create a comment on a post.
    ///
    /// Comment creation is the one operation whose failure the store
    /// propagates, so it surfaces as a [`FeedEvent::Error`].
    pub fn add_comment(&self, post_id: i64, content: String) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        let author_id = self.author_id;
        self.runtime.spawn(async move {
            let mut store = store.lock().await;
            if let Err(e) = store.add_comment(post_id, &content, author_id).await {
                tracing::warn!("Error adding comment: {}", e);
                let _ = tx.send(FeedEvent::Error(format!("Failed to add comment: {}", e)));
            }
            let _ = tx.send(FeedEvent::Refreshed(store.snapshot()));
        });
    }

    /// Dispatch a Report/Delete action aimed at a post.
    pub fn apply_post_action(&self, item: ActionItem, post_id: i64) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let mut store = store.lock().await;
            if let Some(message) = store.apply_post_action(&item, post_id).await {
                let _ = tx.send(FeedEvent::Status(message));
            }
            let _ = tx.send(FeedEvent::Refreshed(store.snapshot()));
        });
    }

    /// Dispatch a Report/Delete action aimed at a comment.
    pub fn apply_comment_action(&self, item: ActionItem, post_id: i64, comment_id: i64) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let mut store = store.lock().await;
            if let Some(message) = store
                .apply_comment_action(&item, post_id, comment_id)
                .await
            {
                let _ = tx.send(FeedEvent::Status(message));
            }
            let _ = tx.send(FeedEvent::Refreshed(store.snapshot()));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libstoa::actions::post_actions;
    use libstoa::api::{MockApiConfig, MockFeedApi};
    use std::time::Duration;

    fn recv(rx: &Receiver<FeedEvent>) -> FeedEvent {
        rx.recv_timeout(Duration::from_secs(5)).expect("no event")
    }

    #[test]
    fn test_load_posts_emits_refreshed_snapshot() {
        let api = Arc::new(MockFeedApi::with_posts(vec![MockFeedApi::post(1, "hi", 1)]));
        let (services, rx) = ServiceHandle::new(api, 1).unwrap();

        assert!(services.initial_snapshot().loading);
        services.load_posts();

        match recv(&rx) {
            FeedEvent::Refreshed(snapshot) => {
                assert!(!snapshot.loading);
                assert_eq!(snapshot.posts.count, 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_report_action_emits_status_then_refreshed() {
        let api = Arc::new(MockFeedApi::with_posts(vec![MockFeedApi::post(1, "hi", 1)]));
        let (services, rx) = ServiceHandle::new(api, 1).unwrap();

        let report = post_actions()[0];
        services.apply_post_action(report, 1);

        match recv(&rx) {
            FeedEvent::Status(message) => assert_eq!(message, "Reported post 1"),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(matches!(recv(&rx), FeedEvent::Refreshed(_)));
    }

    #[test]
    fn test_failed_comment_emits_error() {
        let api = Arc::new(MockFeedApi::new(MockApiConfig {
            create_comment_succeeds: false,
            ..Default::default()
        }));
        let (services, rx) = ServiceHandle::new(api, 1).unwrap();

        services.add_comment(5, "doomed".to_string());

        match recv(&rx) {
            FeedEvent::Error(message) => assert!(message.contains("Failed to add comment")),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(matches!(recv(&rx), FeedEvent::Refreshed(_)));
    }
}
