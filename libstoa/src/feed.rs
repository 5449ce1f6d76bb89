//! Feed state
//!
//! [`FeedStore`] is the single source of truth for the post list and the
//! per-post comment threads, and the only component that drives [`FeedApi`]
//! for feed data. Frontends read its state and call its operations; they
//! must never hold their own mutable copy of posts or comments.
//!
//! Failure policy: every operation except [`FeedStore::add_comment`] swallows
//! its error after logging it. The user sees the absence of the expected
//! state change, never a crash, and nothing retries automatically. State is
//! applied only after server acknowledgment; there is no speculative insert
//! and no rollback machinery.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::actions::{ActionItem, ActionKind};
use crate::error::Result;
use crate::types::{Comment, NewComment, NewPost, Page, Post};
use crate::FeedApi;

/// Owner of all client-side feed state.
pub struct FeedStore {
    api: Arc<dyn FeedApi>,
    /// Author id stamped on posts created through [`FeedStore::add_post`].
    author_id: i64,
    posts: Page<Post>,
    comments: HashMap<i64, Vec<Comment>>,
    loading: bool,
}

/// A cloned view of the store for rendering.
///
/// Frames render from a snapshot; only the store mutates the underlying
/// state.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub loading: bool,
    pub posts: Page<Post>,
    pub comments: HashMap<i64, Vec<Comment>>,
}

impl FeedStore {
    /// Create a store over the given API.
    ///
    /// The store starts loading (empty feed, `loading` true) until the first
    /// [`FeedStore::load_posts`] settles.
    pub fn new(api: Arc<dyn FeedApi>, author_id: i64) -> Self {
        Self {
            api,
            author_id,
            posts: Page::default(),
            comments: HashMap::new(),
            loading: true,
        }
    }

    pub fn posts(&self) -> &Page<Post> {
        &self.posts
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The cached comment thread for a post; empty if never fetched.
    pub fn comments(&self, post_id: i64) -> &[Comment] {
        self.comments.get(&post_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a post's thread has been fetched.
    pub fn comments_loaded(&self, post_id: i64) -> bool {
        self.comments.contains_key(&post_id)
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            loading: self.loading,
            posts: self.posts.clone(),
            comments: self.comments.clone(),
        }
    }

    /// Fetch the feed and replace the page state.
    ///
    /// On failure the state stays as initialized (empty list, count 0). The
    /// loading flag is cleared on every path so the UI never hangs.
    pub async fn load_posts(&mut self) {
        self.loading = true;
        match self.api.list_posts().await {
            Ok(page) => {
                debug!(count = page.count, "loaded feed");
                self.posts = page;
            }
            Err(e) => warn!("Failed to fetch posts: {}", e),
        }
        self.loading = false;
    }

    /// Create a post and prepend the server-populated result.
    ///
    /// Blank content is a no-op, not an error: no request is made and the
    /// state is unchanged. On failure the post simply does not appear.
    pub async fn add_post(&mut self, content: &str) {
        if content.trim().is_empty() {
            return;
        }

        let new_post = NewPost {
            content: content.to_string(),
            author_id: self.author_id,
        };

        match self.api.create_post(&new_post).await {
            Ok(post) => {
                self.posts.results.insert(0, post);
                self.posts.count += 1;
            }
            Err(e) => warn!("Error adding post: {}", e),
        }
    }

    /// Delete a post, removing exactly the matching entry on acknowledgment.
    ///
    /// The post's cached comment thread goes with it. On failure the entry
    /// remains.
    pub async fn delete_post(&mut self, post_id: i64) {
        match self.api.delete_post(post_id).await {
            Ok(()) => {
                let before = self.posts.results.len();
                self.posts.results.retain(|p| p.id != Some(post_id));
                self.posts.count = self.posts.count.saturating_sub(before - self.posts.results.len());
                self.comments.remove(&post_id);
            }
            Err(e) => warn!("Error deleting post {}: {}", post_id, e),
        }
    }

    /// Fetch a post's comment thread into the cache and return it.
    ///
    /// The cache is authoritative and the return value is a view of it. On
    /// failure the cache is untouched and an empty slice is returned.
    pub async fn load_comments(&mut self, post_id: i64) -> &[Comment] {
        match self.api.list_comments(post_id).await {
            Ok(thread) => {
                self.comments.insert(post_id, thread);
                self.comments(post_id)
            }
            Err(e) => {
                warn!("Error fetching comments for post {}: {}", post_id, e);
                &[]
            }
        }
    }

    /// Fetch a post's thread only if it has never been fetched.
    ///
    /// Threads load lazily, once per distinct post; re-renders are served
    /// from the cache.
    pub async fn ensure_comments(&mut self, post_id: i64) -> &[Comment] {
        if self.comments_loaded(post_id) {
            return self.comments(post_id);
        }
        self.load_comments(post_id).await
    }

    /// Create a comment and append it to the post's cached thread.
    ///
    /// Unlike the other operations this propagates failure to the caller,
    /// who must handle it.
    pub async fn add_comment(
        &mut self,
        post_id: i64,
        content: &str,
        author_id: i64,
    ) -> Result<Comment> {
        let new_comment = NewComment {
            content: content.to_string(),
            author_id,
        };

        let comment = self.api.create_comment(post_id, &new_comment).await?;
        self.comments
            .entry(post_id)
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    /// Delete a comment from a post's thread.
    ///
    /// Returns true when the backend acknowledged and the cache was updated,
    /// false when the request failed (the thread is left unchanged).
    pub async fn delete_comment(&mut self, post_id: i64, comment_id: i64) -> bool {
        match self.api.delete_comment(post_id, comment_id).await {
            Ok(()) => {
                if let Some(thread) = self.comments.get_mut(&post_id) {
                    thread.retain(|c| c.id != comment_id);
                }
                true
            }
            Err(e) => {
                warn!(
                    "Error deleting comment {} on post {}: {}",
                    comment_id, post_id, e
                );
                false
            }
        }
    }

    /// Dispatch a post action. Report yields a status message and makes no
    /// request; Delete delegates to [`FeedStore::delete_post`].
    pub async fn apply_post_action(&mut self, item: &ActionItem, post_id: i64) -> Option<String> {
        match item.kind {
            ActionKind::Report => Some(format!("Reported post {}", post_id)),
            ActionKind::Delete => {
                self.delete_post(post_id).await;
                None
            }
        }
    }

    /// Dispatch a comment action, keyed by `(post_id, comment_id)`.
    pub async fn apply_comment_action(
        &mut self,
        item: &ActionItem,
        post_id: i64,
        comment_id: i64,
    ) -> Option<String> {
        match item.kind {
            ActionKind::Report => Some(format!("Reported comment {}", comment_id)),
            ActionKind::Delete => {
                self.delete_comment(post_id, comment_id).await;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockFeedApi;

    fn store_with(mock: MockFeedApi) -> (Arc<MockFeedApi>, FeedStore) {
        let api = Arc::new(mock);
        let store = FeedStore::new(api.clone(), 1);
        (api, store)
    }

    #[tokio::test]
    async fn test_store_starts_loading() {
        let (_, store) = store_with(MockFeedApi::success());
        assert!(store.loading());
        assert_eq!(store.posts().count, 0);
    }

    #[tokio::test]
    async fn test_blank_post_is_a_no_op() {
        let (api, mut store) = store_with(MockFeedApi::success());

        store.add_post("").await;
        store.add_post("   ").await;

        assert_eq!(api.call_count("create_post"), 0);
        assert!(store.posts().results.is_empty());
    }

    #[tokio::test]
    async fn test_comments_default_empty() {
        let (_, store) = store_with(MockFeedApi::success());
        assert!(store.comments(5).is_empty());
        assert!(!store.comments_loaded(5));
    }

    #[tokio::test]
    async fn test_ensure_comments_fetches_once() {
        let (api, mut store) = store_with(MockFeedApi::success());
        api.seed_comments(5, vec![MockFeedApi::comment(1, "hi", 2)]);

        store.ensure_comments(5).await;
        store.ensure_comments(5).await;

        assert_eq!(api.call_count("list_comments"), 1);
        assert_eq!(store.comments(5).len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_is_detached() {
        let (_, mut store) = store_with(MockFeedApi::success());
        store.load_posts().await;

        let snapshot = store.snapshot();
        store.add_post("after snapshot").await;

        assert!(snapshot.posts.results.is_empty());
        assert_eq!(store.posts().results.len(), 1);
    }
}
