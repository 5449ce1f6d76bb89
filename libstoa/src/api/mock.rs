//! Mock feed API for testing
//!
//! A configurable in-memory backend that can simulate successes, failures,
//! and latency per operation. Integration tests use it to drive the feed
//! state layer without network access; it also records calls so tests can
//! assert that an operation did (or did not) reach the backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::error::{ApiError, Result};
use crate::types::{Author, Comment, NewComment, NewPost, Page, Post};

use super::FeedApi;

/// Configuration for mock API behavior
#[derive(Debug, Clone)]
pub struct MockApiConfig {
    /// Whether `list_posts` succeeds
    pub list_posts_succeeds: bool,

    /// Whether `create_post` succeeds
    pub create_post_succeeds: bool,

    /// Whether `delete_post` succeeds
    pub delete_post_succeeds: bool,

    /// Whether `list_comments` succeeds
    pub list_comments_succeeds: bool,

    /// Whether `create_comment` succeeds
    pub create_comment_succeeds: bool,

    /// Whether `delete_comment` succeeds
    pub delete_comment_succeeds: bool,

    /// HTTP status reported by failing operations
    pub fail_status: u16,

    /// Delay before completing operations (simulates network latency)
    pub delay: Duration,
}

impl Default for MockApiConfig {
    fn default() -> Self {
        Self {
            list_posts_succeeds: true,
            create_post_succeeds: true,
            delete_post_succeeds: true,
            list_comments_succeeds: true,
            create_comment_succeeds: true,
            delete_comment_succeeds: true,
            fail_status: 500,
            delay: Duration::from_millis(0),
        }
    }
}

/// In-memory mock of the feed backend
pub struct MockFeedApi {
    config: MockApiConfig,
    posts: Mutex<Vec<Post>>,
    comments: Mutex<HashMap<i64, Vec<Comment>>>,
    next_id: Mutex<i64>,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl MockFeedApi {
    /// Create a new mock with the given configuration
    pub fn new(config: MockApiConfig) -> Self {
        Self {
            config,
            posts: Mutex::new(Vec::new()),
            comments: Mutex::new(HashMap::new()),
            next_id: Mutex::new(100),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock where every operation succeeds
    pub fn success() -> Self {
        Self::new(MockApiConfig::default())
    }

    /// Create a mock where every operation fails with the given status
    pub fn failure(status: u16) -> Self {
        Self::new(MockApiConfig {
            list_posts_succeeds: false,
            create_post_succeeds: false,
            delete_post_succeeds: false,
            list_comments_succeeds: false,
            create_comment_succeeds: false,
            delete_comment_succeeds: false,
            fail_status: status,
            ..Default::default()
        })
    }

    /// Create a successful mock seeded with posts
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let mock = Self::success();
        *mock.posts.lock().unwrap() = posts;
        mock
    }

    /// Seed a post's comment thread
    pub fn seed_comments(&self, post_id: i64, comments: Vec<Comment>) {
        self.comments.lock().unwrap().insert(post_id, comments);
    }

    /// Build an author for server-populated responses
    pub fn author(id: i64) -> Author {
        Author {
            id,
            username: format!("user-{}", id),
            email: format!("user-{}@example.com", id),
            is_ai: false,
            avatar: None,
        }
    }

    /// Build a post the way the backend would return it
    pub fn post(id: i64, content: &str, author_id: i64) -> Post {
        Post {
            id: Some(id),
            content: content.to_string(),
            author: Self::author(author_id),
            timestamp: "2025-10-03T09:15:00Z".to_string(),
            reactions: None,
            comments: None,
        }
    }

    /// Build a comment the way the backend would return it
    pub fn comment(id: i64, content: &str, author_id: i64) -> Comment {
        Comment {
            id,
            content: content.to_string(),
            author: Self::author(author_id),
            timestamp: "2025-10-03T09:20:00Z".to_string(),
        }
    }

    /// All operations invoked on this mock, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of times the named operation was invoked
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == operation)
            .count()
    }

    fn next_id(&self) -> i64 {
        let mut guard = self.next_id.lock().unwrap();
        let id = *guard;
        *guard += 1;
        id
    }

    async fn begin(&self, operation: &'static str, succeeds: bool) -> Result<()> {
        self.calls.lock().unwrap().push(operation);

        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        if succeeds {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: self.config.fail_status,
                url: format!("mock://{}", operation),
            }
            .into())
        }
    }
}

#[async_trait]
impl FeedApi for MockFeedApi {
    async fn list_posts(&self) -> Result<Page<Post>> {
        self.begin("list_posts", self.config.list_posts_succeeds)
            .await?;

        let posts = self.posts.lock().unwrap().clone();
        Ok(Page {
            count: posts.len(),
            next: None,
            previous: None,
            results: posts,
        })
    }

    async fn create_post(&self, new_post: &NewPost) -> Result<Post> {
        self.begin("create_post", self.config.create_post_succeeds)
            .await?;

        let post = Self::post(self.next_id(), &new_post.content, new_post.author_id);
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn delete_post(&self, post_id: i64) -> Result<()> {
        self.begin("delete_post", self.config.delete_post_succeeds)
            .await?;

        self.posts
            .lock()
            .unwrap()
            .retain(|p| p.id != Some(post_id));
        self.comments.lock().unwrap().remove(&post_id);
        Ok(())
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        self.begin("list_comments", self.config.list_comments_succeeds)
            .await?;

        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(&post_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_comment(&self, post_id: i64, new_comment: &NewComment) -> Result<Comment> {
        self.begin("create_comment", self.config.create_comment_succeeds)
            .await?;

        let comment = Self::comment(self.next_id(), &new_comment.content, new_comment.author_id);
        self.comments
            .lock()
            .unwrap()
            .entry(post_id)
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<()> {
        self.begin("delete_comment", self.config.delete_comment_succeeds)
            .await?;

        if let Some(thread) = self.comments.lock().unwrap().get_mut(&post_id) {
            thread.retain(|c| c.id != comment_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_success() {
        let mock = MockFeedApi::with_posts(vec![MockFeedApi::post(1, "first", 1)]);

        let page = mock.list_posts().await.unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].content, "first");
        assert_eq!(mock.call_count("list_posts"), 1);
    }

    #[tokio::test]
    async fn test_mock_create_post_assigns_id() {
        let mock = MockFeedApi::success();

        let created = mock
            .create_post(&NewPost {
                content: "hello".to_string(),
                author_id: 1,
            })
            .await
            .unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.content, "hello");
        assert_eq!(created.author.id, 1);

        let page = mock.list_posts().await.unwrap();
        assert_eq!(page.count, 1);
    }

    #[tokio::test]
    async fn test_mock_failure_status() {
        let mock = MockFeedApi::failure(503);

        let err = mock.list_posts().await.unwrap_err();
        assert!(err.to_string().contains("503"));
        assert_eq!(mock.call_count("list_posts"), 1);
    }

    #[tokio::test]
    async fn test_mock_comment_thread_scoping() {
        let mock = MockFeedApi::success();
        mock.seed_comments(5, vec![MockFeedApi::comment(1, "on five", 2)]);

        let thread = mock.list_comments(5).await.unwrap();
        assert_eq!(thread.len(), 1);

        let other = mock.list_comments(6).await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_mock_delete_comment() {
        let mock = MockFeedApi::success();
        mock.seed_comments(
            5,
            vec![
                MockFeedApi::comment(1, "keep", 2),
                MockFeedApi::comment(2, "drop", 2),
            ],
        );

        mock.delete_comment(5, 2).await.unwrap();

        let thread = mock.list_comments(5).await.unwrap();
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].id, 1);
    }

    #[tokio::test]
    async fn test_mock_with_delay() {
        let mock = MockFeedApi::new(MockApiConfig {
            delay: Duration::from_millis(50),
            ..Default::default()
        });

        let start = std::time::Instant::now();
        mock.list_posts().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_mock_records_calls_in_order() {
        let mock = MockFeedApi::success();

        mock.list_posts().await.unwrap();
        mock.delete_post(1).await.unwrap();

        assert_eq!(mock.calls(), vec!["list_posts", "delete_post"]);
    }
}
