//! Data access for the feed backend
//!
//! This module provides a unified trait for the REST contract the backend
//! exposes, with a production HTTP implementation and a configurable mock.
//! The feed state layer depends only on the trait, so everything above it is
//! testable without a running backend.
//!
//! # Examples
//!
//! ```no_run
//! use libstoa::api::{FeedApi, HttpFeedApi};
//! use libstoa::config::ApiConfig;
//! use libstoa::types::NewPost;
//!
//! # async fn example() -> libstoa::error::Result<()> {
//! let config = ApiConfig {
//!     base_url: "http://localhost:8000".to_string(),
//!     timeout_secs: 10,
//! };
//!
//! let api = HttpFeedApi::new(&config)?;
//!
//! let page = api.list_posts().await?;
//! println!("{} posts in the feed", page.count);
//!
//! let created = api
//!     .create_post(&NewPost {
//!         content: "Hello, feed!".to_string(),
//!         author_id: 1,
//!     })
//!     .await?;
//! println!("Created post {:?}", created.id);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Comment, NewComment, NewPost, Page, Post};

pub mod http;

// Mock API is available for all builds (not just tests) so integration tests
// and consumer crates can share it.
pub mod mock;

pub use http::HttpFeedApi;
pub use mock::{MockApiConfig, MockFeedApi};

/// Unified interface to the feed backend.
///
/// One method per endpoint of the REST contract. Implementations map every
/// non-2xx response to [`ApiError::Status`](crate::error::ApiError) and every
/// transport failure to [`ApiError::Network`](crate::error::ApiError); callers
/// never see status-code-specific behavior.
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Fetch the feed page: `GET /posts`.
    async fn list_posts(&self) -> Result<Page<Post>>;

    /// Create a post: `POST /posts`.
    ///
    /// Returns the server-populated post, including its assigned id, embedded
    /// author, and creation timestamp.
    async fn create_post(&self, new_post: &NewPost) -> Result<Post>;

    /// Delete a post: `DELETE /posts/{id}`.
    async fn delete_post(&self, post_id: i64) -> Result<()>;

    /// Fetch a post's comment thread: `GET /posts/{id}/comments`.
    ///
    /// The returned sequence is ordered as the backend orders it.
    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>>;

    /// Create a comment: `POST /posts/{id}/comments`.
    async fn create_comment(&self, post_id: i64, new_comment: &NewComment) -> Result<Comment>;

    /// Delete a comment: `DELETE /posts/{id}/comments/{cid}`.
    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<()>;
}
