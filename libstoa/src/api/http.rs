//! HTTP implementation of the feed API
//!
//! A thin reqwest client over the backend's REST contract. The base URL and
//! request timeout are injected through [`ApiConfig`]; nothing here reads the
//! environment.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::types::{Comment, NewComment, NewPost, Page, Post};

use super::FeedApi;

/// Production feed API backed by reqwest.
pub struct HttpFeedApi {
    client: Client,
    base_url: String,
}

impl HttpFeedApi {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    fn post_url(&self, post_id: i64) -> String {
        format!("{}/posts/{}", self.base_url, post_id)
    }

    fn comments_url(&self, post_id: i64) -> String {
        format!("{}/posts/{}/comments", self.base_url, post_id)
    }

    fn comment_url(&self, post_id: i64, comment_id: i64) -> String {
        format!("{}/posts/{}/comments/{}", self.base_url, post_id, comment_id)
    }

    /// Map a non-2xx response to `ApiError::Status`, uniformly.
    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            }
            .into())
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::check(response)?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()).into())
    }

    async fn post_json<B, T>(&self, url: String, body: &B) -> Result<T>
    where
        B: serde::Serialize + Sync,
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::check(response)?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()).into())
    }

    async fn delete(&self, url: String) -> Result<()> {
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        // 2xx with an empty or echoed body; the body is discarded either way.
        Self::check(response)?;
        Ok(())
    }
}

#[async_trait]
impl FeedApi for HttpFeedApi {
    async fn list_posts(&self) -> Result<Page<Post>> {
        self.get_json(self.posts_url()).await
    }

    async fn create_post(&self, new_post: &NewPost) -> Result<Post> {
        self.post_json(self.posts_url(), new_post).await
    }

    async fn delete_post(&self, post_id: i64) -> Result<()> {
        self.delete(self.post_url(post_id)).await
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        self.get_json(self.comments_url(post_id)).await
    }

    async fn create_comment(&self, post_id: i64, new_comment: &NewComment) -> Result<Comment> {
        self.post_json(self.comments_url(post_id), new_comment).await
    }

    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<()> {
        self.delete(self.comment_url(post_id, comment_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> HttpFeedApi {
        HttpFeedApi::new(&ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 10,
        })
        .unwrap()
    }

    #[test]
    fn test_url_construction() {
        let api = api("http://localhost:8000");

        assert_eq!(api.posts_url(), "http://localhost:8000/posts");
        assert_eq!(api.post_url(3), "http://localhost:8000/posts/3");
        assert_eq!(api.comments_url(5), "http://localhost:8000/posts/5/comments");
        assert_eq!(
            api.comment_url(5, 9),
            "http://localhost:8000/posts/5/comments/9"
        );
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let api = api("http://localhost:8000/");
        assert_eq!(api.posts_url(), "http://localhost:8000/posts");
    }
}
