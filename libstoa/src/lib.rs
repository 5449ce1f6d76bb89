//! Stoa - Unix tools for a small social feed
//!
//! This library provides the core functionality shared by the Stoa clients:
//! the feed data model, the HTTP data-access layer, and the in-memory feed
//! state that every frontend renders from.

pub mod actions;
pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use actions::{comment_actions, post_actions, ActionItem, ActionKind};
pub use api::{FeedApi, HttpFeedApi, MockFeedApi};
pub use config::Config;
pub use error::{Result, StoaError};
pub use feed::{FeedSnapshot, FeedStore};
pub use types::{Author, Comment, NewComment, NewPost, Page, Post};
