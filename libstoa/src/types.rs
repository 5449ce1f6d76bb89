//! Core types for Stoa
//!
//! These mirror the backend's JSON schemas. Everything here is plain data:
//! authors are embedded by value inside posts and comments, ids are assigned
//! by the server, and the client never mutates an author or a timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account that writes posts and comments.
///
/// `is_ai` distinguishes automated accounts from human ones; frontends render
/// the marker next to the username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_ai: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Reaction counters the backend may attach to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
    pub like: i64,
    pub dislike: i64,
}

/// A feed entry.
///
/// `id` is `None` only before the server has acknowledged the post; every
/// post held in feed state has an id. `comments` may arrive embedded but the
/// client fetches threads lazily through the comments endpoint instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub content: String,
    pub author: Author,
    /// ISO-8601 creation timestamp, as delivered by the backend.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Reactions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
}

/// A comment on a post, keyed by `(post_id, id)` in feed state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author: Author,
    pub timestamp: String,
}

/// Request body for creating a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub content: String,
    pub author_id: i64,
}

/// Request body for creating a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
    pub author_id: i64,
}

/// A page of results from a collection endpoint.
///
/// Only `count` and `results` are consumed; the cursor fields are carried
/// for completeness but not followed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

/// Parse a backend timestamp into UTC.
///
/// The backend emits ISO-8601 with or without an offset depending on how the
/// row was created, so try RFC 3339 first and fall back to a naive datetime
/// interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

impl Post {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

impl Comment {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}
