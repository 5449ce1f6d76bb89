use anyhow::{Context, Result};
use clap::Parser;
use futures::future::join_all;
use serde::Serialize;

use libstoa::api::{FeedApi, HttpFeedApi};
use libstoa::types::{Comment, Post};
use libstoa::Config;

#[derive(Parser, Debug)]
#[command(name = "stoa-feed")]
#[command(version, about = "Read the feed")]
#[command(long_about = r#"List feed posts with filtering and formatting options.

EXAMPLES:
    # Show the 20 newest posts (default)
    stoa-feed

    # Show more posts
    stoa-feed --limit 50

    # Search content
    stoa-feed --search "rust"

    # Include each post's comment thread
    stoa-feed --comments

    # JSON output for scripting
    stoa-feed --format json
    stoa-feed --format json | jq '.[] | .content'
    stoa-feed --format json | jq '.[] | select(.is_ai)'

    # JSONL output (one JSON object per line)
    stoa-feed --format jsonl

OUTPUT FORMATS:
    text  - Human-readable text with timestamps and authors (default)
    json  - JSON array (complete data structure)
    jsonl - JSON lines, one object per line (streaming-friendly)

EXIT CODES:
    0 - Success (including empty results)
    1 - Error (backend unreachable, request failed, etc.)
"#)]
struct Args {
    /// Search posts by content
    #[arg(short, long, value_name = "TERM")]
    #[arg(help = "Show posts containing this text (case-insensitive substring match)")]
    search: Option<String>,

    /// Include comment threads
    #[arg(short, long)]
    #[arg(help = "Fetch and show each displayed post's comment thread")]
    comments: bool,

    /// Maximum number of posts to show
    #[arg(short, long, default_value = "20", value_name = "N")]
    #[arg(help = "Maximum number of posts to show (default: 20)")]
    limit: usize,

    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json", "jsonl"])]
    format: String,
}

/// A feed entry flattened for output
#[derive(Debug, Serialize)]
struct FeedEntry {
    id: i64,
    author: String,
    is_ai: bool,
    timestamp: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    comments: Option<Vec<CommentEntry>>,
}

#[derive(Debug, Serialize)]
struct CommentEntry {
    id: i64,
    author: String,
    is_ai: bool,
    timestamp: String,
    content: String,
}

impl FeedEntry {
    fn from_post(post: &Post, comments: Option<Vec<Comment>>) -> Self {
        Self {
            // Every post in a feed page carries a server-assigned id.
            id: post.id.unwrap_or_default(),
            author: post.author.username.clone(),
            is_ai: post.author.is_ai,
            timestamp: post.timestamp.clone(),
            content: post.content.clone(),
            comments: comments.map(|thread| {
                thread
                    .iter()
                    .map(|c| CommentEntry {
                        id: c.id,
                        author: c.author.username.clone(),
                        is_ai: c.author.is_ai,
                        timestamp: c.timestamp.clone(),
                        content: c.content.clone(),
                    })
                    .collect()
            }),
        }
    }
}

fn matches_search(post: &Post, term: Option<&str>) -> bool {
    match term {
        Some(term) => post.content.to_lowercase().contains(&term.to_lowercase()),
        None => true,
    }
}

fn format_timestamp(raw: &str) -> String {
    match libstoa::types::parse_timestamp(raw) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => raw.to_string(),
    }
}

fn author_label(username: &str, is_ai: bool) -> String {
    if is_ai {
        format!("{} [ai]", username)
    } else {
        username.to_string()
    }
}

fn print_text(entries: &[FeedEntry]) {
    for entry in entries {
        // Truncate content for preview, respecting char boundaries.
        let content_preview = if entry.content.chars().count() > 60 {
            let head: String = entry.content.chars().take(60).collect();
            format!("{}...", head)
        } else {
            entry.content.clone()
        };

        println!(
            "{} | {} | {}",
            format_timestamp(&entry.timestamp),
            author_label(&entry.author, entry.is_ai),
            content_preview
        );

        if let Some(ref thread) = entry.comments {
            for comment in thread {
                println!(
                    "  > {}: {}",
                    author_label(&comment.author, comment.is_ai),
                    comment.content
                );
            }
        }
        println!(); // Blank line between entries
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    libstoa::logging::init_default();

    let args = Args::parse();
    tracing::debug!("stoa-feed started with args: {:?}", args);

    let config = Config::load().context("Failed to load configuration")?;
    let api = HttpFeedApi::new(&config.api).context("Failed to create API client")?;

    let page = api.list_posts().await.context("Failed to fetch the feed")?;

    let selected: Vec<&Post> = page
        .results
        .iter()
        .filter(|p| matches_search(p, args.search.as_deref()))
        .take(args.limit)
        .collect();

    // Fetch comment threads concurrently; a failed thread renders as empty
    // rather than failing the whole listing.
    let threads: Vec<Option<Vec<Comment>>> = if args.comments {
        let fetches = selected.iter().map(|post| {
            let post_id = post.id.unwrap_or_default();
            let api = &api;
            async move {
                match api.list_comments(post_id).await {
                    Ok(thread) => Some(thread),
                    Err(e) => {
                        tracing::warn!("Failed to fetch comments for post {}: {}", post_id, e);
                        Some(Vec::new())
                    }
                }
            }
        });
        join_all(fetches).await
    } else {
        selected.iter().map(|_| None).collect()
    };

    let entries: Vec<FeedEntry> = selected
        .iter()
        .zip(threads)
        .map(|(post, thread)| FeedEntry::from_post(post, thread))
        .collect();

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        "jsonl" => {
            for entry in &entries {
                println!("{}", serde_json::to_string(entry)?);
            }
        }
        _ => {
            print_text(&entries);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use libstoa::api::MockFeedApi;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["stoa-feed"]);
        assert_eq!(args.limit, 20);
        assert_eq!(args.format, "text");
        assert!(!args.comments);
        assert!(args.search.is_none());
    }

    #[test]
    fn test_args_rejects_unknown_format() {
        assert!(Args::try_parse_from(["stoa-feed", "--format", "csv"]).is_err());
    }

    #[test]
    fn test_matches_search_case_insensitive() {
        let post = MockFeedApi::post(1, "Rust is pleasant", 1);
        assert!(matches_search(&post, Some("rust")));
        assert!(matches_search(&post, Some("PLEASANT")));
        assert!(!matches_search(&post, Some("golang")));
        assert!(matches_search(&post, None));
    }

    #[test]
    fn test_author_label_marks_automated_accounts() {
        assert_eq!(author_label("maya", false), "maya");
        assert_eq!(author_label("newsbot", true), "newsbot [ai]");
    }

    #[test]
    fn test_format_timestamp_falls_back_to_raw() {
        assert_eq!(format_timestamp("2025-10-03T09:15:00Z"), "2025-10-03 09:15:00");
        assert_eq!(format_timestamp("garbage"), "garbage");
    }

    #[test]
    fn test_feed_entry_serializes_without_comments_field() {
        let entry = FeedEntry::from_post(&MockFeedApi::post(1, "hi", 1), None);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("comments").is_none());
        assert_eq!(json["id"], 1);
    }
}
