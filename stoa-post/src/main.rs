//! stoa-post - Create posts and comments, or delete them

use std::io::Read;

use clap::Parser;

use libstoa::api::{FeedApi, HttpFeedApi};
use libstoa::types::{NewComment, NewPost};
use libstoa::validation::{validate_comment, validate_post};
use libstoa::{Config, Result, StoaError};

#[derive(Parser, Debug)]
#[command(name = "stoa-post")]
#[command(version, about = "Create posts and comments, or delete them", long_about = r#"Write to the feed.

EXAMPLES:
    # Create a post
    stoa-post "Hello, feed!"

    # Pipe content in
    echo "Hello from a script" | stoa-post

    # Comment on post 5
    stoa-post --comment 5 "nice one"

    # Delete post 3
    stoa-post --delete 3

    # Delete comment 9 on post 5
    stoa-post --delete-comment 5 9

EXIT CODES:
    0 - Success
    1 - Request failed (backend unreachable, non-2xx response, etc.)
    3 - Invalid input (blank or oversized content, nothing on stdin)
"#)]
struct Cli {
    /// Content to post (reads from stdin if not provided)
    content: Option<String>,

    /// Comment on the given post instead of creating a post
    #[arg(short, long, value_name = "POST_ID")]
    comment: Option<i64>,

    /// Delete the given post
    #[arg(long, value_name = "POST_ID", conflicts_with_all = ["content", "comment"])]
    delete: Option<i64>,

    /// Delete a comment, keyed by post id and comment id
    #[arg(
        long,
        num_args = 2,
        value_names = ["POST_ID", "COMMENT_ID"],
        conflicts_with_all = ["content", "comment", "delete"]
    )]
    delete_comment: Option<Vec<i64>>,

    /// Author id to attribute the content to (defaults from config)
    #[arg(short, long, value_name = "ID")]
    author: Option<i64>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("error")
            .with_writer(std::io::stderr)
            .init();
    }

    // Run the main logic and handle errors
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Resolve content from the positional argument or stdin.
fn resolve_content(arg: Option<String>) -> Result<String> {
    if let Some(content) = arg {
        return Ok(content);
    }

    if atty::is(atty::Stream::Stdin) {
        return Err(StoaError::InvalidInput(
            "No content provided. Pass it as an argument or pipe it on stdin.".to_string(),
        ));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| StoaError::InvalidInput(format!("Failed to read stdin: {}", e)))?;
    Ok(buffer.trim_end().to_string())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let api = HttpFeedApi::new(&config.api)?;
    let json = cli.format == "json";

    if let Some(post_id) = cli.delete {
        api.delete_post(post_id).await?;
        if json {
            println!("{}", serde_json::json!({ "deleted_post": post_id }));
        } else {
            println!("Deleted post {}", post_id);
        }
        return Ok(());
    }

    if let Some(ref ids) = cli.delete_comment {
        let (post_id, comment_id) = (ids[0], ids[1]);
        api.delete_comment(post_id, comment_id).await?;
        if json {
            println!(
                "{}",
                serde_json::json!({ "deleted_comment": comment_id, "post": post_id })
            );
        } else {
            println!("Deleted comment {} on post {}", comment_id, post_id);
        }
        return Ok(());
    }

    let content = resolve_content(cli.content)?;
    let author_id = cli.author.unwrap_or(config.defaults.author_id);

    if let Some(post_id) = cli.comment {
        let validation = validate_comment(&content);
        if !validation.valid {
            return Err(StoaError::InvalidInput(validation.errors.join("; ")));
        }

        let created = api
            .create_comment(post_id, &NewComment { content, author_id })
            .await?;
        tracing::info!("created comment {} on post {}", created.id, post_id);

        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&created).expect("comment serializes")
            );
        } else {
            println!("Commented on post {} as comment {}", post_id, created.id);
        }
    } else {
        let validation = validate_post(&content);
        if !validation.valid {
            return Err(StoaError::InvalidInput(validation.errors.join("; ")));
        }

        let created = api.create_post(&NewPost { content, author_id }).await?;
        tracing::info!("created post {:?}", created.id);

        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&created).expect("post serializes")
            );
        } else {
            match created.id {
                Some(id) => println!("Posted as {}", id),
                None => println!("Posted"),
            }
        }
    }

    Ok(())
}
