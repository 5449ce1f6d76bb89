//! Application state
//!
//! Immutable state structure; all transitions happen through the reducer
//! (see `reducer.rs`). Feed data lives in a [`FeedSnapshot`] produced by the
//! store - the TUI never mutates posts or comments itself.

use libstoa::actions::ActionItem;
use libstoa::feed::FeedSnapshot;
use libstoa::types::{Comment, Post};
use libstoa::validation::{COMMENT_CONTENT_LIMIT, POST_CONTENT_LIMIT};

use super::actions::Screen;

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Current active screen
    pub current_screen: Screen,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Latest view of the feed store
    pub feed: FeedSnapshot,

    /// Index of the selected post within the feed page
    pub selected: usize,

    /// Index of the selected comment within the expanded thread, if any
    pub selected_comment: Option<usize>,

    /// Post id whose comment thread is expanded, if any
    pub expanded: Option<i64>,

    /// Active text input (new post or new comment), if any
    pub composer: Option<ComposerState>,

    /// Open action menu, if any
    pub menu: Option<MenuState>,

    /// Status bar state
    pub status: StatusBarState,

    /// Error overlay state
    pub error: Option<String>,

    /// UI configuration
    pub config: UiConfig,
}

/// What the active composer will create on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeTarget {
    NewPost,
    NewComment { post_id: i64 },
}

/// Text input state shared by the post composer and the comment input
#[derive(Debug, Clone)]
pub struct ComposerState {
    pub target: ComposeTarget,

    /// Current input content
    pub content: String,

    /// Is content valid?
    pub valid: bool,

    /// Validation errors
    pub errors: Vec<String>,

    /// Character count
    pub char_count: usize,

    /// Submission in flight?
    pub submitting: bool,
}

impl ComposerState {
    pub fn new(target: ComposeTarget) -> Self {
        Self {
            target,
            content: String::new(),
            valid: false, // Empty content is invalid
            errors: vec!["Content cannot be empty".to_string()],
            char_count: 0,
            submitting: false,
        }
    }

    /// Character limit for the current target
    pub fn limit(&self) -> usize {
        match self.target {
            ComposeTarget::NewPost => POST_CONTENT_LIMIT,
            ComposeTarget::NewComment { .. } => COMMENT_CONTENT_LIMIT,
        }
    }
}

/// What an open action menu is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    Post { post_id: i64 },
    Comment { post_id: i64, comment_id: i64 },
}

/// Action menu overlay state
#[derive(Debug, Clone)]
pub struct MenuState {
    pub target: MenuTarget,
    pub items: Vec<ActionItem>,
    pub selected: usize,
}

/// Status bar state
#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    /// Current status message
    pub message: Option<String>,
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        let colors_enabled =
            std::env::var("NO_COLOR").is_err() && std::env::var("STOA_TUI_NO_COLOR").is_err();

        let tick_rate_ms = std::env::var("STOA_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            colors_enabled,
            tick_rate_ms,
        }
    }
}

impl AppState {
    /// Create application state around an initial store snapshot
    pub fn new(feed: FeedSnapshot) -> Self {
        Self {
            should_quit: false,
            current_screen: Screen::Feed,
            help_visible: false,
            feed,
            selected: 0,
            selected_comment: None,
            expanded: None,
            composer: None,
            menu: None,
            status: StatusBarState::default(),
            error: None,
            config: UiConfig::default(),
        }
    }

    /// The currently selected post, if the feed has any
    pub fn selected_post(&self) -> Option<&Post> {
        self.feed.posts.results.get(self.selected)
    }

    /// The selected post's id
    pub fn selected_post_id(&self) -> Option<i64> {
        self.selected_post().and_then(|p| p.id)
    }

    /// The expanded thread of the selected post, if it is expanded
    pub fn expanded_thread(&self) -> &[Comment] {
        match (self.expanded, self.selected_post_id()) {
            (Some(expanded), Some(selected)) if expanded == selected => self
                .feed
                .comments
                .get(&selected)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            _ => &[],
        }
    }

    /// The currently selected comment, if any
    pub fn selected_comment(&self) -> Option<&Comment> {
        self.selected_comment
            .and_then(|i| self.expanded_thread().get(i))
    }
}
