//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions: immutable descriptions of
//! what should happen. The reducer (see `reducer.rs`) applies them; the main
//! loop performs any side effects they imply.

use libstoa::feed::FeedSnapshot;

/// Actions that trigger state transitions
#[derive(Debug, Clone)]
pub enum Action {
    // === UI events ===
    /// Periodic tick
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    /// A key that maps to nothing in the current mode
    Noop,

    // === Navigation ===
    /// Switch to a different screen
    NavigateTo(Screen),

    /// Quit the application
    Quit,

    /// Show help overlay
    ShowHelp,

    /// Hide help overlay
    HideHelp,

    // === Feed browsing ===
    /// Move post selection down
    SelectNext,

    /// Move post selection up
    SelectPrevious,

    /// Move comment selection down within the expanded thread
    SelectNextComment,

    /// Move comment selection up (deselects at the top)
    SelectPreviousComment,

    /// Expand or collapse the selected post's comment thread
    ToggleThread,

    /// Reload the feed
    Refresh,

    // === Feed data (from the service layer) ===
    /// The store settled an operation; render from this snapshot
    FeedRefreshed(FeedSnapshot),

    // === Composer ===
    /// Open the new-post composer
    OpenComposer,

    /// Open the comment input for the selected post
    OpenCommentInput,

    /// Input content changed in the active composer
    ComposerInputChanged(String),

    /// Submit the active composer
    ComposerSubmit,

    /// Close the active composer, discarding input
    ComposerCancel,

    // === Action menu ===
    /// Open the Report/Delete menu for the current selection
    OpenMenu,

    /// Move menu selection down
    MenuNext,

    /// Move menu selection up
    MenuPrevious,

    /// Dispatch the highlighted menu entry
    MenuSelect,

    /// Close the menu without dispatching
    MenuCancel,

    // === Overlays / status bar ===
    /// Show error overlay
    ShowError(String),

    /// Dismiss error overlay
    DismissError,

    /// Update status message
    SetStatus(String),

    /// Clear status message
    ClearStatus,
}

/// Screen/View identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// The feed: post list, threads, composer
    Feed,

    /// Per-user profile (stub, no data fetching)
    Profile,
}
