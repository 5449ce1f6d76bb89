//! Pure reducer function for state transitions
//!
//! `(State, Action) -> State`, no side effects: no network, no file I/O, no
//! terminal access. The main loop performs the side effects an action
//! implies (spawning store operations, feeding the text area) and routes the
//! results back in as further actions.

use libstoa::actions::{comment_actions, post_actions};
use libstoa::feed::FeedSnapshot;
use libstoa::validation::validate_content;

use super::actions::Action;
use super::state::{
    AppState, ComposeTarget, ComposerState, MenuState, MenuTarget, StatusBarState,
};

/// Pure reducer function
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI events ===
        Action::Tick => state,
        Action::Resize(_, _) => state, // Terminal auto-handles resize
        Action::Noop => state,

        // === Navigation ===
        Action::NavigateTo(screen) => AppState {
            current_screen: screen,
            ..state
        },

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        // === Feed browsing ===
        Action::SelectNext => {
            let count = state.feed.posts.results.len();
            if count == 0 {
                return state;
            }
            AppState {
                selected: (state.selected + 1).min(count - 1),
                selected_comment: None,
                ..state
            }
        }

        Action::SelectPrevious => AppState {
            selected: state.selected.saturating_sub(1),
            selected_comment: None,
            ..state
        },

        Action::SelectNextComment => {
            let thread_len = state.expanded_thread().len();
            if thread_len == 0 {
                return state;
            }
            let next = match state.selected_comment {
                Some(current) => (current + 1).min(thread_len - 1),
                None => 0,
            };
            AppState {
                selected_comment: Some(next),
                ..state
            }
        }

        Action::SelectPreviousComment => {
            // Stepping up from the first comment returns focus to the post.
            let previous = match state.selected_comment {
                Some(0) | None => None,
                Some(current) => Some(current - 1),
            };
            AppState {
                selected_comment: previous,
                ..state
            }
        }

        Action::ToggleThread => {
            let Some(post_id) = state.selected_post_id() else {
                return state;
            };
            let expanded = if state.expanded == Some(post_id) {
                None
            } else {
                Some(post_id)
            };
            AppState {
                expanded,
                selected_comment: None,
                ..state
            }
        }

        Action::Refresh => AppState {
            feed: FeedSnapshot {
                loading: true,
                ..state.feed.clone()
            },
            ..state
        },

        // === Feed data ===
        Action::FeedRefreshed(snapshot) => apply_snapshot(state, snapshot),

        // === Composer ===
        Action::OpenComposer => AppState {
            composer: Some(ComposerState::new(ComposeTarget::NewPost)),
            ..state
        },

        Action::OpenCommentInput => {
            let Some(post_id) = state.selected_post_id() else {
                return state;
            };
            AppState {
                composer: Some(ComposerState::new(ComposeTarget::NewComment { post_id })),
                expanded: Some(post_id),
                ..state
            }
        }

        Action::ComposerInputChanged(content) => {
            let Some(composer) = state.composer.clone() else {
                return state;
            };
            let validation = validate_content(&content, composer.limit());
            AppState {
                composer: Some(ComposerState {
                    content,
                    valid: validation.valid,
                    errors: validation.errors,
                    char_count: validation.char_count,
                    ..composer
                }),
                ..state
            }
        }

        Action::ComposerSubmit => {
            // Invalid (including blank) content never leaves the composer.
            let Some(composer) = state.composer.clone() else {
                return state;
            };
            if !composer.valid {
                return state;
            }
            AppState {
                composer: Some(ComposerState {
                    submitting: true,
                    ..composer
                }),
                ..state
            }
        }

        Action::ComposerCancel => AppState {
            composer: None,
            ..state
        },

        // === Action menu ===
        Action::OpenMenu => {
            let target = match (state.selected_post_id(), state.selected_comment()) {
                (Some(post_id), Some(comment)) => MenuTarget::Comment {
                    post_id,
                    comment_id: comment.id,
                },
                (Some(post_id), None) => MenuTarget::Post { post_id },
                (None, _) => return state,
            };
            let items = match target {
                MenuTarget::Post { .. } => post_actions(),
                MenuTarget::Comment { .. } => comment_actions(),
            };
            AppState {
                menu: Some(MenuState {
                    target,
                    items,
                    selected: 0,
                }),
                ..state
            }
        }

        Action::MenuNext => {
            let Some(menu) = state.menu.clone() else {
                return state;
            };
            let selected = (menu.selected + 1) % menu.items.len();
            AppState {
                menu: Some(MenuState { selected, ..menu }),
                ..state
            }
        }

        Action::MenuPrevious => {
            let Some(menu) = state.menu.clone() else {
                return state;
            };
            let selected = (menu.selected + menu.items.len() - 1) % menu.items.len();
            AppState {
                menu: Some(MenuState { selected, ..menu }),
                ..state
            }
        }

        // Dispatch happens in the main loop, which reads the menu before
        // this transition closes it.
        Action::MenuSelect => AppState {
            menu: None,
            ..state
        },

        Action::MenuCancel => AppState {
            menu: None,
            ..state
        },

        // === Overlays / status bar ===
        Action::ShowError(error) => AppState {
            error: Some(error),
            ..state
        },

        Action::DismissError => AppState {
            error: None,
            ..state
        },

        Action::SetStatus(message) => AppState {
            status: StatusBarState {
                message: Some(message),
            },
            ..state
        },

        Action::ClearStatus => AppState {
            status: StatusBarState { message: None },
            ..state
        },
    }
}

/// Fold a fresh store snapshot into the state.
///
/// Selection is clamped to the new page, a thread expansion survives only if
/// its post still exists, and a submitting composer settles by observing
/// whether its entity landed.
fn apply_snapshot(state: AppState, snapshot: FeedSnapshot) -> AppState {
    let composer = settle_composer(state.composer.clone(), &state.feed, &snapshot);

    let count = snapshot.posts.results.len();
    let selected = if count == 0 {
        0
    } else {
        state.selected.min(count - 1)
    };

    let expanded = state
        .expanded
        .filter(|id| snapshot.posts.results.iter().any(|p| p.id == Some(*id)));

    let selected_comment = match (expanded, state.selected_comment) {
        (Some(post_id), Some(index)) => {
            let thread_len = snapshot.comments.get(&post_id).map_or(0, Vec::len);
            if thread_len == 0 {
                None
            } else {
                Some(index.min(thread_len - 1))
            }
        }
        _ => None,
    };

    AppState {
        feed: snapshot,
        selected,
        selected_comment,
        expanded,
        composer,
        ..state
    }
}

/// Settle a submitting composer against the new snapshot.
///
/// Success is observed as the entity appearing in store state (confirmed
/// writes only, no speculative insert). On failure the composer stays open
/// with its content intact so the input is not lost.
fn settle_composer(
    composer: Option<ComposerState>,
    old: &FeedSnapshot,
    new: &FeedSnapshot,
) -> Option<ComposerState> {
    let composer = composer?;
    if !composer.submitting {
        return Some(composer);
    }

    let landed = match composer.target {
        ComposeTarget::NewPost => new.posts.results.len() > old.posts.results.len(),
        ComposeTarget::NewComment { post_id } => {
            let thread_len = |snap: &FeedSnapshot| snap.comments.get(&post_id).map_or(0, Vec::len);
            thread_len(new) > thread_len(old)
        }
    };

    if landed {
        None
    } else {
        Some(ComposerState {
            submitting: false,
            ..composer
        })
    }
}
