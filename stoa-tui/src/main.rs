//! stoa-tui - Terminal UI for Stoa
//!
//! Interactive feed client: browse posts and threads, write posts and
//! comments, and moderate through the Report/Delete menu.

use std::sync::Arc;

use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

use libstoa::api::HttpFeedApi;
use libstoa::{Config, FeedApi};

use stoa_tui::{
    app::event::{EventHandler, TuiEvent},
    app::{map_key, reduce, Action, AppState, ComposeTarget, MenuTarget},
    error::Result,
    services::{FeedEvent, ServiceHandle},
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui,
};

fn main() -> Result<()> {
    // Install panic hook to restore terminal on panic
    install_panic_hook();

    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal);

    restore_terminal(terminal)?;

    result
}

fn run_app(terminal: &mut Tui) -> Result<()> {
    let config = Config::load()?;
    let api: Arc<dyn FeedApi> = Arc::new(HttpFeedApi::new(&config.api)?);
    let (services, feed_rx) = ServiceHandle::new(api, config.defaults.author_id)?;

    let mut state = AppState::new(services.initial_snapshot());

    // Initial fetch, exactly once per start. Everything later is driven by
    // user actions.
    services.load_posts();

    // The composer's text area is a stateful widget owned here.
    let mut textarea: Option<TextArea> = None;

    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    loop {
        // Keep the text area in sync with the composer: create it when a
        // composer opens, drop it when the composer closes, restyle every
        // frame.
        if let Some(ref composer) = state.composer {
            if textarea.is_none() {
                let mut fresh = TextArea::default();
                fresh.set_placeholder_text(match composer.target {
                    ComposeTarget::NewPost => "What's on your mind?",
                    ComposeTarget::NewComment { .. } => "Add a comment...",
                });
                textarea = Some(fresh);
            }
            if let Some(ref mut ta) = textarea {
                ta.set_block(
                    Block::default()
                        .title(ui::composer_title(&state))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(ui::composer_border_color(&state))),
                );
            }
        } else {
            textarea = None;
        }

        terminal.draw(|frame| ui::render(frame, &state, textarea.as_ref()))?;

        // Apply completions from the store before handling new input.
        while let Ok(event) = feed_rx.try_recv() {
            let action = match event {
                FeedEvent::Refreshed(snapshot) => Action::FeedRefreshed(snapshot),
                FeedEvent::Status(message) => Action::SetStatus(message),
                FeedEvent::Error(message) => Action::ShowError(message),
            };
            state = reduce(state, action);
        }

        // Terminal input
        let action = match event_handler.next()? {
            TuiEvent::Key(key) => {
                let mapped = map_key(&state, key);

                let in_composer = state.composer.as_ref().is_some_and(|c| !c.submitting);
                let no_overlay =
                    !state.help_visible && state.error.is_none() && state.menu.is_none();

                if in_composer && no_overlay && matches!(mapped, Action::Noop) {
                    // The keymap does not own this key; the text area does.
                    match textarea {
                        Some(ref mut ta) => {
                            ta.input(key);
                            Action::ComposerInputChanged(ta.lines().join("\n"))
                        }
                        None => Action::Noop,
                    }
                } else {
                    mapped
                }
            }
            TuiEvent::Resize(w, h) => Action::Resize(w, h),
            TuiEvent::Tick => Action::Tick,
        };

        // MenuSelect closes the menu in the reducer; capture the dispatch
        // target first.
        let menu_dispatch = if matches!(action, Action::MenuSelect) {
            state.menu.clone()
        } else {
            None
        };

        // Update state through the reducer
        state = reduce(state, action.clone());

        // Perform side effects implied by the action
        match action {
            Action::ComposerSubmit => {
                if let Some(ref composer) = state.composer {
                    if composer.submitting {
                        match composer.target {
                            ComposeTarget::NewPost => services.add_post(composer.content.clone()),
                            ComposeTarget::NewComment { post_id } => {
                                services.add_comment(post_id, composer.content.clone())
                            }
                        }
                    }
                }
            }
            Action::ToggleThread | Action::OpenCommentInput => {
                // Threads fetch lazily, once per distinct post.
                if let Some(post_id) = state.expanded {
                    if !state.feed.comments.contains_key(&post_id) {
                        services.load_comments(post_id);
                    }
                }
            }
            Action::Refresh => services.load_posts(),
            Action::MenuSelect => {
                if let Some(menu) = menu_dispatch {
                    let item = menu.items[menu.selected];
                    match menu.target {
                        MenuTarget::Post { post_id } => services.apply_post_action(item, post_id),
                        MenuTarget::Comment {
                            post_id,
                            comment_id,
                        } => services.apply_comment_action(item, post_id, comment_id),
                    }
                }
            }
            _ => {}
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
