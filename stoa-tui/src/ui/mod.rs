//! UI rendering
//!
//! Pure rendering functions that transform state into terminal frames. The
//! active text area is owned by the main loop (it is a stateful widget) and
//! passed in for drawing.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use libstoa::types::{parse_timestamp, Author, Comment, Post};

use crate::app::{AppState, ComposeTarget, MenuTarget, Screen};

/// Render the application UI
pub fn render(frame: &mut Frame, state: &AppState, textarea: Option<&TextArea>) {
    let area = frame.size();

    match state.current_screen {
        Screen::Feed => render_feed(frame, area, state, textarea),
        Screen::Profile => render_profile(frame, area, state),
    }

    if let Some(ref menu) = state.menu {
        render_menu_overlay(frame, area, menu);
    }

    if state.help_visible {
        render_help_overlay(frame, area);
    }

    if let Some(ref error) = state.error {
        render_error_overlay(frame, area, error);
    }
}

/// Render the feed screen: post list, optional composer, status bar
fn render_feed(frame: &mut Frame, area: Rect, state: &AppState, textarea: Option<&TextArea>) {
    let constraints = if state.composer.is_some() {
        vec![
            Constraint::Min(3),    // Post list
            Constraint::Length(4), // Composer
            Constraint::Length(3), // Status bar
        ]
    } else {
        vec![
            Constraint::Min(3),    // Post list
            Constraint::Length(3), // Status bar
        ]
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_post_list(frame, chunks[0], state);

    if state.composer.is_some() {
        render_composer(frame, chunks[1], state, textarea);
        render_status_bar(frame, chunks[2], state);
    } else {
        render_status_bar(frame, chunks[1], state);
    }
}

fn render_post_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title(" Feed ").borders(Borders::ALL);

    if state.feed.loading {
        let placeholder = Paragraph::new("Loading...")
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(placeholder, area);
        return;
    }

    if state.feed.posts.results.is_empty() {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from("Nothing here yet."),
            Line::from(""),
            Line::from(Span::styled(
                "Press n to write the first post",
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = state
        .feed
        .posts
        .results
        .iter()
        .enumerate()
        .map(|(index, post)| post_item(state, index, post))
        .collect();

    let highlight = if state.config.colors_enabled {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let list = List::new(items)
        .block(block.title(format!(" Feed ({}) ", state.feed.posts.count)))
        .highlight_style(highlight)
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn post_item<'a>(state: &'a AppState, index: usize, post: &'a Post) -> ListItem<'a> {
    let mut lines = vec![
        byline(&post.author, &post.timestamp),
        Line::from(post.content.as_str()),
    ];

    // Thread lines appear only under the selected, expanded post.
    if index == state.selected && state.expanded == post.id && post.id.is_some() {
        let thread = state.expanded_thread();
        if thread.is_empty() {
            lines.push(Line::from(Span::styled(
                "   (no comments)",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (comment_index, comment) in thread.iter().enumerate() {
            lines.push(comment_line(
                comment,
                state.selected_comment == Some(comment_index),
            ));
        }
    }

    lines.push(Line::from(""));
    ListItem::new(lines)
}

fn byline<'a>(author: &'a Author, timestamp: &'a str) -> Line<'a> {
    let mut spans = vec![Span::styled(
        author.username.as_str(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    if author.is_ai {
        spans.push(Span::styled(" [ai]", Style::default().fg(Color::Magenta)));
    }

    spans.push(Span::styled(
        format!("  {}", display_timestamp(timestamp)),
        Style::default().fg(Color::DarkGray),
    ));

    Line::from(spans)
}

fn comment_line<'a>(comment: &'a Comment, selected: bool) -> Line<'a> {
    let marker_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::styled(if selected { " > " } else { "   " }, marker_style),
        Span::styled(
            comment.author.username.as_str(),
            Style::default().fg(Color::Cyan),
        ),
    ];
    if comment.author.is_ai {
        spans.push(Span::styled(" [ai]", Style::default().fg(Color::Magenta)));
    }
    spans.push(Span::raw(": "));
    spans.push(Span::raw(comment.content.as_str()));

    Line::from(spans)
}

fn display_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

fn render_composer(frame: &mut Frame, area: Rect, state: &AppState, textarea: Option<&TextArea>) {
    // The text area carries its own block (set by the main loop); fall back
    // to an empty block if it is not available yet.
    match textarea {
        Some(textarea) => frame.render_widget(textarea, area),
        None => {
            let title = composer_title(state);
            frame.render_widget(
                Block::default().title(title).borders(Borders::ALL),
                area,
            );
        }
    }
}

/// Title for the active composer's block.
pub fn composer_title(state: &AppState) -> String {
    match state.composer.as_ref().map(|c| c.target) {
        Some(ComposeTarget::NewComment { post_id }) => format!(" Comment on post {} ", post_id),
        _ => " New post ".to_string(),
    }
}

/// Border color reflecting composer validity and submission state.
pub fn composer_border_color(state: &AppState) -> Color {
    match state.composer.as_ref() {
        Some(c) if c.submitting => Color::Yellow,
        Some(c) if c.valid => Color::Green,
        Some(_) => Color::Red,
        None => Color::Gray,
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let widget = if let Some(ref composer) = state.composer {
        let status_symbol = if composer.valid { "+" } else { "!" };
        let validation_info = if composer.errors.is_empty() {
            "Valid".to_string()
        } else {
            composer.errors.join(", ")
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    status_symbol,
                    if composer.valid {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                    },
                ),
                Span::raw(format!(" | {}/{} chars | ", composer.char_count, composer.limit())),
                Span::raw(validation_info),
            ]),
            Line::from(Span::styled(
                if composer.submitting {
                    "Submitting..."
                } else {
                    "Enter: submit | Esc: cancel"
                },
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(lines).block(Block::default().borders(Borders::ALL))
    } else if let Some(ref message) = state.status.message {
        Paragraph::new(message.as_str())
            .block(Block::default().borders(Borders::ALL).title(" Status "))
            .style(Style::default().fg(Color::Green))
    } else {
        Paragraph::new(vec![Line::from(Span::styled(
            "n: post | c: comment | a: actions | Enter: thread | j/k: move | r: refresh | p: profile | ?: help | q: quit",
            Style::default().fg(Color::Gray),
        ))])
        .block(Block::default().borders(Borders::ALL))
    };

    frame.render_widget(widget, area);
}

/// Render the profile screen (stub, no data fetching)
fn render_profile(frame: &mut Frame, area: Rect, state: &AppState) {
    let username = state
        .selected_post()
        .map(|p| p.author.username.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let block = Block::default()
        .title(format!(" Profile: {} ", username))
        .borders(Borders::ALL);

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Profiles are not wired up yet",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from("Press Esc to return to the feed, q to quit"),
    ])
    .block(block)
    .alignment(Alignment::Center);

    frame.render_widget(text, area);
}

fn render_menu_overlay(frame: &mut Frame, area: Rect, menu: &crate::app::MenuState) {
    let popup_area = centered_rect(30, 30, area);

    let title = match menu.target {
        MenuTarget::Post { post_id } => format!(" Post {} ", post_id),
        MenuTarget::Comment { comment_id, .. } => format!(" Comment {} ", comment_id),
    };

    let lines: Vec<Line> = menu
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let marker = if index == menu.selected { "> " } else { "  " };
            let style = if item.destructive {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            let style = if index == menu.selected {
                style.add_modifier(Modifier::BOLD)
            } else {
                style
            };
            Line::from(Span::styled(format!("{}{}", marker, item.label), style))
        })
        .collect();

    let menu_widget = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, popup_area);
    frame.render_widget(menu_widget, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Feed:"),
        Line::from("  j/k      - Select post"),
        Line::from("  J/K      - Select comment in the open thread"),
        Line::from("  Enter    - Expand/collapse comments"),
        Line::from("  n        - New post"),
        Line::from("  c        - Comment on the selected post"),
        Line::from("  a        - Report/Delete menu for the selection"),
        Line::from("  r        - Refresh the feed"),
        Line::from("  p        - Profile screen"),
        Line::from(""),
        Line::from("Composer:"),
        Line::from("  Enter    - Submit"),
        Line::from("  Esc      - Cancel"),
        Line::from(""),
        Line::from("Press Esc or ? to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

fn render_error_overlay(frame: &mut Frame, area: Rect, error: &str) {
    let popup_area = centered_rect(70, 30, area);

    let error_text = vec![
        Line::from(Span::styled(
            "Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error),
        Line::from(""),
        Line::from("Press Esc to dismiss"),
    ];

    let error_widget = Paragraph::new(error_text)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(error_widget, popup_area);
}

/// Helper to create centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::reduce;
    use crate::app::Action;
    use libstoa::feed::FeedSnapshot;

    #[test]
    fn test_composer_title_by_target() {
        let mut state = AppState::new(FeedSnapshot::default());
        assert_eq!(composer_title(&state), " New post ");

        state = reduce(state, Action::OpenComposer);
        assert_eq!(composer_title(&state), " New post ");
    }

    #[test]
    fn test_composer_border_color_tracks_validity() {
        let mut state = AppState::new(FeedSnapshot::default());
        assert_eq!(composer_border_color(&state), Color::Gray);

        state = reduce(state, Action::OpenComposer);
        assert_eq!(composer_border_color(&state), Color::Red);

        state = reduce(state, Action::ComposerInputChanged("hello".to_string()));
        assert_eq!(composer_border_color(&state), Color::Green);

        state = reduce(state, Action::ComposerSubmit);
        assert_eq!(composer_border_color(&state), Color::Yellow);
    }

    #[test]
    fn test_display_timestamp() {
        assert_eq!(display_timestamp("2025-10-03T09:15:00Z"), "2025-10-03 09:15");
        assert_eq!(display_timestamp("mystery"), "mystery");
    }

    #[test]
    fn test_centered_rect_is_contained() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 60, area);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
        assert!(popup.x >= area.x && popup.y >= area.y);
    }
}
