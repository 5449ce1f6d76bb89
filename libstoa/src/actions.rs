//! Moderation action lists
//!
//! Every post and every comment carries the same fixed two-entry action
//! menu: Report (client-side acknowledgment only, no network) and Delete
//! (delegates to the corresponding delete operation). Frontends render
//! these; [`FeedStore`](crate::feed::FeedStore) dispatches them.

/// What an action does when dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Acknowledge locally; no request is made.
    Report,
    /// Remove the target through the backend.
    Delete,
}

/// A labeled menu entry, dispatched with a target id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionItem {
    pub label: &'static str,
    pub kind: ActionKind,
    /// Destructive entries get warning styling in menus.
    pub destructive: bool,
}

/// Action menu for a post.
pub fn post_actions() -> Vec<ActionItem> {
    vec![
        ActionItem {
            label: "Report",
            kind: ActionKind::Report,
            destructive: false,
        },
        ActionItem {
            label: "Delete",
            kind: ActionKind::Delete,
            destructive: true,
        },
    ]
}

/// Action menu for a comment. Same shape as the post menu.
pub fn comment_actions() -> Vec<ActionItem> {
    post_actions()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_actions_fixed_entries() {
        let actions = post_actions();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].label, "Report");
        assert_eq!(actions[0].kind, ActionKind::Report);
        assert!(!actions[0].destructive);
        assert_eq!(actions[1].label, "Delete");
        assert_eq!(actions[1].kind, ActionKind::Delete);
        assert!(actions[1].destructive);
    }

    #[test]
    fn test_comment_actions_match_post_actions() {
        assert_eq!(comment_actions(), post_actions());
    }
}
