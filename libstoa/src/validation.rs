//! Content validation shared by the composing frontends
//!
//! The backend rejects blank or oversized content with a 4xx; validating
//! client-side lets the composer show the problem before a request is made.
//! Limits match the backend's schemas.

/// Maximum characters in a post.
pub const POST_CONTENT_LIMIT: usize = 500;

/// Maximum characters in a comment.
pub const COMMENT_CONTENT_LIMIT: usize = 300;

#[derive(Debug, Clone, Default)]
pub struct ContentValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub char_count: usize,
}

pub fn validate_content(content: &str, limit: usize) -> ContentValidation {
    let char_count = content.chars().count();
    let mut errors = Vec::new();

    if content.trim().is_empty() {
        errors.push("Content cannot be empty".to_string());
    }
    if char_count > limit {
        errors.push(format!(
            "Content exceeds {} character limit (got {} characters)",
            limit, char_count
        ));
    }

    ContentValidation {
        valid: errors.is_empty(),
        errors,
        char_count,
    }
}

pub fn validate_post(content: &str) -> ContentValidation {
    validate_content(content, POST_CONTENT_LIMIT)
}

pub fn validate_comment(content: &str) -> ContentValidation {
    validate_content(content, COMMENT_CONTENT_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_content() {
        let result = validate_post("Hello, feed!");
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.char_count, 12);
    }

    #[test]
    fn test_empty_content_invalid() {
        let result = validate_post("");
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Content cannot be empty"]);
    }

    #[test]
    fn test_whitespace_only_invalid() {
        let result = validate_comment("   \n\t");
        assert!(!result.valid);
    }

    #[test]
    fn test_over_limit_invalid() {
        let content = "x".repeat(POST_CONTENT_LIMIT + 1);
        let result = validate_post(&content);
        assert!(!result.valid);
        assert!(result.errors[0].contains("character limit"));
        assert_eq!(result.char_count, POST_CONTENT_LIMIT + 1);
    }

    #[test]
    fn test_limit_boundary_is_valid() {
        let content = "x".repeat(COMMENT_CONTENT_LIMIT);
        let result = validate_comment(&content);
        assert!(result.valid);
    }

    #[test]
    fn test_char_count_is_characters_not_bytes() {
        let result = validate_post("héllo");
        assert_eq!(result.char_count, 5);
    }
}
