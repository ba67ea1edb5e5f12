use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::RecordKey;

/// Unique key of a post within its owning blog, allocated from the blog's
/// counter.
pub type PostCode = i64;

/// A post record, owned by exactly one blog's collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub code: PostCode,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Always >= `created_at`; bumped on every revision.
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a post stamped with the current time.
    pub fn new(code: PostCode, title: impl Into<String>, text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            code,
            title: title.into(),
            text: text.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and text, bumping the update timestamp.
    pub fn revise(&mut self, title: impl Into<String>, text: impl Into<String>) {
        self.title = title.into();
        self.text = text.into();
        self.updated_at = Utc::now();
    }

    /// Case-insensitive substring match against title or body text.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.text.to_lowercase().contains(&needle)
    }
}

impl RecordKey for Post {
    type Key = PostCode;

    fn record_key(&self) -> PostCode {
        self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_timestamps_agree() {
        let post = Post::new(1, "Starting my journey", "Once upon a time");
        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(post.record_key(), 1);
    }

    #[test]
    fn revise_keeps_creation_time() {
        let mut post = Post::new(1, "Title", "Text");
        let created = post.created_at;
        post.revise("New Title", "New Text");
        assert_eq!(post.created_at, created);
        assert!(post.updated_at >= post.created_at);
        assert_eq!(post.title, "New Title");
    }

    #[test]
    fn matches_is_case_insensitive() {
        let post = Post::new(1, "Starting my Journey", "Once upon a time");
        assert!(post.matches("journey"));
        assert!(post.matches("UPON"));
        assert!(!post.matches("travel"));
    }

    #[test]
    fn empty_needle_matches() {
        let post = Post::new(1, "a", "b");
        assert!(post.matches(""));
    }

    #[test]
    fn serde_roundtrip() {
        let post = Post::new(3, "Title", "Line one\nLine two");
        let json = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(back, post);
    }
}
