use serde::{Deserialize, Serialize};

use crate::post::PostCode;
use crate::record::RecordKey;

/// Unique identifier of a blog, supplied by the caller at creation.
pub type BlogId = i64;

/// A blog record.
///
/// Blogs are the top-level collection; each blog owns a separate post
/// collection keyed by [`PostCode`]. The `post_counter` is the allocation
/// high-water mark for that collection: it only ever increases, so a code
/// handed out once is never reused, even after the post is deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: BlogId,
    pub name: String,
    pub url: String,
    pub email: String,
    /// Highest post code ever allocated for this blog. Monotonic.
    pub post_counter: PostCode,
}

impl Blog {
    /// Create a new blog with no posts allocated yet.
    pub fn new(
        id: BlogId,
        name: impl Into<String>,
        url: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            email: email.into(),
            post_counter: 0,
        }
    }

    /// Allocate the next post code for this blog.
    ///
    /// Advances the high-water mark and returns the new code. Codes start
    /// at 1 and never repeat for the lifetime of the blog.
    pub fn allocate_post_code(&mut self) -> PostCode {
        self.post_counter += 1;
        self.post_counter
    }

    /// Replace the data fields, keeping the allocation counter intact.
    pub fn set_values(
        &mut self,
        id: BlogId,
        name: impl Into<String>,
        url: impl Into<String>,
        email: impl Into<String>,
    ) {
        self.id = id;
        self.name = name.into();
        self.url = url.into();
        self.email = email.into();
    }
}

impl RecordKey for Blog {
    type Key = BlogId;

    fn record_key(&self) -> BlogId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_blog_starts_unallocated() {
        let blog = Blog::new(42, "Short Journey", "short_journey", "short.journey@gmail.com");
        assert_eq!(blog.id, 42);
        assert_eq!(blog.post_counter, 0);
        assert_eq!(blog.record_key(), 42);
    }

    #[test]
    fn allocation_is_monotonic() {
        let mut blog = Blog::new(1, "b", "u", "e");
        assert_eq!(blog.allocate_post_code(), 1);
        assert_eq!(blog.allocate_post_code(), 2);
        assert_eq!(blog.allocate_post_code(), 3);
        assert_eq!(blog.post_counter, 3);
    }

    #[test]
    fn set_values_preserves_counter() {
        let mut blog = Blog::new(1, "Old", "old", "old@x");
        blog.allocate_post_code();
        blog.set_values(9, "New", "new", "new@x");
        assert_eq!(blog.id, 9);
        assert_eq!(blog.name, "New");
        assert_eq!(blog.post_counter, 1);
    }

    #[test]
    fn serde_roundtrip() {
        let blog = Blog::new(7, "Name", "url", "mail@x");
        let json = serde_json::to_string(&blog).unwrap();
        let back: Blog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, blog);
    }
}
