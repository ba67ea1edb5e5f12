use std::sync::Arc;

use quill_index::KeyedIndex;
use quill_store::{BinaryCodec, SnapshotStore};
use quill_types::{BlogId, Post, PostCode};

use crate::error::{EngineError, EngineResult};
use crate::persistence;

/// One blog's sorted post collection.
///
/// Instantiated when its blog becomes the current blog and dropped on
/// deselection; the snapshot blob under the blog's key is the durable copy.
/// Codes come from the owning blog's monotonic counter, so inserts always
/// land at the tail of the sorted sequence.
pub struct PostStore {
    blog_id: BlogId,
    index: KeyedIndex<Post>,
    codec: BinaryCodec,
    snapshots: Arc<dyn SnapshotStore>,
    key: String,
    autosave: bool,
}

impl PostStore {
    /// Open the post collection for `blog_id`, decoding any existing
    /// snapshot under `key`. Missing or unreadable snapshots start empty.
    pub fn open(
        blog_id: BlogId,
        snapshots: Arc<dyn SnapshotStore>,
        key: String,
        autosave: bool,
    ) -> Self {
        let codec = BinaryCodec;
        let index = persistence::load_index(snapshots.as_ref(), &codec, &key);
        Self {
            blog_id,
            index,
            codec,
            snapshots,
            key,
            autosave,
        }
    }

    /// The owning blog's id.
    pub fn blog_id(&self) -> BlogId {
        self.blog_id
    }

    fn persist(&self) {
        persistence::store_index(
            self.snapshots.as_ref(),
            &self.codec,
            &self.key,
            self.index.as_slice(),
            self.autosave,
        );
    }

    /// Append the post for an already-allocated code.
    pub fn create(&mut self, code: PostCode, title: &str, text: &str) -> EngineResult<Post> {
        let post = Post::new(code, title, text);
        self.index
            .insert(post.clone())
            .map_err(|_| EngineError::Conflict(code))?;
        self.persist();
        Ok(post)
    }

    /// Binary search by code.
    pub fn search(&self, code: PostCode) -> Option<&Post> {
        self.index.get(code)
    }

    /// All posts matching `needle` in title or text (case-insensitive), in
    /// creation order.
    pub fn retrieve_by_text(&self, needle: &str) -> Vec<Post> {
        self.index
            .iter()
            .filter(|post| post.matches(needle))
            .cloned()
            .collect()
    }

    /// Replace a post's title and text, bumping its update timestamp.
    pub fn update(&mut self, code: PostCode, title: &str, text: &str) -> EngineResult<Post> {
        let post = self.index.get_mut(code).ok_or(EngineError::NotFound(code))?;
        post.revise(title, text);
        let updated = post.clone();
        self.persist();
        Ok(updated)
    }

    /// Remove a post, returning the removed record. The owning blog's
    /// counter is untouched: codes are never reused.
    pub fn delete(&mut self, code: PostCode) -> EngineResult<Post> {
        let removed = self.index.remove(code).ok_or(EngineError::NotFound(code))?;
        self.persist();
        Ok(removed)
    }

    /// Posts in descending creation order, most recent first.
    pub fn list(&self) -> Vec<Post> {
        self.index.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use quill_store::InMemorySnapshotStore;

    use super::*;

    fn backend() -> Arc<InMemorySnapshotStore> {
        Arc::new(InMemorySnapshotStore::new())
    }

    fn open(snapshots: &Arc<InMemorySnapshotStore>) -> PostStore {
        PostStore::open(1, snapshots.clone(), "records/1.dat".into(), true)
    }

    #[test]
    fn list_is_most_recent_first() {
        let snapshots = backend();
        let mut store = open(&snapshots);
        store.create(1, "first", "a").unwrap();
        store.create(2, "second", "b").unwrap();
        store.create(3, "third", "c").unwrap();

        let codes: Vec<PostCode> = store.list().iter().map(|p| p.code).collect();
        assert_eq!(codes, vec![3, 2, 1]);
    }

    #[test]
    fn retrieve_keeps_creation_order() {
        let snapshots = backend();
        let mut store = open(&snapshots);
        store.create(1, "Starting my journey", "Once upon a time").unwrap();
        store.create(2, "Second step", "Before one could think").unwrap();
        store.create(3, "Continuing my journey", "Along the way").unwrap();

        let codes: Vec<PostCode> = store
            .retrieve_by_text("JOURNEY")
            .iter()
            .map(|p| p.code)
            .collect();
        assert_eq!(codes, vec![1, 3]);
    }

    #[test]
    fn reopen_restores_posts() {
        let snapshots = backend();
        let mut store = open(&snapshots);
        let created = store.create(1, "Title", "Line one\nLine two").unwrap();

        let reopened = open(&snapshots);
        assert_eq!(reopened.search(1), Some(&created));
    }

    #[test]
    fn corrupt_snapshot_starts_empty() {
        let snapshots = backend();
        snapshots.save("records/1.dat", b"\x00\x01garbage").unwrap();
        let store = open(&snapshots);
        assert!(store.is_empty());
    }

    #[test]
    fn update_and_delete_of_missing_code() {
        let snapshots = backend();
        let mut store = open(&snapshots);
        assert_eq!(store.update(3, "t", "x"), Err(EngineError::NotFound(3)));
        assert_eq!(store.delete(3), Err(EngineError::NotFound(3)));
    }
}
