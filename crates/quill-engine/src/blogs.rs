use std::sync::Arc;

use quill_index::KeyedIndex;
use quill_store::{JsonCodec, SnapshotStore};
use quill_types::{Blog, BlogId, PostCode};

use crate::error::{EngineError, EngineResult};
use crate::persistence;

/// The sorted blog collection with snapshot-on-write persistence.
///
/// Records stay sorted ascending by id at all times; every successful
/// mutation re-encodes the whole collection as one JSON blob and atomically
/// replaces the previous snapshot. Access control lives above this store;
/// it assumes the controller has already admitted the caller.
pub struct BlogStore {
    index: KeyedIndex<Blog>,
    codec: JsonCodec,
    snapshots: Arc<dyn SnapshotStore>,
    key: String,
    autosave: bool,
}

impl BlogStore {
    /// Open the store, decoding any existing snapshot under `key`. A
    /// missing or unreadable snapshot starts the collection empty.
    pub fn open(snapshots: Arc<dyn SnapshotStore>, key: String, autosave: bool) -> Self {
        let codec = JsonCodec;
        let index = persistence::load_index(snapshots.as_ref(), &codec, &key);
        Self {
            index,
            codec,
            snapshots,
            key,
            autosave,
        }
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

    /// Create a blog at its sorted position.
    pub fn create(
        &mut self,
        id: BlogId,
        name: &str,
        url: &str,
        email: &str,
    ) -> EngineResult<Blog> {
        let blog = Blog::new(id, name, url, email);
        self.index
            .insert(blog.clone())
            .map_err(|_| EngineError::Conflict(id))?;
        self.persist();
        Ok(blog)
    }

    /// Binary search by id.
    pub fn search(&self, id: BlogId) -> Option<&Blog> {
        self.index.get(id)
    }

    /// All blogs whose name contains `needle` (case-sensitive), in
    /// collection order. An empty needle matches everything.
    pub fn retrieve_by_name(&self, needle: &str) -> Vec<Blog> {
        self.index
            .iter()
            .filter(|blog| blog.name.contains(needle))
            .cloned()
            .collect()
    }

    /// Replace a blog's data fields, re-keying it when the id changes.
    ///
    /// The allocation counter survives the update; only the data fields are
    /// caller-controlled.
    pub fn update(
        &mut self,
        existing_id: BlogId,
        new_id: BlogId,
        name: &str,
        url: &str,
        email: &str,
    ) -> EngineResult<Blog> {
        if self.index.get(existing_id).is_none() {
            return Err(EngineError::NotFound(existing_id));
        }
        if new_id != existing_id && self.index.get(new_id).is_some() {
            return Err(EngineError::Conflict(new_id));
        }

        let updated = if new_id == existing_id {
            let blog = self
                .index
                .get_mut(existing_id)
                .ok_or(EngineError::NotFound(existing_id))?;
            blog.set_values(new_id, name, url, email);
            blog.clone()
        } else {
            // Re-keying: out of the index and back in at the new sorted spot.
            let mut blog = self
                .index
                .remove(existing_id)
                .ok_or(EngineError::NotFound(existing_id))?;
            blog.set_values(new_id, name, url, email);
            self.index
                .insert(blog.clone())
                .map_err(|_| EngineError::Conflict(new_id))?;
            blog
        };

        self.persist();
        Ok(updated)
    }

    /// Remove a blog, returning the removed record.
    pub fn delete(&mut self, id: BlogId) -> EngineResult<Blog> {
        let removed = self.index.remove(id).ok_or(EngineError::NotFound(id))?;
        self.persist();
        Ok(removed)
    }

    /// The full collection, ascending by id.
    pub fn list(&self) -> Vec<Blog> {
        self.index.iter().cloned().collect()
    }

    /// Allocate the next post code for the given blog, persisting the
    /// advanced counter.
    pub fn allocate_post_code(&mut self, id: BlogId) -> EngineResult<PostCode> {
        let blog = self.index.get_mut(id).ok_or(EngineError::NotFound(id))?;
        let code = blog.allocate_post_code();
        self.persist();
        Ok(code)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
