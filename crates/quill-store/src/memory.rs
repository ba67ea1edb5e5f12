//! In-memory snapshot store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::snapshot::SnapshotStore;

/// A [`SnapshotStore`] that keeps every blob in a `HashMap` behind a
/// `RwLock`. Data is lost when the store is dropped; sharing one instance
/// across engine restarts is how tests simulate a reload.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemorySnapshotStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs currently held.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no blob has been saved.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Sorted list of all keys, for inspection in tests.
    pub fn keys(&self) -> Vec<String> {
        let blobs = self.blobs.read().expect("lock poisoned");
        let mut keys: Vec<String> = blobs.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let blobs = self.blobs.read().expect("lock poisoned");
        Ok(blobs.get(key).cloned())
    }

    fn save(&self, key: &str, blob: &[u8]) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey("empty key".into()));
        }
        let mut blobs = self.blobs.write().expect("lock poisoned");
        blobs.insert(key.to_string(), blob.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut blobs = self.blobs.write().expect("lock poisoned");
        Ok(blobs.remove(key).is_some())
    }

    fn rename(&self, from: &str, to: &str) -> StoreResult<bool> {
        if to.is_empty() {
            return Err(StoreError::InvalidKey("empty key".into()));
        }
        let mut blobs = self.blobs.write().expect("lock poisoned");
        match blobs.remove(from) {
            Some(blob) => {
                blobs.insert(to.to_string(), blob);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
