//! Filesystem-backed snapshot store.
//!
//! Each key maps to one file under the store root. Writes land in a
//! temporary sibling first and are moved into place with `rename`, so a
//! crash mid-write leaves the previous snapshot intact.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::snapshot::SnapshotStore;

/// Suffix for in-flight writes before the atomic rename.
const TMP_SUFFIX: &str = ".tmp";

/// A [`SnapshotStore`] that keeps each blob in a file under a root
/// directory.
#[derive(Debug)]
pub struct FsSnapshotStore {
    root: PathBuf,
}

impl FsSnapshotStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to its backing file path, refusing anything that could
    /// escape the root.
    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey("empty key".into()));
        }
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(StoreError::InvalidKey(key.into()));
        }
        Ok(self.root.join(relative))
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, blob: &[u8]) -> StoreResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = path.clone().into_os_string();
        tmp.push(TMP_SUFFIX);
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &path)?;
        debug!(key, bytes = blob.len(), "snapshot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn rename(&self, from: &str, to: &str) -> StoreResult<bool> {
        let source = self.path_for(from)?;
        let target = self.path_for(to)?;
        if !source.exists() {
            return Ok(false);
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(&source, &target)?;
        Ok(true)
    }
}
