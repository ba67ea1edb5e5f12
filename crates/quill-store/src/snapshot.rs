use crate::error::StoreResult;

/// Named-blob key-value persistence handle.
///
/// Keys are relative, slash-separated blob names (`"blogs.json"`,
/// `"records/1111114444.dat"`). The engine never derives file paths itself;
/// any backend that can store bytes under a name satisfies the contract.
///
/// All implementations must satisfy these invariants:
/// - `save` atomically replaces the previous blob under the key: a reader
///   observes either the old image or the new one, never a partial write.
/// - `load` of an absent key is `Ok(None)`, not an error. Absence is how an
///   empty collection looks before its first mutation.
/// - I/O errors are propagated, never silently ignored.
pub trait SnapshotStore: Send + Sync {
    /// Read the blob stored under `key`, if any.
    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Atomically write `blob` under `key`, replacing any previous image.
    fn save(&self, key: &str, blob: &[u8]) -> StoreResult<()>;

    /// Delete the blob under `key`. Returns `true` if one existed.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    /// Move the blob under `from` to `to`, replacing any blob at `to`.
    ///
    /// Returns `false` when `from` holds no blob (nothing to move).
    fn rename(&self, from: &str, to: &str) -> StoreResult<bool>;
}
