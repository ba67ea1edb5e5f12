//! Degraded-mode persistence helpers shared by both stores.
//!
//! Snapshot-on-write is best-effort by policy: a failed write is logged and
//! the mutation stands in memory (re-attempting the mutation restores
//! durability), and a corrupt blob on load yields the empty collection with
//! a logged diagnostic instead of a crash. Business-rule failures never pass
//! through here.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use quill_index::KeyedIndex;
use quill_store::{RecordCodec, SnapshotStore};
use quill_types::RecordKey;

/// Load and re-index the collection stored under `key`.
///
/// A missing blob is the empty collection. Anything unreadable (I/O
/// failure, bad framing, undecodable payload, duplicate keys) is logged
/// and also treated as empty.
pub(crate) fn load_index<R, C>(
    snapshots: &dyn SnapshotStore,
    codec: &C,
    key: &str,
) -> KeyedIndex<R>
where
    R: RecordKey + DeserializeOwned,
    C: RecordCodec,
{
    let records: Vec<R> = match snapshots.load(key) {
        Ok(Some(blob)) => match codec.decode(&blob) {
            Ok(records) => records,
            Err(e) => {
                warn!(key, error = %e, "snapshot is corrupt; starting empty");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "snapshot could not be read; starting empty");
            Vec::new()
        }
    };

    KeyedIndex::from_records(records).unwrap_or_else(|_| {
        warn!(key, "snapshot holds duplicate keys; starting empty");
        KeyedIndex::new()
    })
}

/// Encode and write the collection under `key`. No-op when autosave is off;
/// failures are logged and the in-memory state stands.
pub(crate) fn store_index<R, C>(
    snapshots: &dyn SnapshotStore,
    codec: &C,
    key: &str,
    records: &[R],
    autosave: bool,
) where
    R: Serialize,
    C: RecordCodec,
{
    if !autosave {
        return;
    }
    let blob = match codec.encode(records) {
        Ok(blob) => blob,
        Err(e) => {
            warn!(key, error = %e, "snapshot encode failed; continuing in memory");
            return;
        }
    };
    if let Err(e) = snapshots.save(key, &blob) {
        warn!(key, error = %e, "snapshot write failed; continuing in memory");
    }
}
