//! Record codecs and snapshot persistence for the Quill engine.
//!
//! Collections are persisted whole: every successful mutation re-encodes
//! the full record sequence through a [`RecordCodec`] and atomically
//! overwrites one named blob in a [`SnapshotStore`]. Loading is the reverse;
//! a missing blob is an empty collection, never an error.
//!
//! # Key Types
//!
//! - [`RecordCodec`] — encode/decode a record collection to/from one blob
//! - [`JsonCodec`] — human-readable JSON blobs (the blog collection)
//! - [`BinaryCodec`] — CRC-framed bincode blobs (per-blog post records)
//! - [`SnapshotStore`] — named-blob key-value persistence handle
//! - [`FsSnapshotStore`] — filesystem backend with atomic overwrite
//! - [`InMemorySnapshotStore`] — backend for tests and ephemeral sessions

pub mod codec;
pub mod error;
pub mod fs;
pub mod memory;
pub mod snapshot;

pub use codec::{BinaryCodec, JsonCodec, RecordCodec};
pub use error::{StoreError, StoreResult};
pub use fs::FsSnapshotStore;
pub use memory::InMemorySnapshotStore;
pub use snapshot::SnapshotStore;
