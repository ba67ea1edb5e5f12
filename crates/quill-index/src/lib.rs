//! Sorted, uniquely-keyed in-memory collections for the Quill engine.
//!
//! Both record kinds the engine manages (blogs keyed by id, posts keyed by
//! code) live in a [`KeyedIndex`]: a vector kept sorted ascending by key at
//! all times, so lookups are O(log n) binary searches and listing is a plain
//! slice view. One generic search routine, [`search_by_key`], serves every
//! collection; the key to compare on comes from the record's
//! [`RecordKey`](quill_types::RecordKey) implementation.
//!
//! All operations are in-memory. Persistence is the responsibility of the
//! engine layer.

pub mod error;
pub mod index;
pub mod search;

pub use error::DuplicateKey;
pub use index::KeyedIndex;
pub use search::search_by_key;
