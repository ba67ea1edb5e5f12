use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

/// Encode/decode a record collection to and from one persisted blob.
///
/// Implementations must round-trip exactly: `decode(encode(records))`
/// yields `records` for every valid collection, including the empty one.
/// The codec never touches storage; it is a pure byte transformation.
pub trait RecordCodec {
    /// Serialize a collection into a single blob.
    fn encode<R: Serialize>(&self, records: &[R]) -> StoreResult<Vec<u8>>;

    /// Reconstruct a collection from a blob produced by `encode`.
    ///
    /// Returns [`StoreError::Corrupt`] for anything `encode` could not have
    /// produced.
    fn decode<R: DeserializeOwned>(&self, blob: &[u8]) -> StoreResult<Vec<R>>;
}

/// Human-readable JSON codec. Used for the blog collection blob.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl RecordCodec for JsonCodec {
    fn encode<R: Serialize>(&self, records: &[R]) -> StoreResult<Vec<u8>> {
        serde_json::to_vec_pretty(records).map_err(|e| StoreError::Encode(e.to_string()))
    }

    fn decode<R: DeserializeOwned>(&self, blob: &[u8]) -> StoreResult<Vec<R>> {
        serde_json::from_slice(blob).map_err(|e| StoreError::Corrupt(e.to_string()))
    }
}

/// Checksum header size: 4-byte little-endian CRC32 of the payload.
const CRC_HEADER: usize = 4;

/// Compact binary codec with corruption detection. Used for the per-blog
/// post record blobs.
///
/// Blob layout:
/// ```text
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized record sequence)]
/// ```
///
/// A torn or bit-flipped snapshot fails the checksum and is reported as
/// [`StoreError::Corrupt`] instead of being misparsed.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryCodec;

impl RecordCodec for BinaryCodec {
    fn encode<R: Serialize>(&self, records: &[R]) -> StoreResult<Vec<u8>> {
        let payload = bincode::serialize(records).map_err(|e| StoreError::Encode(e.to_string()))?;
        let mut blob = Vec::with_capacity(CRC_HEADER + payload.len());
        blob.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        blob.extend_from_slice(&payload);
        Ok(blob)
    }

    fn decode<R: DeserializeOwned>(&self, blob: &[u8]) -> StoreResult<Vec<R>> {
        if blob.len() < CRC_HEADER {
            return Err(StoreError::Corrupt(format!(
                "blob too short for checksum header: {} bytes",
                blob.len()
            )));
        }
        let (header, payload) = blob.split_at(CRC_HEADER);
        let expected = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let computed = crc32fast::hash(payload);
        if expected != computed {
            return Err(StoreError::Corrupt(format!(
                "checksum mismatch: stored {expected:#010x}, computed {computed:#010x}"
            )));
        }
        bincode::deserialize(payload).map_err(|e| StoreError::Corrupt(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use quill_types::{Blog, Post};

    use super::*;

    #[test]
    fn json_roundtrip_empty_and_populated() {
        let codec = JsonCodec;

        let empty: Vec<Blog> = codec.decode(&codec.encode::<Blog>(&[]).unwrap()).unwrap();
        assert!(empty.is_empty());

        let blogs: Vec<Blog> = (1..=5)
            .map(|n| Blog::new(n, format!("Blog {n}"), format!("blog_{n}"), format!("b{n}@x")))
            .collect();
        let blob = codec.encode(&blogs).unwrap();
        let back: Vec<Blog> = codec.decode(&blob).unwrap();
        assert_eq!(back, blogs);
    }

    #[test]
    fn json_blob_is_readable_text() {
        let blogs = vec![Blog::new(1, "Short Journey", "short_journey", "s@x")];
        let blob = JsonCodec.encode(&blogs).unwrap();
        let text = std::str::from_utf8(&blob).unwrap();
        assert!(text.contains("Short Journey"));
    }

    #[test]
    fn json_rejects_garbage() {
        let err = JsonCodec.decode::<Blog>(b"not json at all").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn binary_roundtrip_empty_and_populated() {
        let codec = BinaryCodec;

        let empty: Vec<Post> = codec.decode(&codec.encode::<Post>(&[]).unwrap()).unwrap();
        assert!(empty.is_empty());

        let posts: Vec<Post> = (1..=5)
            .map(|n| Post::new(n, format!("Title {n}"), "Once upon a time\nThere was a kid..."))
            .collect();
        let blob = codec.encode(&posts).unwrap();
        let back: Vec<Post> = codec.decode(&blob).unwrap();
        assert_eq!(back, posts);
    }

    #[test]
    fn binary_detects_flipped_bit() {
        let posts = vec![Post::new(1, "Title", "Text")];
        let mut blob = BinaryCodec.encode(&posts).unwrap();
        let last = blob.len() - 1;
        blob[last] ^= 0x40;
        let err = BinaryCodec.decode::<Post>(&blob).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn binary_rejects_truncated_header() {
        let err = BinaryCodec.decode::<Post>(&[0x01, 0x02]).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
