/// Errors from codec and snapshot operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O failure in the persistence backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A collection could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// A persisted blob is malformed: bad framing, checksum mismatch, or
    /// undecodable payload.
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),

    /// A snapshot key is not a valid relative blob name.
    #[error("invalid snapshot key: {0}")]
    InvalidKey(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
