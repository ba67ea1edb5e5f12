/// Rejection of an insert that would duplicate an existing key.
///
/// The index does not know what the key means; callers attach the domain
/// context (which id or code collided) when they surface the failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("a record with this key already exists")]
pub struct DuplicateKey;
