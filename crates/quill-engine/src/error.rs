use quill_gate::GateError;
use quill_types::BlogId;

/// The engine's failure taxonomy, surfaced to every caller.
///
/// Business-rule failures are values, never logged-and-swallowed, and the
/// engine never retries them. Persistence I/O problems do not appear here:
/// they are degraded to warnings per the snapshot-on-write policy (the
/// mutation stands in memory and the caller may re-attempt it).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// An operation requiring authentication ran while anonymous.
    #[error("access denied: not authenticated")]
    AccessDenied,

    /// Login attempted while a session is already active.
    #[error("a session is already active")]
    AlreadyAuthenticated,

    /// Unknown username or digest mismatch.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Logout attempted while anonymous.
    #[error("no active session to log out")]
    NotAuthenticated,

    /// A post operation ran with no blog selected.
    #[error("no current blog selected")]
    NoCurrentBlog,

    /// A create or update would duplicate an existing key.
    #[error("a record with key {0} already exists")]
    Conflict(i64),

    /// The targeted record does not exist.
    #[error("no record with key {0}")]
    NotFound(i64),

    /// The targeted blog is currently selected; close it before changing it.
    #[error("blog {0} is open as the current blog; close it first")]
    CurrentBlogLocked(BlogId),

    /// The credential file could not be read or parsed at startup.
    #[error("credential file error: {0}")]
    CredentialFile(String),

    /// The configuration file could not be read or parsed at startup.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<GateError> for EngineError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::AccessDenied => Self::AccessDenied,
            GateError::AlreadyAuthenticated => Self::AlreadyAuthenticated,
            GateError::InvalidCredentials => Self::InvalidCredentials,
            GateError::NotAuthenticated => Self::NotAuthenticated,
            GateError::NoCurrentBlog => Self::NoCurrentBlog,
            GateError::CredentialFile(msg) => Self::CredentialFile(msg),
        }
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
