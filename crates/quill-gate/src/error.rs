/// Failures produced by the access gate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
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

    /// The credential file could not be read or parsed.
    #[error("credential file error: {0}")]
    CredentialFile(String),
}

/// Result alias for gate operations.
pub type GateResult<T> = Result<T, GateError>;
