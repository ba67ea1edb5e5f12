use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::digest::CredentialHasher;
use crate::error::{GateError, GateResult};

/// Static username → digest mapping, loaded once at startup.
///
/// The registry is pure lookup: it is never mutated after construction and
/// never stores plaintext. Verification recomputes the digest of the
/// presented password and compares it to the stored one.
#[derive(Clone, Debug, Default)]
pub struct CredentialRegistry {
    entries: HashMap<String, String>,
}

impl CredentialRegistry {
    /// An empty registry (every login fails).
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry seeded with the stock single-user fixtures, used when no
    /// credential file is configured.
    pub fn builtin() -> Self {
        Self::new()
            .with_password("user", "123456")
            .with_password("ali", "@G00dPassw0rd")
    }

    /// Add a user by precomputed hex digest.
    pub fn with_user(mut self, username: impl Into<String>, digest: impl Into<String>) -> Self {
        self.entries.insert(username.into(), digest.into());
        self
    }

    /// Add a user by plaintext password, digesting it immediately.
    pub fn with_password(self, username: impl Into<String>, password: &str) -> Self {
        let digest = CredentialHasher::CREDENTIAL.digest(password);
        self.with_user(username, digest)
    }

    /// Load a registry from a `username:digest`-per-line file.
    ///
    /// Blank lines and `#` comments are skipped. A malformed line is a
    /// startup error, not something to guess around.
    pub fn from_file(path: &Path) -> GateResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| GateError::CredentialFile(format!("{}: {e}", path.display())))?;
        let mut registry = Self::new();
        for (number, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((username, digest)) = line.split_once(':') else {
                return Err(GateError::CredentialFile(format!(
                    "{}:{}: expected username:digest",
                    path.display(),
                    number + 1
                )));
            };
            registry = registry.with_user(username.trim(), digest.trim());
        }
        debug!(users = registry.len(), "credential registry loaded");
        Ok(registry)
    }

    /// Check a username/password pair against the stored digests.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.entries
            .get(username)
            .is_some_and(|digest| CredentialHasher::CREDENTIAL.verify(password, digest))
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no user is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
