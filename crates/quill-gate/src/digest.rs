/// Domain-separated BLAKE3 credential hasher.
///
/// The digest is the engine's opaque one-way credential-matching primitive:
/// the registry stores digests, login recomputes and compares, and plaintext
/// never leaves this module. The domain tag is mixed into every hash so a
/// credential digest can never collide with a digest computed for another
/// purpose.
pub struct CredentialHasher {
    domain: &'static str,
}

impl CredentialHasher {
    /// Hasher for login credentials.
    pub const CREDENTIAL: Self = Self {
        domain: "quill-cred-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash a password into its hex digest.
    pub fn digest(&self, password: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize().as_bytes())
    }

    /// Check a password against a stored hex digest.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        self.digest(password) == digest
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}
