//! Access gate for the Quill engine.
//!
//! Every engine operation passes through the gate before it can touch a
//! record store. The gate owns two things: the credential side (one-way
//! password digests and the static username → digest registry) and the
//! [`Session`] state machine that tracks authentication and the single
//! current-blog selection.
//!
//! States: `Anonymous → Authenticated → Authenticated+BlogSelected`. There
//! is no reachable state that skips authentication.

pub mod digest;
pub mod error;
pub mod registry;
pub mod session;

pub use digest::CredentialHasher;
pub use error::GateError;
pub use registry::CredentialRegistry;
pub use session::Session;
