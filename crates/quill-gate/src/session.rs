use quill_types::BlogId;
use tracing::debug;

use crate::error::{GateError, GateResult};
use crate::registry::CredentialRegistry;

/// The access-control state machine.
///
/// Tracks whether the single user is authenticated and which blog, if any,
/// is currently selected for editing. Never persisted; a fresh process
/// starts anonymous. Whether a selected blog id actually exists is the
/// engine's concern; the session only holds the reference.
#[derive(Clone, Debug, Default)]
pub struct Session {
    authenticated: bool,
    current_blog: Option<BlogId>,
}

impl Session {
    /// A fresh anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The selected blog, if any.
    pub fn current_blog(&self) -> Option<BlogId> {
        self.current_blog
    }

    /// Authenticate against the registry.
    ///
    /// Fails with [`GateError::AlreadyAuthenticated`] while a session is
    /// active and [`GateError::InvalidCredentials`] on a mismatch.
    pub fn login(
        &mut self,
        registry: &CredentialRegistry,
        username: &str,
        password: &str,
    ) -> GateResult<()> {
        if self.authenticated {
            return Err(GateError::AlreadyAuthenticated);
        }
        if !registry.verify(username, password) {
            return Err(GateError::InvalidCredentials);
        }
        self.authenticated = true;
        debug!(username, "session authenticated");
        Ok(())
    }

    /// End the session, clearing authentication and any blog selection.
    pub fn logout(&mut self) -> GateResult<()> {
        if !self.authenticated {
            return Err(GateError::NotAuthenticated);
        }
        self.authenticated = false;
        self.current_blog = None;
        debug!("session ended");
        Ok(())
    }

    /// Guard for operations that require authentication.
    pub fn require_authenticated(&self) -> GateResult<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(GateError::AccessDenied)
        }
    }

    /// Guard for post operations: authenticated and a blog selected.
    pub fn require_current_blog(&self) -> GateResult<BlogId> {
        self.require_authenticated()?;
        self.current_blog.ok_or(GateError::NoCurrentBlog)
    }

    /// Record a blog selection. The caller has already checked the id
    /// exists.
    pub fn select_blog(&mut self, id: BlogId) -> GateResult<()> {
        self.require_authenticated()?;
        self.current_blog = Some(id);
        Ok(())
    }

    /// Drop any blog selection. Idempotent.
    pub fn clear_selection(&mut self) -> GateResult<()> {
        self.require_authenticated()?;
        self.current_blog = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CredentialRegistry {
        CredentialRegistry::builtin()
    }

    #[test]
    fn starts_anonymous() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.require_authenticated(), Err(GateError::AccessDenied));
        assert_eq!(session.require_current_blog(), Err(GateError::AccessDenied));
    }

    #[test]
    fn login_logout_cycle() {
        let mut session = Session::new();
        session.login(&registry(), "user", "123456").unwrap();
        assert!(session.is_authenticated());
        session.logout().unwrap();
        assert!(!session.is_authenticated());

        // A second round works, including as a different user.
        session.login(&registry(), "ali", "@G00dPassw0rd").unwrap();
        session.logout().unwrap();
    }

    #[test]
    fn double_login_is_rejected() {
        let mut session = Session::new();
        session.login(&registry(), "user", "123456").unwrap();
        assert_eq!(
            session.login(&registry(), "user", "123456"),
            Err(GateError::AlreadyAuthenticated)
        );
    }

    #[test]
    fn bad_credentials_are_rejected() {
        let mut session = Session::new();
        assert_eq!(
            session.login(&registry(), "incorrectuser", "123456"),
            Err(GateError::InvalidCredentials)
        );
        assert_eq!(
            session.login(&registry(), "user", "abadpassword"),
            Err(GateError::InvalidCredentials)
        );
        assert!(!session.is_authenticated());
    }

    #[test]
    fn logout_requires_a_session() {
        let mut session = Session::new();
        assert_eq!(session.logout(), Err(GateError::NotAuthenticated));
    }

    #[test]
    fn selection_requires_authentication() {
        let mut session = Session::new();
        assert_eq!(session.select_blog(1), Err(GateError::AccessDenied));
        assert_eq!(session.clear_selection(), Err(GateError::AccessDenied));
    }

    #[test]
    fn selection_lifecycle() {
        let mut session = Session::new();
        session.login(&registry(), "user", "123456").unwrap();
        assert_eq!(session.require_current_blog(), Err(GateError::NoCurrentBlog));

        session.select_blog(1111114444).unwrap();
        assert_eq!(session.current_blog(), Some(1111114444));
        assert_eq!(session.require_current_blog(), Ok(1111114444));

        // Clearing twice is fine.
        session.clear_selection().unwrap();
        session.clear_selection().unwrap();
        assert_eq!(session.current_blog(), None);
    }

    #[test]
    fn logout_drops_selection() {
        let mut session = Session::new();
        session.login(&registry(), "user", "123456").unwrap();
        session.select_blog(7).unwrap();
        session.logout().unwrap();
        session.login(&registry(), "user", "123456").unwrap();
        assert_eq!(session.current_blog(), None);
    }
}
