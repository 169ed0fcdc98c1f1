//! Opaque logged-in user signal

use crate::error::{Result, WordError};

/// Who is using the app, if anyone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user_id: impl Into<String>) -> Self {
        let mut session = Self::default();
        session.login(user_id);
        session
    }

    /// Blank ids are treated as logged out
    pub fn login(&mut self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        let trimmed = user_id.trim();
        self.user_id = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn logout(&mut self) {
        self.user_id = None;
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user_id.is_some()
    }

    /// User id, or `NotLoggedIn`
    pub fn require_user(&self) -> Result<&str> {
        self.user_id().ok_or(WordError::NotLoggedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_and_logout() {
        let mut session = Session::anonymous();
        assert!(!session.is_logged_in());
        assert!(session.require_user().is_err());

        session.login("u-42");
        assert_eq!(session.user_id(), Some("u-42"));

        session.logout();
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn blank_user_is_anonymous() {
        assert!(!Session::for_user("   ").is_logged_in());
        assert_eq!(Session::for_user(" ana ").user_id(), Some("ana"));
    }
}
