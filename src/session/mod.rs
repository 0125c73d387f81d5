//! Client-held record of the signed-in user.
//!
//! The session is passed explicitly to whatever needs it. It changes only through
//! [`Session::dispatch`], and every change replaces the whole user record.

use crate::models::{User, UserId};
use tracing::debug;

/// Places the client can send the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn(User),
    /// Updated record returned by the service, e.g. after a visit request
    RecordCommitted(User),
    SignedOut,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<User>,
    revision: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        let mut session = Self::new();
        session.dispatch(SessionEvent::SignedIn(user));
        session
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Bumped on every dispatched event
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dispatch(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SignedIn(user) | SessionEvent::RecordCommitted(user) => {
                debug!(
                    "Session record for user {} ({} visits left)",
                    user.user_id, user.remaining_visits
                );
                self.user = Some(user);
            }
            SessionEvent::SignedOut => {
                debug!("Session cleared");
                self.user = None;
            }
        }
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;

    #[test]
    fn starts_signed_out() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.user_id(), None);
        assert_eq!(session.revision(), 0);
    }

    #[test]
    fn committed_record_replaces_whole_user() {
        let mut session = Session::signed_in(fixtures::user(3));

        let mut updated = fixtures::user(2);
        updated.email = "asha.rao@example.com".to_string();
        session.dispatch(SessionEvent::RecordCommitted(updated.clone()));

        assert_eq!(session.user(), Some(&updated));
        assert_eq!(session.revision(), 2);
    }

    #[test]
    fn sign_out_drops_user() {
        let mut session = Session::signed_in(fixtures::user(1));
        session.dispatch(SessionEvent::SignedOut);
        assert!(session.user().is_none());
    }

    #[test]
    fn login_route_path() {
        assert_eq!(Route::Login.path(), "/login");
    }
}
