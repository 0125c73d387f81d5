use crate::session::Session;

/// Whether a user with this many remaining visits may request a new one
pub fn can_view(remaining_visits: u32) -> bool {
    remaining_visits >= 1
}

/// Gate derived from the session's quota counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaGate {
    remaining_visits: Option<u32>,
}

impl QuotaGate {
    /// Re-derived on every call so it always reflects the latest record
    pub fn from_session(session: &Session) -> Self {
        Self {
            remaining_visits: session.user().map(|u| u.remaining_visits),
        }
    }

    /// Open when no user is signed in; the click redirects first
    pub fn is_open(&self) -> bool {
        self.remaining_visits.map_or(true, can_view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;
    use crate::session::SessionEvent;

    #[test]
    fn positive_quota_can_view() {
        for remaining in [1, 2, 3, 10, u32::MAX] {
            assert!(can_view(remaining), "quota {remaining}");
        }
        assert!(!can_view(0));
    }

    #[test]
    fn gate_follows_record_updates() {
        let mut session = Session::signed_in(fixtures::user(1));
        assert!(QuotaGate::from_session(&session).is_open());

        session.dispatch(SessionEvent::RecordCommitted(fixtures::user(0)));
        assert!(!QuotaGate::from_session(&session).is_open());
    }

    #[test]
    fn gate_open_without_user() {
        assert!(QuotaGate::from_session(&Session::new()).is_open());
    }
}
