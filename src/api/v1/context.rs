use crate::domain_model::{SessionCheck, SessionId, UserId};

/// What the session filters established about the caller.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    session: Option<SessionCheck>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { session: None }
    }

    pub fn authenticated(session: SessionCheck) -> Self {
        Self {
            session: Some(session),
        }
    }

    pub fn session(&self) -> Option<&SessionCheck> {
        self.session.as_ref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.session.as_ref().map(|s| s.user_id)
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session.as_ref().map(|s| &s.unique_id)
    }
}
