use crate::domain_model::*;
use crate::domain_port::SessionStoreError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No live binding for the id: absent, expired or revoked.
    #[error("session not found")]
    NotFound,
    /// A binding exists but its value is not a user id.
    #[error("corrupt session binding: {0}")]
    CorruptBinding(String),
    #[error("store error: {0}")]
    Store(String),
    /// The remote session authority could not be reached or answered unexpectedly.
    #[error("session service unavailable: {0}")]
    Unavailable(String),
}

impl SessionError {
    /// Infrastructure failures, as opposed to "this caller has no session".
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, SessionError::Store(_) | SessionError::Unavailable(_))
    }
}

impl From<SessionStoreError> for SessionError {
    fn from(err: SessionStoreError) -> Self {
        SessionError::Store(err.to_string())
    }
}

/// The capability every protected route needs.
#[async_trait::async_trait]
pub trait SessionChecker: Send + Sync {
    async fn check(&self, unique_id: &SessionId) -> Result<SessionCheck, SessionError>;
}

/// Issues, validates and revokes sessions.
#[async_trait::async_trait]
pub trait SessionManager: SessionChecker {
    async fn create(&self, user_id: UserId) -> Result<SessionCheck, SessionError>;
    /// Idempotent: deleting an absent session succeeds.
    async fn delete(&self, unique_id: &SessionId) -> Result<(), SessionError>;
}
