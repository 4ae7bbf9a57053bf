use crate::domain_model::*;

/// Why a CSRF token was refused. The HTTP layer collapses all of these into one 403.
#[derive(Debug, thiserror::Error)]
pub enum CsrfError {
    #[error("token signing failed: {0}")]
    Signing(String),
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("unexpected signing method")]
    WrongSigningMethod,
    #[error("token expired")]
    Expired,
    #[error("token bound to a different user or session")]
    BindingMismatch,
}

/// Mints and verifies CSRF tokens for an authenticated session.
#[async_trait::async_trait]
pub trait CsrfChecker: Send + Sync {
    async fn create(
        &self,
        session_id: &SessionId,
        user_id: UserId,
    ) -> Result<IssuedCsrfToken, CsrfError>;
    async fn check(
        &self,
        session_id: &SessionId,
        user_id: UserId,
        token: &CsrfToken,
    ) -> Result<(), CsrfError>;
}
