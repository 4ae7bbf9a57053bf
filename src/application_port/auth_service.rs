use crate::application_port::SessionError;
use crate::domain_model::*;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub login: String,
    pub password: String,
}

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError>;
    async fn verify_password(&self, password: &str, password_hash: &str)
    -> Result<bool, AuthError>;
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, request: LoginInput) -> Result<SessionCheck, AuthError>;
    async fn logout(&self, session_id: &SessionId) -> Result<(), AuthError>;
}
