use crate::domain_model::*;

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("store error: {0}")]
    Store(String),
    #[error("store did not acknowledge write: {0}")]
    NotAcknowledged(String),
    #[error("store operation timed out")]
    Timeout,
}

/// Shared, TTL-capable `session id -> user id` store.
///
/// Implementations perform exactly one store command per call and hold no
/// connection between calls.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Write the binding with its TTL. Succeeds only on an affirmative acknowledgement.
    async fn set(&self, session: &Session) -> Result<(), SessionStoreError>;
    /// The stored value verbatim (a string-encoded user id), if the key is live.
    async fn get_user_id(&self, unique_id: &SessionId) -> Result<Option<String>, SessionStoreError>;
    /// Number of keys removed. Zero is not an error here.
    async fn del(&self, unique_id: &SessionId) -> Result<u64, SessionStoreError>;
}
