use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;

const RANDOM_PART_LEN: usize = 32;

pub struct RealSessionManager {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl RealSessionManager {
    pub fn new(store: Arc<dyn SessionStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// hex(sha256(random bytes || decimal user id))
    fn new_unique_id(user_id: UserId) -> SessionId {
        let mut random = [0u8; RANDOM_PART_LEN];
        rand::rngs::OsRng.fill_bytes(&mut random);

        let mut hasher = Sha256::new();
        hasher.update(random);
        hasher.update(user_id.to_string().as_bytes());
        SessionId(hex::encode(hasher.finalize()))
    }
}

#[async_trait::async_trait]
impl SessionChecker for RealSessionManager {
    async fn check(&self, unique_id: &SessionId) -> Result<SessionCheck, SessionError> {
        let stored = self.store.get_user_id(unique_id).await.map_err(|e| {
            error!(session = ?unique_id, "session lookup failed: {}", e);
            SessionError::from(e)
        })?;

        let raw = stored.ok_or(SessionError::NotFound)?;
        let user_id = raw.parse::<UserId>().map_err(|e| {
            error!(session = ?unique_id, "stored user id {:?} does not parse: {}", raw, e);
            SessionError::CorruptBinding(e.to_string())
        })?;

        Ok(SessionCheck {
            user_id,
            unique_id: unique_id.clone(),
        })
    }
}

#[async_trait::async_trait]
impl SessionManager for RealSessionManager {
    async fn create(&self, user_id: UserId) -> Result<SessionCheck, SessionError> {
        let session = Session {
            unique_id: Self::new_unique_id(user_id),
            user_id,
            ttl: self.ttl,
        };

        self.store.set(&session).await.map_err(|e| {
            error!(%user_id, "session write failed: {}", e);
            SessionError::from(e)
        })?;
        debug!(%user_id, session = ?session.unique_id, "session created");

        Ok(SessionCheck {
            user_id,
            unique_id: session.unique_id,
        })
    }

    async fn delete(&self, unique_id: &SessionId) -> Result<(), SessionError> {
        let removed = self.store.del(unique_id).await.map_err(|e| {
            error!(session = ?unique_id, "session delete failed: {}", e);
            SessionError::from(e)
        })?;
        if removed == 0 {
            debug!(session = ?unique_id, "session already absent");
        }
        Ok(())
    }
}
