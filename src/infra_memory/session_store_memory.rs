use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Process-local session store. Stands in for Redis in development and tests;
/// it is not shared between processes.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: DashMap<String, (String, DateTime<Utc>)>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live bindings, pruning expired ones.
    pub fn len(&self) -> usize {
        self.prune_expired();
        self.entries.len()
    }

    /// Number of entries held, expired or not.
    pub fn stored(&self) -> usize {
        self.entries.len()
    }

    fn prune_expired(&self) {
        let now = Utc::now();
        self.entries.retain(|_, (_, expires_at)| *expires_at > now);
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write a raw value, bypassing the `UserId` encoding.
    pub fn insert_raw(&self, unique_id: &SessionId, value: impl Into<String>, expires_at: DateTime<Utc>) {
        self.entries
            .insert(unique_id.as_str().to_string(), (value.into(), expires_at));
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn set(&self, session: &Session) -> Result<(), SessionStoreError> {
        let ttl = chrono::Duration::from_std(session.ttl)
            .map_err(|e| SessionStoreError::Store(e.to_string()))?;
        self.prune_expired();
        self.insert_raw(&session.unique_id, session.user_id.to_string(), Utc::now() + ttl);
        Ok(())
    }

    async fn get_user_id(
        &self,
        unique_id: &SessionId,
    ) -> Result<Option<String>, SessionStoreError> {
        let now = Utc::now();
        let expired = match self.entries.get(unique_id.as_str()) {
            Some(entry) if entry.1 > now => return Ok(Some(entry.0.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries
                .remove_if(unique_id.as_str(), |_, (_, expires_at)| *expires_at <= now);
        }
        Ok(None)
    }

    async fn del(&self, unique_id: &SessionId) -> Result<u64, SessionStoreError> {
        let now = Utc::now();
        match self.entries.remove(unique_id.as_str()) {
            Some((_, (_, expires_at))) if expires_at > now => Ok(1),
            _ => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn session(id: &str, user: i64, ttl: Duration) -> Session {
        Session {
            unique_id: SessionId::from(id),
            user_id: UserId(user),
            ttl,
        }
    }

    #[tokio::test]
    async fn stored_value_is_the_decimal_user_id() {
        let store = MemorySessionStore::new();
        store
            .set(&session("s1", 42, Duration::from_secs(60)))
            .await
            .unwrap();

        let value = store.get_user_id(&SessionId::from("s1")).await.unwrap();

        assert_eq!(value.as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn expired_binding_reads_as_absent() {
        let store = MemorySessionStore::new();
        store.insert_raw(
            &SessionId::from("old"),
            "7",
            Utc::now() - chrono::Duration::seconds(1),
        );

        assert_eq!(store.get_user_id(&SessionId::from("old")).await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn del_reports_removed_count() {
        let store = MemorySessionStore::new();
        store
            .set(&session("s1", 1, Duration::from_secs(60)))
            .await
            .unwrap();

        assert_eq!(store.del(&SessionId::from("s1")).await.unwrap(), 1);
        assert_eq!(store.del(&SessionId::from("s1")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn set_prunes_bindings_nobody_reads_again() {
        let store = MemorySessionStore::new();
        let past = Utc::now() - chrono::Duration::seconds(1);
        store.insert_raw(&SessionId::from("gone-a"), "1", past);
        store.insert_raw(&SessionId::from("gone-b"), "2", past);
        assert_eq!(store.stored(), 2);

        store
            .set(&session("s1", 3, Duration::from_secs(60)))
            .await
            .unwrap();

        assert_eq!(store.stored(), 1);
        assert_eq!(
            store.get_user_id(&SessionId::from("s1")).await.unwrap().as_deref(),
            Some("3")
        );
    }
}
