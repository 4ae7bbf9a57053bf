use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisWrite, ToRedisArgs};
use std::future::Future;
use std::time::Duration;

pub struct RedisSessionStore {
    conn: ConnectionManager,
    prefix: String,
    op_timeout: Duration,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>, op_timeout: Duration) -> Self {
        RedisSessionStore {
            conn,
            prefix: prefix.into(),
            op_timeout,
        }
    }

    fn key(&self, unique_id: &SessionId) -> String {
        session_key(&self.prefix, unique_id)
    }

    async fn bounded<T, F>(&self, op: F) -> Result<T, SessionStoreError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(result) => result.map_err(|e| SessionStoreError::Store(e.to_string())),
            Err(_) => Err(SessionStoreError::Timeout),
        }
    }
}

fn session_key(prefix: &str, unique_id: &SessionId) -> String {
    if prefix.is_empty() {
        unique_id.as_str().to_string()
    } else {
        format!("{}:{}", prefix, unique_id.as_str())
    }
}

fn acknowledged(reply: String) -> Result<(), SessionStoreError> {
    if reply != "OK" {
        warn!(reply = %reply, "session write not acknowledged");
        return Err(SessionStoreError::NotAcknowledged(reply));
    }
    Ok(())
}

impl ToRedisArgs for UserId {
    fn write_redis_args<W>(&self, out: &mut W)
    where
        W: ?Sized + RedisWrite,
    {
        out.write_arg(self.to_string().as_bytes())
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn set(&self, session: &Session) -> Result<(), SessionStoreError> {
        let key = self.key(&session.unique_id);
        let ttl_secs = session.ttl.as_secs().max(1);
        let mut conn = self.conn.clone();
        let reply: String = self
            .bounded(conn.set_ex(&key, &session.user_id, ttl_secs))
            .await?;
        acknowledged(reply)
    }

    async fn get_user_id(
        &self,
        unique_id: &SessionId,
    ) -> Result<Option<String>, SessionStoreError> {
        let key = self.key(unique_id);
        let mut conn = self.conn.clone();
        self.bounded(conn.get(&key)).await
    }

    async fn del(&self, unique_id: &SessionId) -> Result<u64, SessionStoreError> {
        let key = self.key(unique_id);
        let mut conn = self.conn.clone();
        self.bounded(conn.del(&key)).await
    }
}
