use crate::domain_model::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Opaque session credential carried in the `session_id` cookie.
#[derive(Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Session ids are bearer credentials; keep them out of logs.
impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: String = self.0.chars().take(8).collect();
        write!(f, "SessionId({}…)", shown)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId(s.to_string())
    }
}

/// A binding owned by the session store for its whole lifetime.
#[derive(Debug, Clone)]
pub struct Session {
    pub unique_id: SessionId,
    pub user_id: UserId,
    pub ttl: Duration,
}

/// Answer to "is this session valid". Only ever produced for a live binding.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionCheck {
    pub user_id: UserId,
    pub unique_id: SessionId,
}
