use crate::domain_model::*;
use crate::domain_port::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub set: bool,
    pub set_unacknowledged: bool,
    pub get: bool,
    pub del: bool,
}

/// Session store fake recording raw values, with switchable failures.
#[derive(Clone, Default)]
pub(crate) struct RecordingStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_raw(&self, key: &str, value: &str) {
        let mut guard = self.values.lock().expect("values mutex poisoned");
        guard.insert(key.to_string(), value.to_string());
    }

    pub(crate) fn raw(&self, key: &str) -> Option<String> {
        let guard = self.values.lock().expect("values mutex poisoned");
        guard.get(key).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.values.lock().expect("values mutex poisoned").len()
    }
}

#[async_trait::async_trait]
impl SessionStore for RecordingStore {
    async fn set(&self, session: &Session) -> Result<(), SessionStoreError> {
        if self.failures.set {
            return Err(SessionStoreError::Store("connection refused".to_string()));
        }
        if self.failures.set_unacknowledged {
            return Err(SessionStoreError::NotAcknowledged("QUEUED".to_string()));
        }
        self.insert_raw(session.unique_id.as_str(), &session.user_id.to_string());
        Ok(())
    }

    async fn get_user_id(
        &self,
        unique_id: &SessionId,
    ) -> Result<Option<String>, SessionStoreError> {
        if self.failures.get {
            return Err(SessionStoreError::Timeout);
        }
        Ok(self.raw(unique_id.as_str()))
    }

    async fn del(&self, unique_id: &SessionId) -> Result<u64, SessionStoreError> {
        if self.failures.del {
            return Err(SessionStoreError::Store("connection reset".to_string()));
        }
        let mut guard = self.values.lock().expect("values mutex poisoned");
        Ok(guard.remove(unique_id.as_str()).map_or(0, |_| 1))
    }
}
