use crate::api::internal::protocol::*;
use crate::application_port::*;
use crate::domain_model::*;
use crate::logger::*;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Thin client for the session service; satisfies the same contract as the
/// in-process manager.
#[derive(Clone)]
pub struct RemoteSessionManager {
    http: Client,
    base_url: String,
}

impl RemoteSessionManager {
    /// Build the client and probe the service once. An unreachable service is an error.
    pub async fn connect(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SessionError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SessionError::Unavailable(e.to_string()))?;
        let client = Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        };

        let url = format!("{}/internal/v1/health", client.base_url);
        let res = client
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SessionError::Unavailable(e.to_string()))?;
        if !res.status().is_success() {
            return Err(SessionError::Unavailable(format!(
                "health probe returned {}",
                res.status()
            )));
        }
        info!(base_url = %client.base_url, "connected to session service");
        Ok(client)
    }

    async fn call<B, R>(&self, path: &str, body: &B) -> Result<R, SessionError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}{}", self.base_url, SESSIONS_PATH, path);
        let res = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| SessionError::Unavailable(e.to_string()))?;
        let status = res.status();

        if !status.is_success() {
            let message = res
                .json::<RpcErrorResponse>()
                .await
                .ok()
                .map(|payload| payload.message)
                .unwrap_or_default();
            return Err(error_from_status(status, message));
        }

        res.json::<R>()
            .await
            .map_err(|e| SessionError::Unavailable(format!("decode error: {}", e)))
    }
}

fn error_from_status(status: StatusCode, message: String) -> SessionError {
    if status == StatusCode::NOT_FOUND {
        SessionError::NotFound
    } else if status == StatusCode::UNPROCESSABLE_ENTITY {
        SessionError::CorruptBinding(message)
    } else if status == StatusCode::SERVICE_UNAVAILABLE {
        SessionError::Store(message)
    } else {
        SessionError::Unavailable(format!("upstream {}: {}", status, message))
    }
}

#[async_trait::async_trait]
impl SessionChecker for RemoteSessionManager {
    async fn check(&self, unique_id: &SessionId) -> Result<SessionCheck, SessionError> {
        let request = SessionIdRequest {
            unique_id: unique_id.clone(),
        };
        let response: SessionResponse = self.call("/check", &request).await?;
        Ok(response.into())
    }
}

#[async_trait::async_trait]
impl SessionManager for RemoteSessionManager {
    async fn create(&self, user_id: UserId) -> Result<SessionCheck, SessionError> {
        let response: SessionResponse = self
            .call("", &CreateSessionRequest { user_id })
            .await?;
        Ok(response.into())
    }

    async fn delete(&self, unique_id: &SessionId) -> Result<(), SessionError> {
        let request = SessionIdRequest {
            unique_id: unique_id.clone(),
        };
        let _: DeleteSessionResponse = self.call("/delete", &request).await?;
        Ok(())
    }
}
