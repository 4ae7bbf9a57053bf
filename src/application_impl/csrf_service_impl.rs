use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

/// Fixes the token lifetime and builds the binding for the repository.
pub struct RealCsrfService {
    repo: Arc<dyn CsrfTokenRepository>,
    lifetime: Duration,
}

impl RealCsrfService {
    pub fn new(repo: Arc<dyn CsrfTokenRepository>, lifetime: Duration) -> Self {
        Self { repo, lifetime }
    }
}

#[async_trait::async_trait]
impl CsrfChecker for RealCsrfService {
    async fn create(
        &self,
        session_id: &SessionId,
        user_id: UserId,
    ) -> Result<IssuedCsrfToken, CsrfError> {
        let lifetime = chrono::Duration::from_std(self.lifetime)
            .map_err(|e| CsrfError::Signing(e.to_string()))?;
        let sources = CsrfTokenSources {
            binding: CsrfBinding {
                user_id,
                session_id: session_id.clone(),
            },
            expires_at: Utc::now() + lifetime,
        };
        let token = self.repo.create(&sources).await?;
        Ok(IssuedCsrfToken {
            token,
            expires_at: sources.expires_at,
        })
    }

    async fn check(
        &self,
        session_id: &SessionId,
        user_id: UserId,
        token: &CsrfToken,
    ) -> Result<(), CsrfError> {
        let binding = CsrfBinding {
            user_id,
            session_id: session_id.clone(),
        };
        self.repo.check(&binding, token).await
    }
}
