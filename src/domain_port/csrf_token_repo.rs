use crate::application_port::*;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait CsrfTokenRepository: Send + Sync {
    async fn create(&self, sources: &CsrfTokenSources) -> Result<CsrfToken, CsrfError>;
    /// Verify signature, algorithm and expiry, then compare the embedded binding.
    async fn check(&self, binding: &CsrfBinding, token: &CsrfToken) -> Result<(), CsrfError>;
}
