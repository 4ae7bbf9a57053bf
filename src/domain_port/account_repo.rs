use crate::application_port::*;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait AccountRepo: Send + Sync {
    async fn find_by_login(&self, login: &str) -> Result<Option<AccountRecord>, AuthError>;
}
