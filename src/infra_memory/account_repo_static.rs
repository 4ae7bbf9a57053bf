use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use std::collections::HashMap;

/// Account directory loaded once from configuration.
pub struct StaticAccountRepo {
    accounts: HashMap<String, AccountRecord>,
}

impl StaticAccountRepo {
    pub fn new(records: impl IntoIterator<Item = AccountRecord>) -> Self {
        let accounts = records
            .into_iter()
            .map(|record| (record.login.clone(), record))
            .collect();
        StaticAccountRepo { accounts }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait::async_trait]
impl AccountRepo for StaticAccountRepo {
    async fn find_by_login(&self, login: &str) -> Result<Option<AccountRecord>, AuthError> {
        Ok(self.accounts.get(login).cloned())
    }
}
