use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::sync::Arc;

pub struct Argon2PasswordHasher;

#[async_trait::async_trait]
impl CredentialHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = argon2::password_hash::SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::InternalError(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::InternalError(format!("invalid PHC hash: {}", e)))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::InternalError(format!("verify error: {}", e))),
        }
    }
}

/// Login and logout on top of the session manager.
pub struct RealAuthService {
    account_repo: Arc<dyn AccountRepo>,
    credential_hasher: Arc<dyn CredentialHasher>,
    session_manager: Arc<dyn SessionManager>,
}

impl RealAuthService {
    pub fn new(
        account_repo: Arc<dyn AccountRepo>,
        credential_hasher: Arc<dyn CredentialHasher>,
        session_manager: Arc<dyn SessionManager>,
    ) -> Self {
        Self {
            account_repo,
            credential_hasher,
            session_manager,
        }
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn login(&self, request: LoginInput) -> Result<SessionCheck, AuthError> {
        let LoginInput { login, password } = request;

        let rec = self
            .account_repo
            .find_by_login(&login)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let ok = self
            .credential_hasher
            .verify_password(&password, &rec.password_hash)
            .await?;
        if !ok {
            info!(login = %login, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.session_manager.create(rec.user_id).await?;
        info!(user_id = %rec.user_id, "login succeeded");
        Ok(session)
    }

    async fn logout(&self, session_id: &SessionId) -> Result<(), AuthError> {
        self.session_manager.delete(session_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_impl::RealSessionManager;
    use crate::application_impl::test_support::{FailureFlags, RecordingStore};
    use crate::infra_memory::StaticAccountRepo;
    use std::time::Duration;

    async fn service(store: RecordingStore) -> RealAuthService {
        let hasher = Argon2PasswordHasher;
        let record = AccountRecord {
            user_id: UserId(42),
            login: "demo".to_string(),
            password_hash: hasher.hash_password("correct horse").await.unwrap(),
        };
        RealAuthService::new(
            Arc::new(StaticAccountRepo::new([record])),
            Arc::new(hasher),
            Arc::new(RealSessionManager::new(
                Arc::new(store),
                Duration::from_secs(60),
            )),
        )
    }

    fn input(login: &str, password: &str) -> LoginInput {
        LoginInput {
            login: login.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn when_credentials_match_then_session_is_bound_to_account() {
        let store = RecordingStore::new();
        let service = service(store.clone()).await;

        let session = service.login(input("demo", "correct horse")).await.unwrap();

        assert_eq!(session.user_id, UserId(42));
        assert_eq!(store.raw(session.unique_id.as_str()).as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn when_password_or_login_wrong_then_invalid_credentials() {
        let store = RecordingStore::new();
        let service = service(store.clone()).await;

        let wrong_password = service.login(input("demo", "battery staple")).await;
        let unknown_login = service.login(input("nobody", "correct horse")).await;

        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
        assert!(matches!(unknown_login, Err(AuthError::InvalidCredentials)));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn when_session_store_fails_then_login_fails() {
        let store = RecordingStore::new().with_failures(FailureFlags {
            set: true,
            ..Default::default()
        });
        let service = service(store).await;

        let result = service.login(input("demo", "correct horse")).await;

        assert!(matches!(
            result,
            Err(AuthError::Session(SessionError::Store(_)))
        ));
    }

    #[tokio::test]
    async fn logout_removes_the_session() {
        let store = RecordingStore::new();
        let service = service(store.clone()).await;
        let session = service.login(input("demo", "correct horse")).await.unwrap();

        service.logout(&session.unique_id).await.unwrap();

        assert_eq!(store.raw(session.unique_id.as_str()), None);
    }
}
