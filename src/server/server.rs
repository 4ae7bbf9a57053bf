use crate::api::v1::CookiePolicy;
use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::infra_http::*;
use crate::infra_memory::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::Settings;
use anyhow::{Context, anyhow};
use std::sync::Arc;
use std::time::Duration;

/// Services behind the public API.
pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub session_manager: Arc<dyn SessionManager>,
    pub csrf_service: Arc<dyn CsrfChecker>,
    pub cookie_policy: Arc<CookiePolicy>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let session_manager: Arc<dyn SessionManager> = match settings.session.backend.as_str() {
            "local" => build_local_manager(settings, "redis").await?,
            "memory" => build_local_manager(settings, "memory").await?,
            "remote" => {
                let timeout = Duration::from_millis(settings.session.remote_timeout_ms);
                let remote = RemoteSessionManager::connect(&settings.session.remote_url, timeout)
                    .await
                    .with_context(|| {
                        format!("session service at {}", settings.session.remote_url)
                    })?;
                info!(url = %settings.session.remote_url, "using remote session service");
                Arc::new(remote)
            }
            other => return Err(anyhow!("unknown session backend: {:?}", other)),
        };

        let secret = match settings.csrf.secret_hex.as_deref() {
            Some(hex) => CsrfSecret::from_hex(hex).context("csrf.secret_hex")?,
            None => {
                warn!("no csrf secret configured; tokens will not survive a restart");
                CsrfSecret::generate()
            }
        };
        let csrf_repo: Arc<dyn CsrfTokenRepository> = Arc::new(JwtCsrfTokenRepository::new(&secret));
        let csrf_service: Arc<dyn CsrfChecker> = Arc::new(RealCsrfService::new(
            csrf_repo,
            Duration::from_secs(settings.csrf.lifetime_secs()),
        ));

        let accounts = StaticAccountRepo::new(settings.accounts.iter().map(|a| AccountRecord {
            user_id: UserId(a.user_id),
            login: a.login.clone(),
            password_hash: a.password_hash.clone(),
        }));
        if accounts.is_empty() {
            warn!("no accounts configured; every login will fail");
        }
        let auth_service: Arc<dyn AuthService> = Arc::new(RealAuthService::new(
            Arc::new(accounts),
            Arc::new(Argon2PasswordHasher),
            session_manager.clone(),
        ));

        let cookie_policy = Arc::new(CookiePolicy {
            secure: settings.cookie.secure,
            same_site: settings.cookie.same_site,
            session_max_age: Duration::from_secs(settings.session.cookie_max_age_secs),
            csrf_max_age: Duration::from_secs(settings.csrf.lifetime_secs()),
        });

        info!("server started");

        Ok(Self {
            auth_service,
            session_manager,
            csrf_service,
            cookie_policy,
        })
    }
}

/// In-process session manager over the given store kind ("redis" or "memory").
/// Also backs the session service binary.
pub async fn build_local_manager(
    settings: &Settings,
    store: &str,
) -> anyhow::Result<Arc<dyn SessionManager>> {
    let store: Arc<dyn SessionStore> = match store {
        "redis" => {
            let client = redis::Client::open(settings.redis.dsn.as_str())?;
            let conn = client
                .get_connection_manager()
                .await
                .context("connecting to redis")?;
            info!(prefix = %settings.redis.prefix, "using redis session store");
            Arc::new(RedisSessionStore::new(
                conn,
                settings.redis.prefix.clone(),
                Duration::from_millis(settings.redis.op_timeout_ms),
            ))
        }
        "memory" => {
            warn!("using in-memory session store; sessions are lost on restart");
            Arc::new(MemorySessionStore::new())
        }
        other => return Err(anyhow!("unknown session store: {:?}", other)),
    };

    Ok(Arc::new(RealSessionManager::new(
        store,
        Duration::from_secs(settings.session.ttl_secs),
    )))
}
