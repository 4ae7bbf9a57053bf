#![allow(dead_code)]

use gatekeeper::api::v1::{self, CookiePolicy};
use gatekeeper::application_impl::*;
use gatekeeper::application_port::*;
use gatekeeper::domain_model::*;
use gatekeeper::infra_memory::*;
use gatekeeper::server::Server;
use std::sync::Arc;
use std::time::Duration;
use warp::Filter;
use warp::http::Response;
use warp::hyper::body::Bytes;

pub const LOGIN: &str = "alice";
pub const PASSWORD: &str = "correct horse";
pub const USER_ID: i64 = 42;

pub struct TestApp {
    pub server: Arc<Server>,
    pub store: Arc<MemorySessionStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        let hash = Argon2PasswordHasher.hash_password(PASSWORD).await.unwrap();
        let accounts = StaticAccountRepo::new([AccountRecord {
            user_id: UserId(USER_ID),
            login: LOGIN.to_string(),
            password_hash: hash,
        }]);

        let store = Arc::new(MemorySessionStore::new());
        let session_manager: Arc<dyn SessionManager> = Arc::new(RealSessionManager::new(
            store.clone(),
            Duration::from_secs(60),
        ));
        let csrf_service: Arc<dyn CsrfChecker> = Arc::new(RealCsrfService::new(
            Arc::new(JwtCsrfTokenRepository::new(&CsrfSecret::generate())),
            Duration::from_secs(900),
        ));
        let auth_service: Arc<dyn AuthService> = Arc::new(RealAuthService::new(
            Arc::new(accounts),
            Arc::new(Argon2PasswordHasher),
            session_manager.clone(),
        ));
        let cookie_policy = Arc::new(CookiePolicy {
            secure: false,
            ..CookiePolicy::default()
        });

        let server = Arc::new(Server {
            auth_service,
            session_manager,
            csrf_service,
            cookie_policy,
        });
        Self { server, store }
    }

    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = std::convert::Infallible> + Clone + 'static
    {
        warp::path("api")
            .and(warp::path("v1"))
            .and(v1::routes(self.server.clone()))
            .recover(v1::recover_error)
    }
}

/// Value of the first `Set-Cookie` header setting `name`.
pub fn set_cookie_value(res: &Response<Bytes>, name: &str) -> Option<String> {
    set_cookie_line(res, name).map(|line| {
        let pair = line.split(';').next().unwrap_or_default();
        pair[name.len() + 1..].to_string()
    })
}

pub fn set_cookie_line(res: &Response<Bytes>, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    res.headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|line| line.starts_with(&prefix))
        .map(str::to_string)
}

pub fn json_body(res: &Response<Bytes>) -> serde_json::Value {
    serde_json::from_slice(res.body()).unwrap()
}
