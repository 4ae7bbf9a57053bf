use crate::api::v1::SameSite;
use anyhow::{Result, anyhow};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub log: Log,
    pub http: Http,
    #[serde(default)]
    pub redis: Redis,
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub session_service: SessionService,
    #[serde(default)]
    pub csrf: Csrf,
    #[serde(default)]
    pub cookie: Cookie,
    #[serde(default)]
    pub accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub address: String,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Redis {
    pub dsn: String,
    pub prefix: String,
    pub op_timeout_ms: u64,
}

impl Default for Redis {
    fn default() -> Self {
        Self {
            dsn: "redis://127.0.0.1:6379".to_string(),
            prefix: String::new(),
            op_timeout_ms: 500,
        }
    }
}

impl std::fmt::Debug for Redis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Redis")
            .field("dsn", &redact_dsn(&self.dsn))
            .field("prefix", &self.prefix)
            .field("op_timeout_ms", &self.op_timeout_ms)
            .finish()
    }
}

/// Hide the userinfo part of a connection URL.
fn redact_dsn(dsn: &str) -> String {
    match dsn.split_once("://") {
        Some((scheme, rest)) => match rest.rsplit_once('@') {
            Some((_, host)) => format!("{}://<redacted>@{}", scheme, host),
            None => dsn.to_string(),
        },
        None => dsn.to_string(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Session {
    pub backend: String, // "local", "remote" or "memory"
    pub ttl_secs: u64,
    pub cookie_max_age_secs: u64,
    pub remote_url: String,
    pub remote_timeout_ms: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            backend: "local".to_string(),
            ttl_secs: 2 * 24 * 60 * 60,
            cookie_max_age_secs: 24 * 60 * 60,
            remote_url: "http://127.0.0.1:8081".to_string(),
            remote_timeout_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionService {
    pub address: String,
    pub store: String, // "redis" or "memory"
}

impl Default for SessionService {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8081".to_string(),
            store: "redis".to_string(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Csrf {
    pub lifetime_secs: Option<u64>,
    pub secret_hex: Option<String>,
}

impl Csrf {
    pub const DEFAULT_LIFETIME_SECS: u64 = 15 * 60;

    pub fn lifetime_secs(&self) -> u64 {
        self.lifetime_secs.unwrap_or(Self::DEFAULT_LIFETIME_SECS)
    }
}

// Settings get logged at startup.
impl std::fmt::Debug for Csrf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Csrf")
            .field("lifetime_secs", &self.lifetime_secs())
            .field("secret_hex", &self.secret_hex.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Cookie {
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for Cookie {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSite::Lax,
        }
    }
}

#[derive(Deserialize)]
pub struct Account {
    pub user_id: i64,
    pub login: String,
    /// Argon2 PHC string, see `bin/hash_password.rs`.
    pub password_hash: String,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("user_id", &self.user_id)
            .field("login", &self.login)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

const ENV_PREFIX: &str = "GATEKEEPER";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}
