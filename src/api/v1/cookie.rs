use super::error::ApiErrorCode;
use crate::domain_model::{CsrfToken, SessionId};
use std::time::Duration;
use warp::http::HeaderValue;
use warp::http::header::SET_COOKIE;
use warp::reply::Response;

pub const SESSION_COOKIE: &str = "session_id";
pub const CSRF_COOKIE: &str = "csrf";
pub const CSRF_HEADER: &str = "x-csrf-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes of the cookies this service sets.
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
    /// Client-side lifetime of the session cookie; independent of the store TTL.
    pub session_max_age: Duration,
    pub csrf_max_age: Duration,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSite::Lax,
            session_max_age: Duration::from_secs(24 * 60 * 60),
            csrf_max_age: Duration::from_secs(15 * 60),
        }
    }
}

impl CookiePolicy {
    pub fn session_cookie(&self, unique_id: &SessionId) -> String {
        self.build(SESSION_COOKIE, unique_id.as_str(), true, Some(self.session_max_age))
    }

    // Scripts need to read this one to echo it into the header.
    pub fn csrf_cookie(&self, token: &CsrfToken) -> String {
        self.build(CSRF_COOKIE, token.as_str(), false, Some(self.csrf_max_age))
    }

    pub fn expired_session_cookie(&self) -> String {
        self.build(SESSION_COOKIE, "", true, Some(Duration::ZERO))
    }

    pub fn expired_csrf_cookie(&self) -> String {
        self.build(CSRF_COOKIE, "", false, Some(Duration::ZERO))
    }

    fn build(&self, name: &str, value: &str, http_only: bool, max_age: Option<Duration>) -> String {
        let mut cookie = format!("{}={}", name, value);

        if http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str("; Path=/");

        if let Some(max_age) = max_age {
            cookie.push_str(&format!("; Max-Age={}", max_age.as_secs()));
        }

        cookie
    }
}

pub fn append_set_cookie(res: &mut Response, cookie: String) -> Result<(), ApiErrorCode> {
    let value = HeaderValue::from_str(&cookie).map_err(ApiErrorCode::internal)?;
    res.headers_mut().append(SET_COOKIE, value);
    Ok(())
}
