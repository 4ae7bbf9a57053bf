//! Session and CSRF gates, expressed as warp filters.
//!
//! A state-changing route is assembled as `with_csrf(with_session(..), ..)`:
//! the session gate runs first and its `RequestContext` is what the CSRF gate
//! verifies the token against.

use super::context::RequestContext;
use super::cookie::{CSRF_COOKIE, CSRF_HEADER, SESSION_COOKIE};
use super::error::ApiErrorCode;
use crate::application_port::*;
use crate::domain_model::*;
use crate::logger::*;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use warp::{Filter, Rejection, reject};

/// Require a live session. Missing cookie and invalid session are indistinguishable to the caller.
pub fn with_session<S>(
    sessions: Arc<S>,
) -> impl Filter<Extract = (RequestContext,), Error = Rejection> + Clone
where
    S: SessionChecker + ?Sized + 'static,
{
    warp::cookie::optional(SESSION_COOKIE)
        .and_then(move |cookie: Option<String>| require_session(sessions.clone(), cookie))
}

/// Only let anonymous callers through (login, registration).
pub fn check_not_authorized<S>(
    sessions: Arc<S>,
) -> impl Filter<Extract = (), Error = Rejection> + Clone
where
    S: SessionChecker + ?Sized + 'static,
{
    warp::cookie::optional(SESSION_COOKIE)
        .and_then(move |cookie: Option<String>| reject_authenticated(sessions.clone(), cookie))
        .untuple_one()
}

/// Resolve the caller if possible, never reject.
pub fn add_user_id<S>(
    sessions: Arc<S>,
) -> impl Filter<Extract = (RequestContext,), Error = Rejection> + Clone
where
    S: SessionChecker + ?Sized + 'static,
{
    warp::cookie::optional(SESSION_COOKIE)
        .and_then(move |cookie: Option<String>| resolve_optional(sessions.clone(), cookie))
}

/// Double-submit and signed-token check on top of an upstream context filter.
pub fn with_csrf<F, C>(
    context: F,
    csrf: Arc<C>,
) -> impl Filter<Extract = (RequestContext,), Error = Rejection> + Clone
where
    F: Filter<Extract = (RequestContext,), Error = Rejection> + Clone + Send + Sync + 'static,
    C: CsrfChecker + ?Sized + 'static,
{
    context
        .and(warp::header::optional::<String>(CSRF_HEADER))
        .and(warp::cookie::optional(CSRF_COOKIE))
        .and_then(
            move |ctx: RequestContext, header: Option<String>, cookie: Option<String>| {
                verify_csrf(csrf.clone(), ctx, header, cookie)
            },
        )
}

fn session_cookie(cookie: Option<String>) -> Option<SessionId> {
    cookie.filter(|value| !value.is_empty()).map(SessionId)
}

fn log_session_error(unique_id: &SessionId, e: &SessionError) {
    if e.is_infrastructure() {
        error!(session = ?unique_id, "session check failed: {}", e);
    } else {
        debug!(session = ?unique_id, "session rejected: {}", e);
    }
}

async fn require_session<S>(
    sessions: Arc<S>,
    cookie: Option<String>,
) -> Result<RequestContext, Rejection>
where
    S: SessionChecker + ?Sized,
{
    let Some(unique_id) = session_cookie(cookie) else {
        debug!("request without session cookie");
        return Err(reject::custom(ApiErrorCode::Unauthenticated));
    };

    match sessions.check(&unique_id).await {
        Ok(check) => Ok(RequestContext::authenticated(check)),
        Err(e) => {
            log_session_error(&unique_id, &e);
            Err(reject::custom(ApiErrorCode::Unauthenticated))
        }
    }
}

async fn reject_authenticated<S>(sessions: Arc<S>, cookie: Option<String>) -> Result<(), Rejection>
where
    S: SessionChecker + ?Sized,
{
    let Some(unique_id) = session_cookie(cookie) else {
        return Ok(());
    };

    match sessions.check(&unique_id).await {
        Ok(check) => {
            debug!(user_id = %check.user_id, "already authenticated");
            Err(reject::custom(ApiErrorCode::AlreadyAuthenticated))
        }
        Err(e) if e.is_infrastructure() => {
            log_session_error(&unique_id, &e);
            Err(reject::custom(ApiErrorCode::InternalError))
        }
        Err(_) => Ok(()),
    }
}

async fn resolve_optional<S>(
    sessions: Arc<S>,
    cookie: Option<String>,
) -> Result<RequestContext, Rejection>
where
    S: SessionChecker + ?Sized,
{
    let Some(unique_id) = session_cookie(cookie) else {
        return Ok(RequestContext::anonymous());
    };

    match sessions.check(&unique_id).await {
        Ok(check) => Ok(RequestContext::authenticated(check)),
        Err(e) => {
            log_session_error(&unique_id, &e);
            Ok(RequestContext::anonymous())
        }
    }
}

fn double_submitted(header: Option<String>, cookie: Option<String>) -> Option<CsrfToken> {
    let (header, cookie) = (header?, cookie?);
    if header.is_empty() {
        return None;
    }
    let equal: bool = header.as_bytes().ct_eq(cookie.as_bytes()).into();
    equal.then(|| CsrfToken(header))
}

async fn verify_csrf<C>(
    csrf: Arc<C>,
    ctx: RequestContext,
    header: Option<String>,
    cookie: Option<String>,
) -> Result<RequestContext, Rejection>
where
    C: CsrfChecker + ?Sized,
{
    let Some(token) = double_submitted(header, cookie) else {
        debug!(user_id = ?ctx.user_id(), "csrf header and cookie missing or different");
        return Err(reject::custom(ApiErrorCode::CsrfRejected));
    };

    let Some(session) = ctx.session() else {
        error!("csrf gate reached without an authenticated session; check filter order");
        return Err(reject::custom(ApiErrorCode::InternalError));
    };

    csrf.check(&session.unique_id, session.user_id, &token)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(ctx)
}
