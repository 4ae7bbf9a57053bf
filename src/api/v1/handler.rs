use super::context::RequestContext;
use super::cookie::{CookiePolicy, append_set_cookie};
use super::error::*;
use crate::application_port::*;
use crate::domain_model::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::reply::Response;
use warp::{Reply, reject};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: UserId,
}

pub async fn login(
    body: LoginRequest,
    auth_service: Arc<dyn AuthService>,
    cookies: Arc<CookiePolicy>,
) -> Result<Response, warp::Rejection> {
    let login_input = LoginInput {
        login: body.login,
        password: body.password,
    };
    let session = auth_service
        .login(login_input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let mut res = warp::reply::json(&ApiResponse::ok(LoginResponse {
        user_id: session.user_id,
    }))
    .into_response();
    append_set_cookie(&mut res, cookies.session_cookie(&session.unique_id))
        .map_err(reject::custom)?;
    Ok(res)
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse;

pub async fn logout(
    ctx: RequestContext,
    auth_service: Arc<dyn AuthService>,
    cookies: Arc<CookiePolicy>,
) -> Result<Response, warp::Rejection> {
    let session = ctx
        .session()
        .ok_or_else(|| reject::custom(ApiErrorCode::Unauthenticated))?;
    auth_service
        .logout(&session.unique_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let mut res = warp::reply::json(&ApiResponse::ok(LogoutResponse)).into_response();
    append_set_cookie(&mut res, cookies.expired_session_cookie()).map_err(reject::custom)?;
    append_set_cookie(&mut res, cookies.expired_csrf_cookie()).map_err(reject::custom)?;
    Ok(res)
}

#[derive(Debug, Serialize)]
pub struct CsrfTokenResponse {
    pub token: CsrfToken,
    pub expires_at: DateTime<Utc>,
}

pub async fn issue_csrf_token(
    ctx: RequestContext,
    csrf_service: Arc<dyn CsrfChecker>,
    cookies: Arc<CookiePolicy>,
) -> Result<Response, warp::Rejection> {
    let session = ctx
        .session()
        .ok_or_else(|| reject::custom(ApiErrorCode::Unauthenticated))?;
    let issued = csrf_service
        .create(&session.unique_id, session.user_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let cookie = cookies.csrf_cookie(&issued.token);
    let mut res = warp::reply::json(&ApiResponse::ok(CsrfTokenResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
    .into_response();
    append_set_cookie(&mut res, cookie).map_err(reject::custom)?;
    Ok(res)
}

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub authenticated: bool,
    pub user_id: Option<UserId>,
}

pub async fn whoami(ctx: RequestContext) -> Result<impl warp::Reply, warp::Rejection> {
    let response = WhoAmIResponse {
        authenticated: ctx.session().is_some(),
        user_id: ctx.user_id(),
    };
    Ok(warp::reply::json(&ApiResponse::ok(response)))
}
