use super::handler::ApiResponse;
use crate::application_port::*;
use crate::logger::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let code = if let Some(code) = err.find::<ApiErrorCode>() {
        code.clone()
    } else if err.is_not_found() {
        ApiErrorCode::NotFound
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        debug!("bad request body: {}", e);
        ApiErrorCode::BadRequest
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some()
        || err.find::<warp::reject::LengthRequired>().is_some()
    {
        ApiErrorCode::BadRequest
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ApiErrorCode::NotFound
    } else {
        error!("unhandled rejection: {:?}", err);
        ApiErrorCode::InternalError
    };

    let json = warp::reply::json(&ApiResponse::<()>::err(code.clone(), code.to_string()));
    Ok(warp::reply::with_status(json, code.status()))
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ApiErrorCode {
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Already authenticated")]
    AlreadyAuthenticated,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Request forgery check failed")]
    CsrfRejected,
    #[error("Bad request")]
    BadRequest,
    #[error("Not found")]
    NotFound,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        error!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::Unauthenticated | ApiErrorCode::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ApiErrorCode::AlreadyAuthenticated | ApiErrorCode::CsrfRejected => {
                StatusCode::FORBIDDEN
            }
            ApiErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<AuthError> for ApiErrorCode {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => ApiErrorCode::InvalidCredentials,
            AuthError::Session(e) => ApiErrorCode::internal(e),
            AuthError::InternalError(e) => ApiErrorCode::internal(e),
        }
    }
}

impl From<CsrfError> for ApiErrorCode {
    fn from(error: CsrfError) -> Self {
        match error {
            CsrfError::Signing(e) => ApiErrorCode::internal(e),
            other => {
                warn!(reason = %other, "csrf token refused");
                ApiErrorCode::CsrfRejected
            }
        }
    }
}
