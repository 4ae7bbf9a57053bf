use super::protocol::{RpcErrorCode, RpcErrorResponse};
use crate::application_port::SessionError;
use crate::logger::*;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Rejection, reject};

#[derive(Debug)]
pub struct RpcRejection(pub SessionError);

impl reject::Reject for RpcRejection {}

impl RpcErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            RpcErrorCode::NotFound => StatusCode::NOT_FOUND,
            RpcErrorCode::CorruptBinding => StatusCode::UNPROCESSABLE_ENTITY,
            RpcErrorCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            RpcErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<&SessionError> for RpcErrorCode {
    fn from(error: &SessionError) -> Self {
        match error {
            SessionError::NotFound => RpcErrorCode::NotFound,
            SessionError::CorruptBinding(_) => RpcErrorCode::CorruptBinding,
            SessionError::Store(_) | SessionError::Unavailable(_) => {
                RpcErrorCode::StoreUnavailable
            }
        }
    }
}

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (code, message) = if let Some(RpcRejection(e)) = err.find::<RpcRejection>() {
        (RpcErrorCode::from(e), e.to_string())
    } else if err.is_not_found() {
        (RpcErrorCode::NotFound, "no such route".to_string())
    } else {
        warn!("unhandled rejection: {:?}", err);
        (RpcErrorCode::BadRequest, format!("{:?}", err))
    };

    let json = warp::reply::json(&RpcErrorResponse { code, message });
    Ok(warp::reply::with_status(json, code.status()))
}
