use super::error::RpcRejection;
use super::protocol::*;
use crate::application_port::{SessionChecker, SessionManager};
use std::sync::Arc;
use warp::reject;

pub async fn create_session(
    body: CreateSessionRequest,
    manager: Arc<dyn SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let created = manager
        .create(body.user_id)
        .await
        .map_err(|e| reject::custom(RpcRejection(e)))?;
    Ok(warp::reply::json(&SessionResponse::from(created)))
}

pub async fn check_session(
    body: SessionIdRequest,
    manager: Arc<dyn SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let checked = manager
        .check(&body.unique_id)
        .await
        .map_err(|e| reject::custom(RpcRejection(e)))?;
    Ok(warp::reply::json(&SessionResponse::from(checked)))
}

pub async fn delete_session(
    body: SessionIdRequest,
    manager: Arc<dyn SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    manager
        .delete(&body.unique_id)
        .await
        .map_err(|e| reject::custom(RpcRejection(e)))?;
    Ok(warp::reply::json(&DeleteSessionResponse::default()))
}

pub async fn health() -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::json(&HealthResponse {
        status: "ok".to_string(),
    }))
}
