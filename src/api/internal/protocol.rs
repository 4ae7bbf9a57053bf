//! JSON bodies exchanged between front ends and the session service.

use crate::domain_model::{SessionCheck, SessionId, UserId};
use serde::{Deserialize, Serialize};

pub const SESSIONS_PATH: &str = "internal/v1/sessions";

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub user_id: UserId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionIdRequest {
    pub unique_id: SessionId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: UserId,
    pub unique_id: SessionId,
}

impl From<SessionCheck> for SessionResponse {
    fn from(check: SessionCheck) -> Self {
        SessionResponse {
            user_id: check.user_id,
            unique_id: check.unique_id,
        }
    }
}

impl From<SessionResponse> for SessionCheck {
    fn from(response: SessionResponse) -> Self {
        SessionCheck {
            user_id: response.user_id,
            unique_id: response.unique_id,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeleteSessionResponse {}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpcErrorCode {
    NotFound,
    CorruptBinding,
    StoreUnavailable,
    BadRequest,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcErrorResponse {
    pub code: RpcErrorCode,
    pub message: String,
}
