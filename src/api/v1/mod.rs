mod context;
mod cookie;
mod error;
mod filter;
mod handler;
mod router;

pub use context::RequestContext;
pub use cookie::*;
pub use error::{ApiError, ApiErrorCode, recover_error};
pub use filter::{add_user_id, check_not_authorized, with_csrf, with_session};
pub use handler::ApiResponse;
pub use router::routes;
