mod auth_service;
mod csrf_service;
mod session_service;

pub use auth_service::*;
pub use csrf_service::*;
pub use session_service::*;
