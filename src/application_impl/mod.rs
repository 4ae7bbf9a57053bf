mod auth_service_impl;
mod csrf_service_impl;
mod csrf_token_jwt;
mod session_service_impl;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service_impl::*;
pub use csrf_service_impl::*;
pub use csrf_token_jwt::*;
pub use session_service_impl::*;
