//! Network face of the session manager, served by the `session_service` binary.

mod error;
mod handler;
pub mod protocol;
mod router;

pub use error::recover_error;
pub use router::routes;
