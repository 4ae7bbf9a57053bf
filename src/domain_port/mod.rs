// store

mod session_store;

pub use session_store::*;

// repo

mod account_repo;
mod csrf_token_repo;

pub use account_repo::*;
pub use csrf_token_repo::*;
