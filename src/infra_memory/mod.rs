mod account_repo_static;
mod session_store_memory;

pub use account_repo_static::*;
pub use session_store_memory::*;
