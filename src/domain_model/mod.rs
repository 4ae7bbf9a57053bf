mod csrf;
mod session;
mod user;

pub use csrf::*;
pub use session::*;
pub use user::*;
