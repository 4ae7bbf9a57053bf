use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(UserId)
    }
}

/// A login known to the account directory.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub user_id: UserId,
    pub login: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}
