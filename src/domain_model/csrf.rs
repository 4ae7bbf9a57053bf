use crate::domain_model::{SessionId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// The `(user, session)` pair a CSRF token is bound to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CsrfBinding {
    pub user_id: UserId,
    pub session_id: SessionId,
}

/// Material a token is minted from. Never persisted.
#[derive(Debug, Clone)]
pub struct CsrfTokenSources {
    pub binding: CsrfBinding,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CsrfToken(pub String);

impl CsrfToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IssuedCsrfToken {
    pub token: CsrfToken,
    pub expires_at: DateTime<Utc>,
}

/// Symmetric key the CSRF tokens are signed with.
#[derive(Clone)]
pub struct CsrfSecret(Vec<u8>);

impl CsrfSecret {
    pub const GENERATED_LEN: usize = 32;

    pub fn new(bytes: Vec<u8>) -> Self {
        CsrfSecret(bytes)
    }

    /// Fresh key from the OS RNG. Only valid for this process.
    pub fn generate() -> Self {
        use rand::RngCore;
        let mut bytes = vec![0u8; Self::GENERATED_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        CsrfSecret(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s.trim())?;
        if bytes.is_empty() {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        Ok(CsrfSecret(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CsrfSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CsrfSecret(<{} bytes>)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_secrets_differ() {
        let a = CsrfSecret::generate();
        let b = CsrfSecret::generate();
        assert_eq!(a.as_bytes().len(), CsrfSecret::GENERATED_LEN);
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn hex_secret_rejects_garbage_and_empty() {
        assert!(CsrfSecret::from_hex("zz").is_err());
        assert!(CsrfSecret::from_hex("").is_err());
        assert_eq!(CsrfSecret::from_hex("0aff").unwrap().as_bytes(), &[0x0a, 0xff]);
    }

    #[test]
    fn debug_does_not_print_key_material() {
        let secret = CsrfSecret::new(b"super-secret".to_vec());
        assert_eq!(format!("{:?}", secret), "CsrfSecret(<12 bytes>)");
    }
}
