use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Serialize, Deserialize)]
struct CsrfClaims {
    user_id: i64,
    session_id: String,
    iat: i64,
    exp: i64,
}

/// Stateless CSRF tokens: an HS256 JWT over `(user, session, iat, exp)`.
pub struct JwtCsrfTokenRepository {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtCsrfTokenRepository {
    pub fn new(secret: &CsrfSecret) -> Self {
        // Only the algorithm we sign with is accepted on the way back in.
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtCsrfTokenRepository {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait::async_trait]
impl CsrfTokenRepository for JwtCsrfTokenRepository {
    async fn create(&self, sources: &CsrfTokenSources) -> Result<CsrfToken, CsrfError> {
        let claims = CsrfClaims {
            user_id: sources.binding.user_id.0,
            session_id: sources.binding.session_id.as_str().to_string(),
            iat: Utc::now().timestamp(),
            exp: sources.expires_at.timestamp(),
        };
        let token = encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| CsrfError::Signing(e.to_string()))?;
        Ok(CsrfToken(token))
    }

    async fn check(&self, binding: &CsrfBinding, token: &CsrfToken) -> Result<(), CsrfError> {
        let data = decode::<CsrfClaims>(token.as_str(), &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidAlgorithm => CsrfError::WrongSigningMethod,
                ErrorKind::ExpiredSignature => CsrfError::Expired,
                _ => CsrfError::Malformed(e.to_string()),
            })?;
        let claims = data.claims;

        let same_session: bool = claims
            .session_id
            .as_bytes()
            .ct_eq(binding.session_id.as_str().as_bytes())
            .into();
        if claims.user_id != binding.user_id.0 || !same_session {
            return Err(CsrfError::BindingMismatch);
        }
        Ok(())
    }
}
