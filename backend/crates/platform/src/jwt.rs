//! HS256 JSON Web Tokens
//!
//! Thin wrapper over `jsonwebtoken` that fixes the algorithm and keeps the
//! signing secret out of `Debug` output.

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token has expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::Invalid(err.to_string()),
        }
    }
}

/// Signs and verifies HS256 tokens with a single shared secret
#[derive(Clone)]
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn encode<C: Serialize>(&self, claims: &C) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| JwtError::Encoding(e.to_string()))
    }

    /// Verify signature and `exp`, then return the claims
    pub fn decode<C: DeserializeOwned>(&self, token: &str) -> Result<C, JwtError> {
        let data = decode::<C>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

impl fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtCodec")
            .field("algorithm", &"HS256")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Claims {
        sub: String,
        exp: i64,
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    #[test]
    fn test_encode_decode() {
        let codec = JwtCodec::new(b"test-secret");
        let claims = Claims {
            sub: "user-1".to_string(),
            exp: now() + 3600,
        };

        let token = codec.encode(&claims).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let decoded: Claims = codec.decode(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtCodec::new(b"secret-a")
            .encode(&Claims {
                sub: "user-1".to_string(),
                exp: now() + 3600,
            })
            .unwrap();

        let result = JwtCodec::new(b"secret-b").decode::<Claims>(&token);
        assert!(matches!(result, Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_expired_rejected() {
        let codec = JwtCodec::new(b"test-secret");
        let token = codec
            .encode(&Claims {
                sub: "user-1".to_string(),
                exp: now() - 10,
            })
            .unwrap();

        assert!(matches!(codec.decode::<Claims>(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_garbage_rejected() {
        let codec = JwtCodec::new(b"test-secret");
        assert!(codec.decode::<Claims>("not.a.token").is_err());
        assert!(codec.decode::<Claims>("").is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let codec = JwtCodec::new(b"super-secret-value");
        assert!(!format!("{:?}", codec).contains("super-secret-value"));
    }
}
