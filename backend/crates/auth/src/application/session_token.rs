//! Session Token
//!
//! Cookie value format: `<session uuid>.<base64url(HMAC-SHA256(uuid))>`.

use std::sync::Arc;

use platform::crypto::{from_base64_url, hmac_sha256, to_base64_url, verify_hmac_sha256};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::principal::SessionUser;
use crate::error::{AuthError, AuthResult};

pub fn sign_session_token(session_id: Uuid, secret: &[u8]) -> String {
    let id = session_id.to_string();
    let signature = hmac_sha256(secret, id.as_bytes());
    format!("{}.{}", id, to_base64_url(&signature))
}

/// Verify the signature and return the session id
pub fn parse_session_token(token: &str, secret: &[u8]) -> AuthResult<Uuid> {
    let (id, signature_b64) = token.split_once('.').ok_or(AuthError::Unauthorized)?;

    let signature = from_base64_url(signature_b64).map_err(|_| AuthError::Unauthorized)?;
    if !verify_hmac_sha256(secret, id.as_bytes(), &signature) {
        return Err(AuthError::Unauthorized);
    }

    id.parse().map_err(|_| AuthError::Unauthorized)
}

/// Persist a new session for `principal` and return its cookie value
pub async fn open_session<S>(
    repo: &Arc<S>,
    config: &AuthConfig,
    principal: SessionUser,
) -> AuthResult<String>
where
    S: AuthSessionRepository,
{
    let session = AuthSession::new(principal, config.session_ttl_chrono());
    repo.create_session(&session).await?;

    tracing::debug!(
        session_id = %session.session_id,
        user_id = %session.user_id,
        "Session opened"
    );

    Ok(sign_session_token(session.session_id, &config.session_secret))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = &[7u8; 32];

    #[test]
    fn test_sign_then_parse() {
        let id = Uuid::new_v4();
        let token = sign_session_token(id, SECRET);
        assert_eq!(parse_session_token(&token, SECRET).unwrap(), id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign_session_token(Uuid::new_v4(), SECRET);
        assert!(parse_session_token(&token, &[8u8; 32]).is_err());
    }

    #[test]
    fn test_tampered_id_rejected() {
        let token = sign_session_token(Uuid::new_v4(), SECRET);
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::new_v4(), sig);
        assert!(parse_session_token(&forged, SECRET).is_err());
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(parse_session_token("", SECRET).is_err());
        assert!(parse_session_token("no-dot", SECRET).is_err());
        assert!(parse_session_token("a.!!!", SECRET).is_err());
    }
}
