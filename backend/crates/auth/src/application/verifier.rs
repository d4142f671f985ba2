//! Credential Verifiers
//!
//! Two ways of proving identity behind one interface:
//! - [`PasswordVerifier`]: email + password, PBKDF2 re-derivation
//! - [`TokenVerifier`]: the `jwt` cookie, re-resolved against the store
//!
//! `Ok(None)` means "not authenticated". `Err` is reserved for
//! infrastructure failures so callers never confuse the two.

use std::future::Future;
use std::sync::Arc;

use platform::jwt::JwtCodec;
use platform::password::{ClearTextPassword, DerivedKey, Pbkdf2Params, derive_key, verify_key};
use tokio::sync::Semaphore;

use crate::application::config::AuthConfig;
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    principal::{SessionUser, TokenClaims},
    user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

pub trait CredentialVerifier {
    type Credential;

    fn verify(
        &self,
        credential: Self::Credential,
    ) -> impl Future<Output = AuthResult<Option<SessionUser>>> + Send;
}

// ============================================================================
// Bounded key derivation
// ============================================================================

async fn acquire(
    permits: &Semaphore,
) -> AuthResult<tokio::sync::SemaphorePermit<'_>> {
    permits
        .acquire()
        .await
        .map_err(|_| AuthError::Internal("Key derivation limiter closed".to_string()))
}

/// Derive a fresh key while holding a derivation permit
pub(crate) async fn derive_bounded(
    permits: &Semaphore,
    password: ClearTextPassword,
    params: Pbkdf2Params,
) -> AuthResult<DerivedKey> {
    let _permit = acquire(permits).await?;
    Ok(derive_key(password, params).await?)
}

async fn verify_bounded(
    permits: &Semaphore,
    password: ClearTextPassword,
    stored: DerivedKey,
    params: Pbkdf2Params,
) -> AuthResult<bool> {
    let _permit = acquire(permits).await?;
    Ok(verify_key(password, stored, params).await?)
}

// ============================================================================
// Password
// ============================================================================

pub struct PasswordCredential {
    pub email: String,
    pub password: String,
}

pub struct PasswordVerifier<R> {
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    permits: Arc<Semaphore>,
}

impl<R> PasswordVerifier<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, permits: Arc<Semaphore>) -> Self {
        Self {
            repo,
            config,
            permits,
        }
    }
}

impl<R> CredentialVerifier for PasswordVerifier<R>
where
    R: UserRepository + CredentialRepository + Send + Sync,
{
    type Credential = PasswordCredential;

    async fn verify(&self, credential: PasswordCredential) -> AuthResult<Option<SessionUser>> {
        let Ok(email) = Email::new(&credential.email) else {
            return Ok(None);
        };
        let Ok(password) = RawPassword::new(credential.password) else {
            return Ok(None);
        };
        let params = self.config.pbkdf2_params();

        let user = self.repo.find_user_by_email(&email).await?;
        let stored = match &user {
            Some(user) => self.repo.find_credential(&user.id).await?,
            None => None,
        };

        let matched = match stored {
            Some(credential) => {
                verify_bounded(&self.permits, password.into_inner(), credential.key, params)
                    .await?
            }
            None => {
                // Same cost as a real check so response time does not reveal
                // whether the email is registered.
                derive_bounded(&self.permits, password.into_inner(), params).await?;
                false
            }
        };

        match (matched, user) {
            (true, Some(user)) => Ok(Some(SessionUser::from(&user))),
            _ => Ok(None),
        }
    }
}

// ============================================================================
// Token
// ============================================================================

pub struct TokenVerifier<R> {
    repo: Arc<R>,
    codec: JwtCodec,
}

impl<R> TokenVerifier<R> {
    pub fn new(repo: Arc<R>, config: &AuthConfig) -> Self {
        Self {
            repo,
            codec: config.jwt_codec(),
        }
    }
}

impl<R> CredentialVerifier for TokenVerifier<R>
where
    R: UserRepository + Send + Sync,
{
    type Credential = String;

    async fn verify(&self, token: String) -> AuthResult<Option<SessionUser>> {
        let claims: TokenClaims = match self.codec.decode(&token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected token cookie");
                return Ok(None);
            }
        };

        let user = self.repo.find_user_by_id(&claims.id).await?;
        Ok(user.as_ref().map(SessionUser::from))
    }
}
