//! Sign In Use Case
//!
//! Authenticates a user by email and password and creates a session.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::application::config::AuthConfig;
use crate::application::issue_token::IssueTokenUseCase;
use crate::application::session_token::open_session;
use crate::application::verifier::{CredentialVerifier, PasswordCredential, PasswordVerifier};
use crate::domain::repository::AuthStore;
use crate::domain::value_object::principal::SessionUser;
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Result of a successful sign up or sign in
pub struct AuthenticatedOutput {
    pub principal: SessionUser,
    /// Session cookie value
    pub session_token: String,
    /// Token cookie value
    pub jwt: String,
}

pub struct SignInUseCase<R>
where
    R: AuthStore,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    permits: Arc<Semaphore>,
}

impl<R> SignInUseCase<R>
where
    R: AuthStore,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, permits: Arc<Semaphore>) -> Self {
        Self {
            repo,
            config,
            permits,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<AuthenticatedOutput> {
        let verifier =
            PasswordVerifier::new(self.repo.clone(), self.config.clone(), self.permits.clone());

        let principal = verifier
            .verify(PasswordCredential {
                email: input.email,
                password: input.password,
            })
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let session_token = open_session(&self.repo, &self.config, principal.clone()).await?;
        let jwt = IssueTokenUseCase::new(self.config.clone()).execute(&principal)?;

        tracing::info!(user_id = %principal.id, "User signed in");

        Ok(AuthenticatedOutput {
            principal,
            session_token,
            jwt,
        })
    }
}
