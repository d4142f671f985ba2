//! Sign Up Use Case
//!
//! Creates a new user account and signs it in.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::application::config::AuthConfig;
use crate::application::issue_token::IssueTokenUseCase;
use crate::application::session_token::open_session;
use crate::application::sign_in::AuthenticatedOutput;
use crate::application::verifier::derive_bounded;
use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::AuthStore;
use crate::domain::value_object::{
    address::Address, email::Email, principal::SessionUser, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub addresses: Vec<Address>,
}

pub struct SignUpUseCase<R>
where
    R: AuthStore,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    permits: Arc<Semaphore>,
}

impl<R> SignUpUseCase<R>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<AuthenticatedOutput> {
        let email = Email::new(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        let raw_password =
            RawPassword::new(input.password).map_err(|e| AuthError::Validation(e.to_string()))?;

        // Checked before hashing; the unique index still catches races.
        if self.repo.email_exists(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let key = derive_bounded(
            &self.permits,
            raw_password.into_inner(),
            self.config.pbkdf2_params(),
        )
        .await?;

        let user = User::new(email, input.name, input.addresses);
        let credential = Credential::new(user.id, key);
        self.repo.create_user(&user, &credential).await?;

        let principal = SessionUser::from(&user);
        let session_token = open_session(&self.repo, &self.config, principal.clone()).await?;
        let jwt = IssueTokenUseCase::new(self.config.clone()).execute(&principal)?;

        tracing::info!(user_id = %user.id, email = %user.email, "User signed up");

        Ok(AuthenticatedOutput {
            principal,
            session_token,
            jwt,
        })
    }
}
