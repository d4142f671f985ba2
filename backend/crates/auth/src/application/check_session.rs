//! Check Session Use Case
//!
//! Resolves a session cookie to the principal stored with the session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::parse_session_token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::principal::SessionUser;
use crate::error::{AuthError, AuthResult};

pub struct CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, session_token: &str) -> AuthResult<SessionUser> {
        Ok(self.get_session(session_token).await?.principal)
    }

    /// Get session and record activity
    pub async fn get_session(&self, session_token: &str) -> AuthResult<AuthSession> {
        let session_id = parse_session_token(session_token, &self.config.session_secret)?;

        let mut session = self
            .session_repo
            .find_session(session_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if session.is_expired() {
            self.session_repo.delete_session(session_id).await?;
            return Err(AuthError::Unauthorized);
        }

        session.touch();

        // Activity is informational; do not hold the request for it
        let session_clone = session.clone();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.touch_session(&session_clone).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(session)
    }
}
