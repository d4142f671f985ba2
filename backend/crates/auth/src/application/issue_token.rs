//! Issue Token Use Case
//!
//! Signs the `jwt` cookie value for an authenticated principal.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::value_object::principal::{SessionUser, TokenClaims};
use crate::error::{AuthError, AuthResult};

pub struct IssueTokenUseCase {
    config: Arc<AuthConfig>,
}

impl IssueTokenUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self, principal: &SessionUser) -> AuthResult<String> {
        let ttl_secs = i64::try_from(self.config.jwt_ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = TokenClaims::for_user(principal, Utc::now().timestamp(), ttl_secs);

        self.config
            .jwt_codec()
            .encode(&claims)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}
