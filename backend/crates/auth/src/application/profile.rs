//! Profile Use Case
//!
//! Read and edit the caller's own user record.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::{ProfileChanges, User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::principal::SessionUser;
use crate::error::{AuthError, AuthResult};

pub struct ProfileUseCase<R>
where
    R: UserRepository + AuthSessionRepository,
{
    repo: Arc<R>,
}

impl<R> ProfileUseCase<R>
where
    R: UserRepository + AuthSessionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn own(&self, user_id: &UserId) -> AuthResult<User> {
        self.repo
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Apply changes, then refresh the projection held by live sessions
    pub async fn update(&self, user_id: &UserId, changes: ProfileChanges) -> AuthResult<User> {
        let mut user = self.own(user_id).await?;

        if changes.is_empty() {
            return Ok(user);
        }

        user.apply(changes);
        self.repo.update_profile(&user).await?;

        let refreshed = self
            .repo
            .refresh_principal(&user.id, &SessionUser::from(&user))
            .await?;

        tracing::info!(user_id = %user.id, sessions_refreshed = refreshed, "Profile updated");

        Ok(user)
    }
}
