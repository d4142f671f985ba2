//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.
//! Method names are unique across traits so one store can implement all of
//! them without call-site ambiguity.

use kernel::id::UserId;
use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, credential::Credential, user::User};
use crate::domain::value_object::{email::Email, principal::SessionUser};
use crate::error::AuthResult;

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user and its credential atomically.
    /// A duplicate email yields `AuthError::EmailTaken`.
    async fn create_user(&self, user: &User, credential: &Credential) -> AuthResult<()>;

    async fn find_user_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn email_exists(&self, email: &Email) -> AuthResult<bool>;

    /// Write name, profile URL and addresses
    async fn update_profile(&self, user: &User) -> AuthResult<()>;
}

#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    async fn find_credential(&self, user_id: &UserId) -> AuthResult<Option<Credential>>;
}

#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find a session that has not yet expired
    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>>;

    /// Persist last activity
    async fn touch_session(&self, session: &AuthSession) -> AuthResult<()>;

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()>;

    /// Replace the stored projection on every live session of a user
    async fn refresh_principal(&self, user_id: &UserId, principal: &SessionUser)
    -> AuthResult<u64>;

    async fn cleanup_expired_sessions(&self) -> AuthResult<u64>;
}

/// Everything the auth handlers need from one store
pub trait AuthStore:
    UserRepository + CredentialRepository + AuthSessionRepository + Clone + Send + Sync + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository + CredentialRepository + AuthSessionRepository + Clone + Send + Sync + 'static
{
}
