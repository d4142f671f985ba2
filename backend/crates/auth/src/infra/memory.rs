//! In-Memory Repository
//!
//! Same contract as the PostgreSQL store, kept in process. Used by tests and
//! for running the auth routes without a database.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{OrderId, UserId};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, credential::Credential, user::User};
use crate::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use crate::domain::value_object::{email::Email, principal::SessionUser, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    credentials: HashMap<UserId, Credential>,
    sessions: HashMap<Uuid, AuthSession>,
}

#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    state: Arc<RwLock<State>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an order id against a user, as placing an order would
    pub async fn push_order(&self, user_id: &UserId, order_id: OrderId) {
        if let Some(user) = self.state.write().await.users.get_mut(user_id) {
            user.orders.push(order_id);
        }
    }

    pub async fn set_role(&self, user_id: &UserId, role: UserRole) {
        if let Some(user) = self.state.write().await.users.get_mut(user_id) {
            user.role = role;
        }
    }

    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    /// Stored credential, for asserting on what was persisted
    pub async fn credential_of(&self, user_id: &UserId) -> Option<Credential> {
        self.state.read().await.credentials.get(user_id).cloned()
    }
}

impl UserRepository for MemoryAuthRepository {
    async fn create_user(&self, user: &User, credential: &Credential) -> AuthResult<()> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        state.users.insert(user.id, user.clone());
        state.credentials.insert(credential.user_id, credential.clone());
        Ok(())
    }

    async fn find_user_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.state.read().await.users.get(user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| &u.email == email).cloned())
    }

    async fn email_exists(&self, email: &Email) -> AuthResult<bool> {
        let state = self.state.read().await;
        Ok(state.users.values().any(|u| &u.email == email))
    }

    async fn update_profile(&self, user: &User) -> AuthResult<()> {
        let mut state = self.state.write().await;
        let stored = state
            .users
            .get_mut(&user.id)
            .ok_or(AuthError::UserNotFound)?;

        stored.name = user.name.clone();
        stored.profile_url = user.profile_url.clone();
        stored.addresses = user.addresses.clone();
        stored.updated_at = user.updated_at;
        Ok(())
    }
}

impl CredentialRepository for MemoryAuthRepository {
    async fn find_credential(&self, user_id: &UserId) -> AuthResult<Option<Credential>> {
        Ok(self.state.read().await.credentials.get(user_id).cloned())
    }
}

impl AuthSessionRepository for MemoryAuthRepository {
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()> {
        self.state
            .write()
            .await
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>> {
        let state = self.state.read().await;
        Ok(state
            .sessions
            .get(&session_id)
            .filter(|s| !s.is_expired())
            .cloned())
    }

    async fn touch_session(&self, session: &AuthSession) -> AuthResult<()> {
        if let Some(stored) = self.state.write().await.sessions.get_mut(&session.session_id) {
            stored.last_activity_at = session.last_activity_at;
        }
        Ok(())
    }

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
        self.state.write().await.sessions.remove(&session_id);
        Ok(())
    }

    async fn refresh_principal(
        &self,
        user_id: &UserId,
        principal: &SessionUser,
    ) -> AuthResult<u64> {
        let mut state = self.state.write().await;
        let mut updated = 0;
        for session in state
            .sessions
            .values_mut()
            .filter(|s| &s.user_id == user_id && !s.is_expired())
        {
            session.principal = principal.clone();
            updated += 1;
        }
        Ok(updated)
    }

    async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.expires_at_ms >= now_ms);
        Ok((before - state.sessions.len()) as u64)
    }
}
