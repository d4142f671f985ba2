//! Authenticated Principal
//!
//! `SessionUser` is the reduced user projection carried by a live session
//! and handed to guarded handlers. `TokenClaims` is what the `jwt` cookie
//! signs. Neither carries credential material.

use kernel::id::{OrderId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::{address::Address, email::Email, user_role::UserRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub role: UserRole,
    pub email: Email,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub orders: Vec<OrderId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "ProfileUrl")]
    pub profile_url: Option<String>,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            email: user.email.clone(),
            addresses: user.addresses.clone(),
            orders: user.orders.clone(),
            name: user.name.clone(),
            profile_url: user.profile_url.clone(),
        }
    }
}

/// Claims of the `jwt` cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: UserId,
    pub role: UserRole,
    pub email: Email,
    pub addresses: Vec<Address>,
    pub orders: Vec<OrderId>,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl TokenClaims {
    pub fn for_user(user: &SessionUser, issued_at: i64, ttl_secs: i64) -> Self {
        Self {
            id: user.id,
            role: user.role,
            email: user.email.clone(),
            addresses: user.addresses.clone(),
            orders: user.orders.clone(),
            iat: issued_at,
            exp: issued_at + ttl_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal() -> SessionUser {
        SessionUser {
            id: UserId::new(),
            role: UserRole::User,
            email: Email::new("a@example.com").unwrap(),
            addresses: vec![],
            orders: vec![],
            name: Some("Asha".into()),
            profile_url: None,
        }
    }

    #[test]
    fn test_session_user_json_shape() {
        let json = serde_json::to_value(principal()).unwrap();
        for key in ["id", "role", "email", "addresses", "orders", "name", "profileUrl"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json.get("password").is_none());
        assert!(json.get("salt").is_none());
    }

    #[test]
    fn test_session_user_accepts_legacy_profile_key() {
        let mut json = serde_json::to_value(principal()).unwrap();
        let obj = json.as_object_mut().unwrap();
        obj.remove("profileUrl");
        obj.insert("ProfileUrl".into(), "https://img/x.png".into());
        let user: SessionUser = serde_json::from_value(json).unwrap();
        assert_eq!(user.profile_url.as_deref(), Some("https://img/x.png"));
    }

    #[test]
    fn test_claims_expiry() {
        let claims = TokenClaims::for_user(&principal(), 1_000, 3_600);
        assert_eq!(claims.exp, 4_600);
        assert_eq!(claims.iat, 1_000);
    }
}
