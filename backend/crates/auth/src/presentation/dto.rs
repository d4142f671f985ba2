//! API DTOs (Data Transfer Objects)

use kernel::id::{OrderId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::ProfileChanges;
use crate::domain::value_object::{
    address::Address, email::Email, principal::SessionUser, user_role::UserRole,
};

// ============================================================================
// Sign Up / Login
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by signup and login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub id: UserId,
    pub role: UserRole,
    pub token: String,
    pub email: Email,
    pub addresses: Vec<Address>,
    pub orders: Vec<OrderId>,
}

impl AuthResponse {
    pub fn new(principal: SessionUser, token: String) -> Self {
        Self {
            id: principal.id,
            role: principal.role,
            token,
            email: principal.email,
            addresses: principal.addresses,
            orders: principal.orders,
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// `PATCH /users`. Role, email and password are not accepted here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    #[serde(alias = "ProfileUrl")]
    pub profile_url: Option<String>,
    pub addresses: Option<Vec<Address>>,
}

impl From<ProfileUpdateRequest> for ProfileChanges {
    fn from(req: ProfileUpdateRequest) -> Self {
        Self {
            name: req.name,
            profile_url: req.profile_url,
            addresses: req.addresses,
        }
    }
}
