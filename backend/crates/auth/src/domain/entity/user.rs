//! User Entity
//!
//! Profile data only. Credential material lives in [`Credential`] and is
//! never part of this type, so a `User` can be serialized as-is.
//!
//! [`Credential`]: crate::domain::entity::credential::Credential

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, UserId};
use serde::Serialize;

use crate::domain::value_object::{address::Address, email::Email, user_role::UserRole};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub role: UserRole,
    pub name: Option<String>,
    pub profile_url: Option<String>,
    pub addresses: Vec<Address>,
    /// Ids of orders placed by this user, oldest first
    pub orders: Vec<OrderId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a user may change on their own profile
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub profile_url: Option<String>,
    pub addresses: Option<Vec<Address>>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.profile_url.is_none() && self.addresses.is_none()
    }
}

impl User {
    pub fn new(email: Email, name: Option<String>, addresses: Vec<Address>) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::new(),
            email,
            role: UserRole::default(),
            name,
            profile_url: None,
            addresses,
            orders: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a profile patch; absent fields are left untouched
    pub fn apply(&mut self, changes: ProfileChanges) {
        if changes.is_empty() {
            return;
        }
        if let Some(name) = changes.name {
            self.name = Some(name);
        }
        if let Some(url) = changes.profile_url {
            self.profile_url = Some(url);
        }
        if let Some(addresses) = changes.addresses {
            self.addresses = addresses;
        }
        self.updated_at = Utc::now();
    }
}
