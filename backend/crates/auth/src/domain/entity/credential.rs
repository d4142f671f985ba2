//! Credential Entity
//!
//! PBKDF2 salt and derived key for one user. Deliberately not `Serialize`.

use kernel::id::UserId;
use platform::password::DerivedKey;

#[derive(Debug, Clone)]
pub struct Credential {
    pub user_id: UserId,
    pub key: DerivedKey,
}

impl Credential {
    pub fn new(user_id: UserId, key: DerivedKey) -> Self {
        Self { user_id, key }
    }
}
