//! User Password Value Object
//!
//! Domain wrapper over `platform::password`. The clear text only lives as
//! long as the request that carried it.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, PasswordPolicyError};
use std::fmt;

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
                    .with_action("Please enter a password")
            }
            PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "Password must be at most {max} characters (got {actual})"
            ))
            .with_action("Please choose a shorter password"),
        })?;

        Ok(Self(clear_text))
    }

    pub(crate) fn into_inner(self) -> ClearTextPassword {
        self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_password_rejects_blank() {
        assert!(RawPassword::new(String::new()).is_err());
        assert!(RawPassword::new("  \t".to_string()).is_err());
        assert!(RawPassword::new("pass".to_string()).is_ok());
    }

    #[test]
    fn test_raw_password_debug_redacted() {
        let raw = RawPassword::new("correct horse".to_string()).unwrap();
        assert!(!format!("{raw:?}").contains("horse"));
    }
}
