//! Password Key Derivation and Verification
//!
//! Passwords are never stored. A random 16-byte salt and a 32-byte key
//! derived with PBKDF2-HMAC-SHA256 are stored instead.
//!
//! ## Security Features
//! - 310 000 PBKDF2 rounds by default (OWASP 2023 guidance for SHA-256)
//! - Derivation runs on the blocking pool, never on an async worker
//! - Zeroization of the clear text on drop
//! - Constant-time key comparison

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{constant_time_eq, random_bytes};

// ============================================================================
// Constants
// ============================================================================

pub const SALT_LENGTH: usize = 16;

pub const KEY_LENGTH: usize = 32;

pub const DEFAULT_ROUNDS: u32 = 310_000;

/// Upper bound on accepted input, in characters
pub const MAX_PASSWORD_LENGTH: usize = 256;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid stored key: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
}

// ============================================================================
// Parameters
// ============================================================================

/// PBKDF2 cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2Params {
    pub rounds: u32,
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
        }
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone`
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = raw.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        Ok(Self(raw))
    }

    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Derive a key with a fresh random salt (CPU bound, blocking)
    pub fn derive(&self, params: Pbkdf2Params) -> DerivedKey {
        let salt = random_bytes(SALT_LENGTH);
        let key = self.derive_with_salt(&salt, params);
        DerivedKey { salt, key }
    }

    fn derive_with_salt(&self, salt: &[u8], params: Pbkdf2Params) -> Vec<u8> {
        let mut key = vec![0u8; KEY_LENGTH];
        pbkdf2_hmac::<Sha256>(self.as_bytes(), salt, params.rounds, &mut key);
        key
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Derived Key (Safe to store)
// ============================================================================

/// Salt plus PBKDF2 output, as persisted
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey {
    salt: Vec<u8>,
    key: Vec<u8>,
}

impl DerivedKey {
    /// Rebuild from stored columns
    pub fn from_parts(salt: Vec<u8>, key: Vec<u8>) -> Result<Self, PasswordHashError> {
        if key.len() != KEY_LENGTH {
            return Err(PasswordHashError::InvalidKeyLength {
                expected: KEY_LENGTH,
                actual: key.len(),
            });
        }
        Ok(Self { salt, key })
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Re-derive with the stored salt and compare in constant time
    pub fn verify(&self, password: &ClearTextPassword, params: Pbkdf2Params) -> bool {
        let candidate = password.derive_with_salt(&self.salt, params);
        constant_time_eq(&candidate, &self.key)
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("salt", &"[SALT]")
            .field("key", &"[KEY]")
            .finish()
    }
}

// ============================================================================
// Async entry points
// ============================================================================

/// Derive a key on the blocking pool
pub async fn derive_key(
    password: ClearTextPassword,
    params: Pbkdf2Params,
) -> Result<DerivedKey, PasswordHashError> {
    tokio::task::spawn_blocking(move || password.derive(params))
        .await
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
}

/// Verify a password against a stored key on the blocking pool
pub async fn verify_key(
    password: ClearTextPassword,
    stored: DerivedKey,
    params: Pbkdf2Params,
) -> Result<bool, PasswordHashError> {
    tokio::task::spawn_blocking(move || stored.verify(&password, params))
        .await
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
