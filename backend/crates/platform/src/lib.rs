//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64, constant-time compare)
//! - Password key derivation (PBKDF2-HMAC-SHA256, off the async runtime)
//! - Signed JSON Web Tokens (HS256)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod jwt;
pub mod password;
