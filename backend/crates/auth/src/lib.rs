//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, credential verifiers, configuration
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, routers, route guard
//!
//! ## Features
//! - Email + password sign up and login
//! - Server-side sessions referenced by an HMAC-signed cookie
//! - HS256 token in an HTTP-only `jwt` cookie (1 hour)
//! - Guard middleware accepting either cookie
//!
//! ## Security Model
//! - PBKDF2-HMAC-SHA256, 310 000 rounds, 16-byte salt, 32-byte key
//! - Derivation off the async workers, bounded by a semaphore
//! - One generic message for unknown email and wrong password

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::value_object::principal::SessionUser;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::router::{auth_router, auth_routes, users_routes};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
