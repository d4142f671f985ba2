//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod issue_token;
pub mod profile;
pub mod session_token;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod verifier;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use issue_token::IssueTokenUseCase;
pub use profile::ProfileUseCase;
pub use sign_in::{AuthenticatedOutput, SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use verifier::{
    CredentialVerifier, PasswordCredential, PasswordVerifier, TokenVerifier,
};
