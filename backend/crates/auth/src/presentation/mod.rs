//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AuthMiddlewareState, guarded, require_auth, resolve_principal};
pub use router::{auth_router, auth_router_generic, auth_routes, users_routes};
