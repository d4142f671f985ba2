//! Presentation Layer
//!
//! HTTP handlers, DTOs, and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CheckoutAppState;
pub use router::{checkout_router, checkout_router_generic};
