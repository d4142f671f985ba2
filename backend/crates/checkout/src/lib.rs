//! Checkout Backend Module
//!
//! Cart, orders and the payment provider bridge.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, statuses, repository and gateway traits
//! - `application/` - Use cases, webhook verification, configuration
//! - `infra/` - PostgreSQL and in-memory stores, Stripe client
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Orders
//! An order is built from the caller's cart. Placing it takes the ordered
//! quantities off product stock and empties the cart in one transaction.
//!
//! ## Payment
//! The client confirms payment against an intent created here. The
//! provider then calls `/webhook`, whose signature is verified before the
//! order's payment status moves to `received`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::config::PaymentConfig;
pub use domain::gateway::PaymentGateway;
pub use error::{CheckoutError, CheckoutResult};
pub use infra::{
    memory::MemoryCheckoutRepository, postgres::PgCheckoutRepository, stripe::StripeGateway,
};
pub use presentation::router::{checkout_router, checkout_router_generic};
