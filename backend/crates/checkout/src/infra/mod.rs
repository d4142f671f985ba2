//! Infrastructure Layer
//!
//! PostgreSQL and in-memory stores, and the payment provider client.

pub mod memory;
pub mod postgres;
pub mod stripe;

pub use memory::MemoryCheckoutRepository;
pub use postgres::PgCheckoutRepository;
pub use stripe::StripeGateway;
