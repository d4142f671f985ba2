//! Application Layer
//!
//! Use cases, webhook verification and payment configuration.

pub mod cart;
pub mod config;
pub mod orders;
pub mod payment;
pub mod webhook;

pub use cart::CartUseCase;
pub use config::PaymentConfig;
pub use orders::{OrderUseCase, PlaceOrderInput};
pub use payment::{IntentInput, PaymentUseCase, WebhookOutcome};
