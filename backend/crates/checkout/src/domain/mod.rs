//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the payment
//! gateway port.

pub mod entity;
pub mod gateway;
pub mod repository;
pub mod value_object;

pub use entity::{CartItem, CartLine, Order, OrderItem, OrderPatch};
pub use gateway::PaymentGateway;
pub use repository::{CartRepository, CheckoutStore, OrderRepository};
