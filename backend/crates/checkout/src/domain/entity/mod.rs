//! Domain Entities

pub mod cart;
pub mod order;

pub use cart::{CartItem, CartLine};
pub use order::{Order, OrderItem, OrderPatch};
