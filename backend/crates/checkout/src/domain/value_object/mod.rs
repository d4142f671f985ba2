//! Value Objects

pub mod order_query;
pub mod payment;
pub mod status;

pub use order_query::{OrderQuery, OrderSort, OrderSortField};
pub use payment::{IntentRequest, PaymentIntent, to_minor_units};
pub use status::{OrderStatus, PaymentMethod, PaymentStatus};
