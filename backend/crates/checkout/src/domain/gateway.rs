//! Payment Gateway Port
//!
//! The provider that turns an order amount into a client-confirmable
//! payment intent. `infra::stripe` is the production implementation.

use crate::domain::value_object::payment::{IntentRequest, PaymentIntent};
use crate::error::CheckoutResult;

#[trait_variant::make(PaymentGateway: Send)]
pub trait LocalPaymentGateway {
    async fn create_intent(&self, request: &IntentRequest) -> CheckoutResult<PaymentIntent>;
}
