//! Payment Use Cases
//!
//! Intent creation for the client-side checkout, and the provider webhook
//! that confirms payment.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::OrderId;
use rust_decimal::Decimal;

use crate::application::config::PaymentConfig;
use crate::application::webhook::{PAYMENT_SUCCEEDED, WebhookEvent, verify_signature};
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::OrderRepository;
use crate::domain::value_object::{IntentRequest, PaymentStatus, to_minor_units};
use crate::error::{CheckoutError, CheckoutResult};

pub struct IntentInput {
    pub total_amount: Option<Decimal>,
    pub order_id: Option<OrderId>,
}

/// What a verified delivery did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    PaymentReceived(OrderId),
    /// Succeeded event for an order that is not in the store
    UnknownOrder,
    Ignored(String),
}

pub struct PaymentUseCase<R, G>
where
    R: OrderRepository,
    G: PaymentGateway,
{
    repo: Arc<R>,
    gateway: Arc<G>,
    config: Arc<PaymentConfig>,
}

impl<R, G> PaymentUseCase<R, G>
where
    R: OrderRepository,
    G: PaymentGateway,
{
    pub fn new(repo: Arc<R>, gateway: Arc<G>, config: Arc<PaymentConfig>) -> Self {
        Self {
            repo,
            gateway,
            config,
        }
    }

    /// Create a provider intent for an order and return its client secret
    pub async fn create_intent(&self, input: IntentInput) -> CheckoutResult<String> {
        let (Some(total_amount), Some(order_id)) = (input.total_amount, input.order_id) else {
            return Err(CheckoutError::validation(
                "Missing orderId or totalAmount in the request body",
            ));
        };
        let amount_minor = to_minor_units(total_amount)?;

        let order = self
            .repo
            .find_order(&order_id)
            .await?
            .ok_or(CheckoutError::OrderNotFound)?;
        if order.total_amount != total_amount {
            return Err(CheckoutError::validation(
                "totalAmount does not match the order",
            ));
        }

        let intent = self
            .gateway
            .create_intent(&IntentRequest {
                amount_minor,
                currency: self.config.currency.clone(),
                order_id,
            })
            .await?;

        tracing::info!(order_id = %order_id, intent_id = %intent.id, amount_minor, "Payment intent created");

        Ok(intent.client_secret)
    }

    /// Verify and apply one webhook delivery
    pub async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> CheckoutResult<WebhookOutcome> {
        let signature = signature.ok_or_else(|| {
            CheckoutError::Webhook("No stripe-signature header value was provided".into())
        })?;
        verify_signature(
            payload,
            signature,
            &self.config.webhook_secret,
            self.config.signature_tolerance,
            Utc::now().timestamp(),
        )?;

        let event = WebhookEvent::parse(payload)?;

        if event.kind != PAYMENT_SUCCEEDED {
            tracing::info!(event_id = %event.id, event_type = %event.kind, "Unhandled event type");
            return Ok(WebhookOutcome::Ignored(event.kind));
        }

        let Some(order_id) = event.order_id() else {
            tracing::warn!(event_id = %event.id, "Payment succeeded without an order id");
            return Ok(WebhookOutcome::UnknownOrder);
        };

        if !self
            .repo
            .set_payment_status(&order_id, PaymentStatus::Received)
            .await?
        {
            tracing::warn!(event_id = %event.id, order_id = %order_id, "Payment succeeded for unknown order");
            return Ok(WebhookOutcome::UnknownOrder);
        }

        tracing::info!(event_id = %event.id, order_id = %order_id, "Payment received");
        Ok(WebhookOutcome::PaymentReceived(order_id))
    }
}
