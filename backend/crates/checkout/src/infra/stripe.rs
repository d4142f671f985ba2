//! Stripe Payment Gateway
//!
//! Creates payment intents through the REST API with form-encoded bodies.

use reqwest::Client;
use serde::Deserialize;

use crate::application::config::PaymentConfig;
use crate::domain::gateway::PaymentGateway;
use crate::domain::value_object::{IntentRequest, PaymentIntent};
use crate::error::{CheckoutError, CheckoutResult};

#[derive(Clone)]
pub struct StripeGateway {
    client: Client,
    secret_key: String,
    endpoint: String,
}

impl StripeGateway {
    pub fn new(config: &PaymentConfig) -> CheckoutResult<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            secret_key: config.secret_key.clone(),
            endpoint: format!(
                "{}/v1/payment_intents",
                config.api_base.trim_end_matches('/')
            ),
        })
    }
}

#[derive(Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl PaymentGateway for StripeGateway {
    async fn create_intent(&self, request: &IntentRequest) -> CheckoutResult<PaymentIntent> {
        let amount = request.amount_minor.to_string();
        let order_id = request.order_id.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", request.currency.as_str()),
            ("automatic_payment_methods[enabled]", "true"),
            ("metadata[order_id]", order_id.as_str()),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.secret_key)
            // A retried checkout for the same order and amount reuses the intent
            .header("Idempotency-Key", format!("pi-{order_id}-{amount}"))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_default();
            return Err(CheckoutError::Gateway(format!("{status}: {message}")));
        }

        let intent: IntentResponse = response.json().await?;
        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base() {
        let gateway = StripeGateway::new(&PaymentConfig {
            secret_key: "sk_test_1".into(),
            api_base: "http://localhost:12111/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(gateway.endpoint, "http://localhost:12111/v1/payment_intents");
    }
}
