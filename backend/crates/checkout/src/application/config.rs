//! Payment Configuration

use std::fmt;
use std::time::Duration;

pub const STRIPE_API_BASE: &str = "https://api.stripe.com";

#[derive(Clone)]
pub struct PaymentConfig {
    /// Provider API secret key (`sk_...`)
    pub secret_key: String,
    /// Webhook endpoint signing secret (`whsec_...`)
    pub webhook_secret: String,
    pub api_base: String,
    /// ISO currency code, lowercase
    pub currency: String,
    /// Maximum age of a signed webhook delivery
    pub signature_tolerance: Duration,
    pub request_timeout: Duration,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            webhook_secret: String::new(),
            api_base: STRIPE_API_BASE.to_string(),
            currency: "inr".to_string(),
            signature_tolerance: Duration::from_secs(300),
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("secret_key", &"[REDACTED]")
            .field("webhook_secret", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("currency", &self.currency)
            .field("signature_tolerance", &self.signature_tolerance)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
