//! Webhook Signature and Event Parsing
//!
//! Deliveries carry a `Stripe-Signature` header of the form
//! `t=<unix seconds>,v1=<hex hmac>[,v1=...]`. The signed payload is
//! `"{t}.{raw body}"`, keyed with the endpoint secret.

use std::time::Duration;

use kernel::id::OrderId;
use platform::crypto::{constant_time_eq, hmac_sha256};
use serde::Deserialize;

use crate::error::{CheckoutError, CheckoutResult};

pub const SIGNATURE_HEADER: &str = "stripe-signature";
pub const PAYMENT_SUCCEEDED: &str = "payment_intent.succeeded";

const SCHEME: &str = "v1";

/// Check `header` against `payload`. `now` is unix seconds.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance: Duration,
    now: i64,
) -> CheckoutResult<()> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse::<i64>().ok(),
            SCHEME => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        CheckoutError::Webhook("Unable to extract timestamp and signatures from header".into())
    })?;
    if signatures.is_empty() {
        return Err(CheckoutError::Webhook(
            "No signatures found with expected scheme".into(),
        ));
    }

    let expected = hmac_sha256(secret.as_bytes(), &signed_payload(timestamp, payload));
    let matched = signatures
        .iter()
        .filter_map(|sig| hex::decode(sig).ok())
        .any(|sig| constant_time_eq(&sig, &expected));
    if !matched {
        return Err(CheckoutError::Webhook(
            "No signatures found matching the expected signature for payload".into(),
        ));
    }

    let tolerance = i64::try_from(tolerance.as_secs()).unwrap_or(i64::MAX);
    if tolerance > 0 && (now - timestamp).abs() > tolerance {
        return Err(CheckoutError::Webhook(
            "Timestamp outside the tolerance zone".into(),
        ));
    }

    Ok(())
}

/// Header value a provider would send for `payload` at `timestamp`
pub fn signature_header(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let tag = hmac_sha256(secret.as_bytes(), &signed_payload(timestamp, payload));
    format!("t={timestamp},{SCHEME}={}", hex::encode(tag))
}

fn signed_payload(timestamp: i64, payload: &[u8]) -> Vec<u8> {
    let mut signed = format!("{timestamp}.").into_bytes();
    signed.extend_from_slice(payload);
    signed
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
    pub object: serde_json::Value,
}

impl WebhookEvent {
    pub fn parse(payload: &[u8]) -> CheckoutResult<Self> {
        serde_json::from_slice(payload)
            .map_err(|e| CheckoutError::Webhook(format!("Invalid payload: {e}")))
    }

    /// Order id from the intent metadata
    pub fn order_id(&self) -> Option<OrderId> {
        let metadata = self.data.object.get("metadata")?;
        ["order_id", "orderId", "OrderId"]
            .iter()
            .find_map(|key| metadata.get(*key)?.as_str())
            .and_then(|id| id.parse().ok())
    }
}
