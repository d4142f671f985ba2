//! Payment Intent Values

use kernel::id::OrderId;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{CheckoutError, CheckoutResult};

/// What the gateway is asked to charge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRequest {
    /// Smallest currency unit (paise, cents)
    pub amount_minor: i64,
    pub currency: String,
    pub order_id: OrderId,
}

/// Provider-side intent. Only the client secret leaves the server.
#[derive(Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for PaymentIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentIntent")
            .field("id", &self.id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Major units to minor units (x100), rounded half away from zero
pub fn to_minor_units(amount: Decimal) -> CheckoutResult<i64> {
    if amount <= Decimal::ZERO {
        return Err(CheckoutError::validation("totalAmount must be greater than 0"));
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| {
            minor
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .ok_or_else(|| CheckoutError::validation("totalAmount is too large"))
}
