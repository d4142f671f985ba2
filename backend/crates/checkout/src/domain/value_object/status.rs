//! Order status enumerations, stored as lowercase text

use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, CheckoutResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    /// Confirmed by the payment provider webhook
    Received,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Dispatched,
    Delivered,
    Cancelled,
}

impl PaymentMethod {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
        }
    }

    pub fn from_code(code: &str) -> CheckoutResult<Self> {
        match code {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            other => Err(unknown("payment method", other)),
        }
    }
}

impl PaymentStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Received => "received",
        }
    }

    pub fn from_code(code: &str) -> CheckoutResult<Self> {
        match code {
            "pending" => Ok(Self::Pending),
            "received" => Ok(Self::Received),
            other => Err(unknown("payment status", other)),
        }
    }
}

impl OrderStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Dispatched => "dispatched",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_code(code: &str) -> CheckoutResult<Self> {
        match code {
            "pending" => Ok(Self::Pending),
            "dispatched" => Ok(Self::Dispatched),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(unknown("order status", other)),
        }
    }
}

fn unknown(what: &str, code: &str) -> CheckoutError {
    CheckoutError::validation(format!("Unknown {what}: {code}"))
}
