//! Cart Entities

use catalog::Product;
use chrono::{DateTime, Utc};
use kernel::id::{CartItemId, ProductId, UserId};
use serde::Serialize;

use crate::error::{CheckoutError, CheckoutResult};

/// Upper bound on a single line, guards the stock arithmetic
pub const MAX_LINE_QUANTITY: i32 = 1_000;

/// One product in one user's cart, as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(user_id: UserId, product_id: ProductId, quantity: i32) -> CheckoutResult<Self> {
        validate_quantity(quantity)?;
        Ok(Self {
            id: CartItemId::new(),
            user_id,
            product_id,
            quantity,
            created_at: Utc::now(),
        })
    }
}

/// A cart item with its product populated, as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub id: CartItemId,
    pub quantity: i32,
    pub product: Product,
}

pub fn validate_quantity(quantity: i32) -> CheckoutResult<()> {
    if !(1..=MAX_LINE_QUANTITY).contains(&quantity) {
        return Err(CheckoutError::validation(format!(
            "quantity must be between 1 and {MAX_LINE_QUANTITY}"
        )));
    }
    Ok(())
}

/// Quantity of a line after adding `added` to it
pub fn merge_quantity(current: i32, added: i32) -> CheckoutResult<i32> {
    current
        .checked_add(added)
        .filter(|total| (1..=MAX_LINE_QUANTITY).contains(total))
        .ok_or_else(line_limit_exceeded)
}

pub fn line_limit_exceeded() -> CheckoutError {
    CheckoutError::validation(format!(
        "A cart line cannot hold more than {MAX_LINE_QUANTITY} items"
    ))
}
