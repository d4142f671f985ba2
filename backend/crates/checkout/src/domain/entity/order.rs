//! Order Entity
//!
//! An order snapshots the caller's cart at placement time. Afterwards only
//! its status, payment status and delivery address change.

use auth::domain::value_object::address::Address;
use catalog::Product;
use chrono::{DateTime, Utc};
use kernel::id::{CartItemId, OrderId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entity::cart::CartLine;
use crate::domain::value_object::status::{OrderStatus, PaymentMethod, PaymentStatus};
use crate::error::{CheckoutError, CheckoutResult};

/// Line item, frozen at placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: CartItemId,
    pub quantity: i32,
    pub product: Product,
}

impl From<CartLine> for OrderItem {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.id,
            quantity: line.quantity,
            product: line.product,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "user")]
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub total_items: i32,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub selected_address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin edits to a placed order
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub selected_address: Option<Address>,
}

impl Order {
    /// Build an order from the caller's cart lines. Totals use the
    /// discounted price of each product.
    pub fn place(
        user_id: UserId,
        lines: Vec<CartLine>,
        payment_method: PaymentMethod,
        selected_address: Address,
    ) -> CheckoutResult<Self> {
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut total_amount = Decimal::ZERO;
        let mut total_items = 0i32;

        for line in &lines {
            if line.product.deleted {
                return Err(CheckoutError::validation(format!(
                    "{} is no longer available",
                    line.product.title
                )));
            }
            if line.quantity > line.product.stock {
                return Err(CheckoutError::OutOfStock(line.product.title.clone()));
            }
            total_amount += line.product.discount_price * Decimal::from(line.quantity);
            total_items += line.quantity;
        }

        let now = Utc::now();
        Ok(Self {
            id: OrderId::new(),
            user_id,
            items: lines.into_iter().map(OrderItem::from).collect(),
            total_amount,
            total_items,
            payment_method,
            payment_status: PaymentStatus::Pending,
            status: OrderStatus::Pending,
            selected_address,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, patch: &OrderPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(payment_status) = patch.payment_status {
            self.payment_status = payment_status;
        }
        if let Some(address) = &patch.selected_address {
            self.selected_address = address.clone();
        }
        self.updated_at = Utc::now();
    }
}
