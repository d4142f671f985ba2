//! Order Use Cases

use std::sync::Arc;

use auth::SessionUser;
use auth::domain::value_object::address::Address;
use kernel::id::OrderId;
use kernel::query::Paged;

use crate::domain::entity::order::{Order, OrderPatch};
use crate::domain::repository::{CartRepository, OrderRepository};
use crate::domain::value_object::{OrderQuery, PaymentMethod};
use crate::error::{CheckoutError, CheckoutResult};

pub struct PlaceOrderInput {
    pub payment_method: PaymentMethod,
    /// Falls back to the caller's first saved address
    pub selected_address: Option<Address>,
}

pub struct OrderUseCase<R>
where
    R: CartRepository + OrderRepository,
{
    repo: Arc<R>,
}

impl<R> OrderUseCase<R>
where
    R: CartRepository + OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Turn the caller's cart into an order
    pub async fn place(
        &self,
        principal: &SessionUser,
        input: PlaceOrderInput,
    ) -> CheckoutResult<Order> {
        let address = input
            .selected_address
            .or_else(|| principal.addresses.first().cloned())
            .ok_or_else(|| CheckoutError::validation("selectedAddress is required"))?;

        let lines = self.repo.cart_lines(&principal.id).await?;
        let order = Order::place(principal.id, lines, input.payment_method, address)?;

        self.repo.place_order(&order).await?;

        tracing::info!(
            order_id = %order.id,
            user_id = %principal.id,
            total_items = order.total_items,
            total_amount = %order.total_amount,
            "Order placed"
        );

        Ok(order)
    }

    pub async fn own(&self, principal: &SessionUser) -> CheckoutResult<Vec<Order>> {
        self.repo.orders_of_user(&principal.id).await
    }

    pub async fn list(&self, query: &OrderQuery) -> CheckoutResult<Paged<Order>> {
        self.repo.list_orders(query).await
    }

    pub async fn update(&self, id: &OrderId, patch: OrderPatch) -> CheckoutResult<Order> {
        let order = self
            .repo
            .update_order(id, &patch)
            .await?
            .ok_or(CheckoutError::OrderNotFound)?;

        tracing::info!(order_id = %id, status = order.status.code(), "Order updated");

        Ok(order)
    }

    pub async fn delete(&self, id: &OrderId) -> CheckoutResult<()> {
        if !self.repo.delete_order(id).await? {
            return Err(CheckoutError::OrderNotFound);
        }
        tracing::info!(order_id = %id, "Order deleted");
        Ok(())
    }
}
