//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.
//! Cart operations are always scoped to the owning user.

use catalog::Product;
use kernel::id::{CartItemId, OrderId, ProductId, UserId};
use kernel::query::Paged;

use crate::domain::entity::{CartItem, CartLine, Order, OrderPatch};
use crate::domain::value_object::{OrderQuery, PaymentStatus};
use crate::error::CheckoutResult;

#[trait_variant::make(CartRepository: Send)]
pub trait LocalCartRepository {
    /// Product as it can be put in a cart
    async fn find_cart_product(&self, product_id: &ProductId) -> CheckoutResult<Option<Product>>;

    /// Insert, or add to the quantity of the user's existing line for the
    /// same product. Returns the stored line.
    async fn add_to_cart(&self, item: &CartItem) -> CheckoutResult<CartItem>;

    async fn cart_lines(&self, user_id: &UserId) -> CheckoutResult<Vec<CartLine>>;

    async fn cart_line(&self, user_id: &UserId, id: &CartItemId)
    -> CheckoutResult<Option<CartLine>>;

    /// `false` when the user has no such line
    async fn set_cart_quantity(
        &self,
        user_id: &UserId,
        id: &CartItemId,
        quantity: i32,
    ) -> CheckoutResult<bool>;

    async fn remove_cart_item(&self, user_id: &UserId, id: &CartItemId) -> CheckoutResult<bool>;
}

#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// In one transaction: insert the order, take its quantities off
    /// product stock, empty the owner's cart
    async fn place_order(&self, order: &Order) -> CheckoutResult<()>;

    async fn find_order(&self, id: &OrderId) -> CheckoutResult<Option<Order>>;

    /// Newest first
    async fn orders_of_user(&self, user_id: &UserId) -> CheckoutResult<Vec<Order>>;

    async fn list_orders(&self, query: &OrderQuery) -> CheckoutResult<Paged<Order>>;

    async fn update_order(&self, id: &OrderId, patch: &OrderPatch)
    -> CheckoutResult<Option<Order>>;

    async fn delete_order(&self, id: &OrderId) -> CheckoutResult<bool>;

    /// Write the payment status column only. `false` for an unknown order.
    async fn set_payment_status(&self, id: &OrderId, status: PaymentStatus)
    -> CheckoutResult<bool>;
}

/// Everything the checkout handlers need from one store
pub trait CheckoutStore: CartRepository + OrderRepository + Clone + Send + Sync + 'static {}

impl<T> CheckoutStore for T where T: CartRepository + OrderRepository + Clone + Send + Sync + 'static {}
