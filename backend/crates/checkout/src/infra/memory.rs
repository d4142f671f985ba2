//! In-Memory Repository
//!
//! Shares its products with a [`MemoryCatalogRepository`] so stock taken by
//! an order is visible through the catalog.

use std::collections::HashMap;
use std::sync::Arc;

use catalog::domain::entity::ProductPatch;
use catalog::domain::repository::ProductRepository;
use catalog::{MemoryCatalogRepository, Product};
use kernel::id::{CartItemId, OrderId, ProductId, UserId};
use kernel::query::Paged;
use tokio::sync::RwLock;

use crate::domain::entity::cart::merge_quantity;
use crate::domain::entity::{CartItem, CartLine, Order, OrderPatch};
use crate::domain::repository::{CartRepository, OrderRepository};
use crate::domain::value_object::{OrderQuery, PaymentStatus};
use crate::error::{CheckoutError, CheckoutResult};

#[derive(Default)]
struct State {
    cart: Vec<CartItem>,
    orders: HashMap<OrderId, Order>,
}

#[derive(Clone)]
pub struct MemoryCheckoutRepository {
    catalog: MemoryCatalogRepository,
    state: Arc<RwLock<State>>,
}

impl MemoryCheckoutRepository {
    pub fn new(catalog: MemoryCatalogRepository) -> Self {
        Self {
            catalog,
            state: Arc::new(RwLock::new(State::default())),
        }
    }

    async fn line(&self, item: &CartItem) -> CheckoutResult<Option<CartLine>> {
        Ok(self
            .catalog
            .find_product(&item.product_id)
            .await?
            .map(|product| CartLine {
                id: item.id,
                quantity: item.quantity,
                product,
            }))
    }
}

impl CartRepository for MemoryCheckoutRepository {
    async fn find_cart_product(&self, product_id: &ProductId) -> CheckoutResult<Option<Product>> {
        Ok(self.catalog.find_product(product_id).await?)
    }

    async fn add_to_cart(&self, item: &CartItem) -> CheckoutResult<CartItem> {
        let mut state = self.state.write().await;

        if let Some(existing) = state
            .cart
            .iter_mut()
            .find(|c| c.user_id == item.user_id && c.product_id == item.product_id)
        {
            existing.quantity = merge_quantity(existing.quantity, item.quantity)?;
            return Ok(existing.clone());
        }

        state.cart.push(item.clone());
        Ok(item.clone())
    }

    async fn cart_lines(&self, user_id: &UserId) -> CheckoutResult<Vec<CartLine>> {
        let items: Vec<CartItem> = self
            .state
            .read()
            .await
            .cart
            .iter()
            .filter(|c| &c.user_id == user_id)
            .cloned()
            .collect();

        let mut lines = Vec::with_capacity(items.len());
        for item in &items {
            if let Some(line) = self.line(item).await? {
                lines.push(line);
            }
        }
        Ok(lines)
    }

    async fn cart_line(
        &self,
        user_id: &UserId,
        id: &CartItemId,
    ) -> CheckoutResult<Option<CartLine>> {
        let item = self
            .state
            .read()
            .await
            .cart
            .iter()
            .find(|c| &c.id == id && &c.user_id == user_id)
            .cloned();

        match item {
            Some(item) => self.line(&item).await,
            None => Ok(None),
        }
    }

    async fn set_cart_quantity(
        &self,
        user_id: &UserId,
        id: &CartItemId,
        quantity: i32,
    ) -> CheckoutResult<bool> {
        let mut state = self.state.write().await;
        match state
            .cart
            .iter_mut()
            .find(|c| &c.id == id && &c.user_id == user_id)
        {
            Some(item) => {
                item.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_cart_item(&self, user_id: &UserId, id: &CartItemId) -> CheckoutResult<bool> {
        let mut state = self.state.write().await;
        let before = state.cart.len();
        state
            .cart
            .retain(|c| !(&c.id == id && &c.user_id == user_id));
        Ok(state.cart.len() != before)
    }
}

impl OrderRepository for MemoryCheckoutRepository {
    async fn place_order(&self, order: &Order) -> CheckoutResult<()> {
        // Held across the stock updates so concurrent placements serialize
        let mut state = self.state.write().await;

        let mut remaining = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let product = self
                .catalog
                .find_product(&item.product.id)
                .await?
                .filter(|p| !p.deleted)
                .ok_or(CheckoutError::ProductNotFound)?;
            if product.stock < item.quantity {
                return Err(CheckoutError::OutOfStock(product.title));
            }
            remaining.push((product.id, product.stock - item.quantity));
        }

        for (id, stock) in remaining {
            let patch = ProductPatch {
                stock: Some(stock),
                ..Default::default()
            };
            self.catalog.update_product(&id, &patch).await?;
        }

        state.cart.retain(|c| c.user_id != order.user_id);
        state.orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn find_order(&self, id: &OrderId) -> CheckoutResult<Option<Order>> {
        Ok(self.state.read().await.orders.get(id).cloned())
    }

    async fn orders_of_user(&self, user_id: &UserId) -> CheckoutResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .state
            .read()
            .await
            .orders
            .values()
            .filter(|o| &o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn list_orders(&self, query: &OrderQuery) -> CheckoutResult<Paged<Order>> {
        let mut items: Vec<Order> = self.state.read().await.orders.values().cloned().collect();
        let total = items.len() as u64;

        items.sort_by(|a, b| query.compare(a, b));
        let items = match query.page {
            Some(page) => page.slice(items),
            None => items,
        };

        Ok(Paged { items, total })
    }

    async fn update_order(
        &self,
        id: &OrderId,
        patch: &OrderPatch,
    ) -> CheckoutResult<Option<Order>> {
        let mut state = self.state.write().await;
        Ok(state.orders.get_mut(id).map(|order| {
            order.apply(patch);
            order.clone()
        }))
    }

    async fn delete_order(&self, id: &OrderId) -> CheckoutResult<bool> {
        Ok(self.state.write().await.orders.remove(id).is_some())
    }

    async fn set_payment_status(
        &self,
        id: &OrderId,
        status: PaymentStatus,
    ) -> CheckoutResult<bool> {
        let mut state = self.state.write().await;
        match state.orders.get_mut(id) {
            Some(order) => {
                order.payment_status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
