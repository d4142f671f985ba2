//! Cart Use Cases

use std::sync::Arc;

use kernel::id::{CartItemId, ProductId, UserId};

use crate::domain::entity::cart::{CartItem, CartLine, validate_quantity};
use crate::domain::repository::CartRepository;
use crate::error::{CheckoutError, CheckoutResult};

pub struct CartUseCase<R>
where
    R: CartRepository,
{
    repo: Arc<R>,
}

impl<R> CartUseCase<R>
where
    R: CartRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Add a product, merging into an existing line for the same product
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> CheckoutResult<CartLine> {
        let item = CartItem::new(user_id, product_id, quantity)?;

        match self.repo.find_cart_product(&product_id).await? {
            Some(product) if !product.deleted => {}
            _ => return Err(CheckoutError::ProductNotFound),
        }

        let stored = self.repo.add_to_cart(&item).await?;
        self.repo
            .cart_line(&user_id, &stored.id)
            .await?
            .ok_or(CheckoutError::CartItemNotFound)
    }

    pub async fn lines(&self, user_id: &UserId) -> CheckoutResult<Vec<CartLine>> {
        self.repo.cart_lines(user_id).await
    }

    pub async fn set_quantity(
        &self,
        user_id: &UserId,
        id: &CartItemId,
        quantity: i32,
    ) -> CheckoutResult<CartLine> {
        validate_quantity(quantity)?;

        if !self.repo.set_cart_quantity(user_id, id, quantity).await? {
            return Err(CheckoutError::CartItemNotFound);
        }
        self.repo
            .cart_line(user_id, id)
            .await?
            .ok_or(CheckoutError::CartItemNotFound)
    }

    /// Remove a line, returning it as it was
    pub async fn remove(&self, user_id: &UserId, id: &CartItemId) -> CheckoutResult<CartLine> {
        let line = self
            .repo
            .cart_line(user_id, id)
            .await?
            .ok_or(CheckoutError::CartItemNotFound)?;

        if !self.repo.remove_cart_item(user_id, id).await? {
            return Err(CheckoutError::CartItemNotFound);
        }
        Ok(line)
    }
}
