//! Product Use Cases

use std::sync::Arc;

use kernel::id::ProductId;
use kernel::query::Paged;

use crate::domain::entity::{Product, ProductDraft, ProductPatch};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::ProductQuery;
use crate::error::{CatalogError, CatalogResult};

pub struct ProductUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> ProductUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, draft: ProductDraft) -> CatalogResult<Product> {
        let product = Product::create(draft)?;
        self.repo.create_product(&product).await?;

        tracing::info!(product_id = %product.id, category = %product.category, "Product created");

        Ok(product)
    }

    pub async fn get(&self, id: &ProductId) -> CatalogResult<Product> {
        self.repo
            .find_product(id)
            .await?
            .ok_or(CatalogError::ProductNotFound)
    }

    pub async fn update(&self, id: &ProductId, patch: ProductPatch) -> CatalogResult<Product> {
        let product = self
            .repo
            .update_product(id, &patch)
            .await?
            .ok_or(CatalogError::ProductNotFound)?;

        if patch.deleted == Some(true) {
            tracing::info!(product_id = %id, "Product soft-deleted");
        }

        Ok(product)
    }

    pub async fn list(&self, query: &ProductQuery) -> CatalogResult<Paged<Product>> {
        self.repo.list_products(query).await
    }
}
