//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use kernel::id::ProductId;
use kernel::query::Paged;

use crate::domain::entity::{Brand, Category, Product, ProductPatch};
use crate::domain::value_object::ProductQuery;
use crate::error::CatalogResult;

#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    async fn create_product(&self, product: &Product) -> CatalogResult<()>;

    async fn find_product(&self, id: &ProductId) -> CatalogResult<Option<Product>>;

    /// Apply a patch atomically. `Ok(None)` when the product does not exist.
    async fn update_product(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> CatalogResult<Option<Product>>;

    /// Filtered, sorted page plus the filtered total before paging
    async fn list_products(&self, query: &ProductQuery) -> CatalogResult<Paged<Product>>;
}

#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    async fn list_categories(&self) -> CatalogResult<Vec<Category>>;

    /// A duplicate value yields `CatalogError::Duplicate`
    async fn create_category(&self, category: &Category) -> CatalogResult<()>;
}

#[trait_variant::make(BrandRepository: Send)]
pub trait LocalBrandRepository {
    async fn list_brands(&self) -> CatalogResult<Vec<Brand>>;

    async fn create_brand(&self, brand: &Brand) -> CatalogResult<()>;
}

/// Everything the catalog handlers need from one store
pub trait CatalogStore:
    ProductRepository + CategoryRepository + BrandRepository + Clone + Send + Sync + 'static
{
}

impl<T> CatalogStore for T where
    T: ProductRepository + CategoryRepository + BrandRepository + Clone + Send + Sync + 'static
{
}
