//! In-Memory Repository

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::ProductId;
use kernel::query::Paged;
use tokio::sync::RwLock;

use crate::domain::entity::{Brand, Category, Product, ProductPatch};
use crate::domain::repository::{BrandRepository, CategoryRepository, ProductRepository};
use crate::domain::value_object::ProductQuery;
use crate::error::{CatalogError, CatalogResult};

#[derive(Default)]
struct State {
    products: HashMap<ProductId, Product>,
    categories: Vec<Category>,
    brands: Vec<Brand>,
}

#[derive(Clone, Default)]
pub struct MemoryCatalogRepository {
    state: Arc<RwLock<State>>,
}

impl MemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductRepository for MemoryCatalogRepository {
    async fn create_product(&self, product: &Product) -> CatalogResult<()> {
        self.state
            .write()
            .await
            .products
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn find_product(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
        Ok(self.state.read().await.products.get(id).cloned())
    }

    async fn update_product(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> CatalogResult<Option<Product>> {
        let mut state = self.state.write().await;
        let Some(product) = state.products.get_mut(id) else {
            return Ok(None);
        };
        product.apply(patch)?;
        Ok(Some(product.clone()))
    }

    async fn list_products(&self, query: &ProductQuery) -> CatalogResult<Paged<Product>> {
        let state = self.state.read().await;

        let mut items: Vec<Product> = state
            .products
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        let total = items.len() as u64;

        items.sort_by(|a, b| query.compare(a, b));
        let items = match query.page {
            Some(page) => page.slice(items),
            None => items,
        };

        Ok(Paged { items, total })
    }
}

impl CategoryRepository for MemoryCatalogRepository {
    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let mut categories = self.state.read().await.categories.clone();
        categories.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(categories)
    }

    async fn create_category(&self, category: &Category) -> CatalogResult<()> {
        let mut state = self.state.write().await;
        if state.categories.iter().any(|c| c.value == category.value) {
            return Err(CatalogError::Duplicate("Category".into()));
        }
        state.categories.push(category.clone());
        Ok(())
    }
}

impl BrandRepository for MemoryCatalogRepository {
    async fn list_brands(&self) -> CatalogResult<Vec<Brand>> {
        let mut brands = self.state.read().await.brands.clone();
        brands.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(brands)
    }

    async fn create_brand(&self, brand: &Brand) -> CatalogResult<()> {
        let mut state = self.state.write().await;
        if state.brands.iter().any(|b| b.value == brand.value) {
            return Err(CatalogError::Duplicate("Brand".into()));
        }
        state.brands.push(brand.clone());
        Ok(())
    }
}
