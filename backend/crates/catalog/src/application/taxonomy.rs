//! Category and Brand Use Cases

use std::sync::Arc;

use crate::domain::entity::{Brand, Category, TaxonDraft};
use crate::domain::repository::{BrandRepository, CategoryRepository};
use crate::error::CatalogResult;

pub struct TaxonomyUseCase<R>
where
    R: CategoryRepository + BrandRepository,
{
    repo: Arc<R>,
}

impl<R> TaxonomyUseCase<R>
where
    R: CategoryRepository + BrandRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn categories(&self) -> CatalogResult<Vec<Category>> {
        self.repo.list_categories().await
    }

    pub async fn add_category(&self, draft: TaxonDraft) -> CatalogResult<Category> {
        let category = Category::create(draft)?;
        self.repo.create_category(&category).await?;
        Ok(category)
    }

    pub async fn brands(&self) -> CatalogResult<Vec<Brand>> {
        self.repo.list_brands().await
    }

    pub async fn add_brand(&self, draft: TaxonDraft) -> CatalogResult<Brand> {
        let brand = Brand::create(draft)?;
        self.repo.create_brand(&brand).await?;
        Ok(brand)
    }
}
