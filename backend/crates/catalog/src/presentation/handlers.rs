//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderName, StatusCode};
use axum::response::IntoResponse;
use kernel::error::app_error::AppError;
use kernel::id::ProductId;
use kernel::query::TOTAL_COUNT_HEADER;

use crate::application::{CatalogConfig, ProductUseCase, TaxonomyUseCase};
use crate::domain::entity::{Brand, Category, Product, ProductDraft, ProductPatch, TaxonDraft};
use crate::domain::repository::CatalogStore;
use crate::error::CatalogResult;
use crate::presentation::dto::ProductListParams;

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: CatalogStore,
{
    pub repo: Arc<R>,
    pub config: Arc<CatalogConfig>,
}

impl<R> CatalogAppState<R>
where
    R: CatalogStore,
{
    pub fn new(repo: Arc<R>, config: Arc<CatalogConfig>) -> Self {
        Self { repo, config }
    }
}

// ============================================================================
// Products
// ============================================================================

/// POST /products
pub async fn create_product<R>(
    State(state): State<CatalogAppState<R>>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> CatalogResult<(StatusCode, Json<Product>)>
where
    R: CatalogStore,
{
    let Json(draft) = payload.map_err(AppError::from)?;
    let product = ProductUseCase::new(state.repo.clone()).create(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products
pub async fn list_products<R>(
    State(state): State<CatalogAppState<R>>,
    params: Result<Query<ProductListParams>, QueryRejection>,
) -> CatalogResult<impl IntoResponse>
where
    R: CatalogStore,
{
    let Query(params) = params.map_err(AppError::from)?;
    let query = params.into_query(&state.config)?;

    let page = ProductUseCase::new(state.repo.clone()).list(&query).await?;

    Ok((
        [(
            HeaderName::from_static(TOTAL_COUNT_HEADER),
            page.total.to_string(),
        )],
        Json(page.items),
    ))
}

/// GET /products/{id}
pub async fn get_product<R>(
    State(state): State<CatalogAppState<R>>,
    id: Result<Path<ProductId>, PathRejection>,
) -> CatalogResult<Json<Product>>
where
    R: CatalogStore,
{
    let Path(id) = id.map_err(AppError::from)?;
    let product = ProductUseCase::new(state.repo.clone()).get(&id).await?;
    Ok(Json(product))
}

/// PATCH /products/{id}
pub async fn update_product<R>(
    State(state): State<CatalogAppState<R>>,
    id: Result<Path<ProductId>, PathRejection>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> CatalogResult<Json<Product>>
where
    R: CatalogStore,
{
    let Path(id) = id.map_err(AppError::from)?;
    let Json(patch) = payload.map_err(AppError::from)?;
    let product = ProductUseCase::new(state.repo.clone())
        .update(&id, patch)
        .await?;
    Ok(Json(product))
}

// ============================================================================
// Categories / Brands
// ============================================================================

/// GET /category
pub async fn list_categories<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<Vec<Category>>>
where
    R: CatalogStore,
{
    Ok(Json(
        TaxonomyUseCase::new(state.repo.clone()).categories().await?,
    ))
}

/// POST /category
pub async fn create_category<R>(
    State(state): State<CatalogAppState<R>>,
    payload: Result<Json<TaxonDraft>, JsonRejection>,
) -> CatalogResult<(StatusCode, Json<Category>)>
where
    R: CatalogStore,
{
    let Json(draft) = payload.map_err(AppError::from)?;
    let category = TaxonomyUseCase::new(state.repo.clone())
        .add_category(draft)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /brands
pub async fn list_brands<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<Vec<Brand>>>
where
    R: CatalogStore,
{
    Ok(Json(TaxonomyUseCase::new(state.repo.clone()).brands().await?))
}

/// POST /brands
pub async fn create_brand<R>(
    State(state): State<CatalogAppState<R>>,
    payload: Result<Json<TaxonDraft>, JsonRejection>,
) -> CatalogResult<(StatusCode, Json<Brand>)>
where
    R: CatalogStore,
{
    let Json(draft) = payload.map_err(AppError::from)?;
    let brand = TaxonomyUseCase::new(state.repo.clone())
        .add_brand(draft)
        .await?;
    Ok((StatusCode::CREATED, Json(brand)))
}
