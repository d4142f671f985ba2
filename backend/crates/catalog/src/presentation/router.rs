//! Catalog Routers
//!
//! Mounted at `/products`, `/category` and `/brands`. All public.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::CatalogConfig;
use crate::domain::repository::CatalogStore;
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the catalog router with PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository, config: CatalogConfig) -> Router {
    catalog_router_generic(repo, config)
}

/// All three catalog mounts over any repository implementation
pub fn catalog_router_generic<R>(repo: R, config: CatalogConfig) -> Router
where
    R: CatalogStore,
{
    let state = CatalogAppState::new(Arc::new(repo), Arc::new(config));

    Router::new()
        .nest("/products", products_routes(state.clone()))
        .nest("/category", categories_routes(state.clone()))
        .nest("/brands", brands_routes(state))
}

pub fn products_routes<R>(state: CatalogAppState<R>) -> Router
where
    R: CatalogStore,
{
    Router::new()
        .route(
            "/",
            post(handlers::create_product::<R>).get(handlers::list_products::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_product::<R>).patch(handlers::update_product::<R>),
        )
        .with_state(state)
}

pub fn categories_routes<R>(state: CatalogAppState<R>) -> Router
where
    R: CatalogStore,
{
    Router::new()
        .route(
            "/",
            get(handlers::list_categories::<R>).post(handlers::create_category::<R>),
        )
        .with_state(state)
}

pub fn brands_routes<R>(state: CatalogAppState<R>) -> Router
where
    R: CatalogStore,
{
    Router::new()
        .route(
            "/",
            get(handlers::list_brands::<R>).post(handlers::create_brand::<R>),
        )
        .with_state(state)
}
