//! Catalog Backend Module
//!
//! Products, categories and brands.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, list query, repository traits
//! - `application/` - Use cases, configuration
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Listing
//! `GET /products` filters on `admin`, `category` and `brand`, sorts on a
//! whitelisted `_sort` field and pages with `_page` + `_limit`. The
//! `X-Total-Count` header carries the filtered total before paging.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::config::CatalogConfig;
pub use domain::entity::Product;
pub use error::{CatalogError, CatalogResult};
pub use infra::{memory::MemoryCatalogRepository, postgres::PgCatalogRepository};
pub use presentation::router::{catalog_router, catalog_router_generic};
