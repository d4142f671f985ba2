//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod products;
pub mod taxonomy;

pub use config::CatalogConfig;
pub use products::ProductUseCase;
pub use taxonomy::TaxonomyUseCase;
