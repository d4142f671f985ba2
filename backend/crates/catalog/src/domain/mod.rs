//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{Brand, Category, Product, ProductDraft, ProductPatch, TaxonDraft};
pub use repository::{BrandRepository, CatalogStore, CategoryRepository, ProductRepository};
pub use value_object::{ProductQuery, ProductSort, SortField};
