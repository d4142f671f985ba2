//! Domain Entities

pub mod product;
pub mod taxonomy;

pub use product::{Product, ProductDraft, ProductPatch};
pub use taxonomy::{Brand, Category, TaxonDraft};
