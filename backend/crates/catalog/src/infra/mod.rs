//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::MemoryCatalogRepository;
pub use postgres::PgCatalogRepository;
