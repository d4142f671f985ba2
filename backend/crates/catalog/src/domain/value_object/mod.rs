//! Value Objects

pub mod product_query;

pub use product_query::{ProductQuery, ProductSort, SortField};
