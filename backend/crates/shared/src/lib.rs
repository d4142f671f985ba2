//! Shared Kernel
//!
//! Vocabulary every domain crate agrees on: the error type that becomes an
//! HTTP problem document, typed entity ids, and the `_sort` / `_page`
//! primitives behind the list endpoints.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod query;
