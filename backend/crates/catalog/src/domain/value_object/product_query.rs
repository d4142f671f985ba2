//! Product List Query
//!
//! The filter, sort and page of a `GET /products` call. The filter alone
//! decides the total count; sort and page only shape the returned slice.

use std::cmp::Ordering;

use kernel::query::{PageRequest, SortDirection};

use crate::domain::entity::product::Product;
use crate::error::{CatalogError, CatalogResult};

/// Sortable product fields, by their JSON name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    Rating,
    Title,
    Stock,
    DiscountPercentage,
    CreatedAt,
}

impl SortField {
    pub fn parse(value: &str) -> CatalogResult<Self> {
        match value.trim() {
            "price" => Ok(Self::Price),
            "rating" => Ok(Self::Rating),
            "title" => Ok(Self::Title),
            "stock" => Ok(Self::Stock),
            "discountPercentage" => Ok(Self::DiscountPercentage),
            "createdAt" => Ok(Self::CreatedAt),
            other => Err(CatalogError::validation(format!(
                "Cannot sort by {other}"
            ))),
        }
    }

    /// Column name, safe to splice into SQL
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Rating => "rating",
            Self::Title => "title",
            Self::Stock => "stock",
            Self::DiscountPercentage => "discount_percentage",
            Self::CreatedAt => "created_at",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Price => a.price.cmp(&b.price),
            Self::Rating => a.rating.cmp(&b.rating),
            Self::Title => a.title.cmp(&b.title),
            Self::Stock => a.stock.cmp(&b.stock),
            Self::DiscountPercentage => a.discount_percentage.cmp(&b.discount_percentage),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSort {
    pub field: SortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// `admin=true`: soft-deleted products are listed too
    pub include_deleted: bool,
    /// Match any of these categories; `None` means no constraint
    pub categories: Option<Vec<String>>,
    pub brands: Option<Vec<String>>,
    pub sort: Option<ProductSort>,
    pub page: Option<PageRequest>,
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        (self.include_deleted || !product.deleted)
            && self
                .categories
                .as_ref()
                .is_none_or(|categories| categories.contains(&product.category))
            && self
                .brands
                .as_ref()
                .is_none_or(|brands| brands.contains(&product.brand))
    }

    /// Requested order, then creation time and id so pages are stable
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = self
            .sort
            .map(|sort| sort.direction.apply(sort.field.compare(a, b)))
            .unwrap_or(Ordering::Equal);

        primary
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    }
}
