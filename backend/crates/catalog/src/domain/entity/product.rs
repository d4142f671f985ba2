//! Product Entity

use chrono::{DateTime, Utc};
use kernel::id::ProductId;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);
/// 9_999_999_999.99, the largest value a `NUMERIC(12, 2)` column holds
const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Serialized both to clients and into order snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_percentage: Decimal,
    /// Price after discount, whole currency units
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rating: Decimal,
    pub stock: i32,
    pub brand: String,
    pub category: String,
    pub thumbnail: String,
    pub images: Vec<String>,
    pub highlights: Vec<String>,
    /// Soft-delete flag; hidden from non-admin listings
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a product
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub discount_percentage: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub rating: Decimal,
    #[serde(default)]
    pub stock: i32,
    pub brand: String,
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Partial update. Absent fields are left as they are; `{"deleted": true}`
/// is a soft delete.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount_percentage: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub rating: Option<Decimal>,
    pub stock: Option<i32>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    pub images: Option<Vec<String>>,
    pub highlights: Option<Vec<String>>,
    pub deleted: Option<bool>,
}

impl Product {
    pub fn create(draft: ProductDraft) -> CatalogResult<Self> {
        let now = Utc::now();
        let mut product = Self {
            id: ProductId::new(),
            title: draft.title.trim().to_string(),
            description: draft.description,
            price: draft.price,
            discount_percentage: draft.discount_percentage,
            discount_price: Decimal::ZERO,
            rating: draft.rating,
            stock: draft.stock,
            brand: draft.brand.trim().to_string(),
            category: draft.category.trim().to_string(),
            thumbnail: draft.thumbnail,
            images: draft.images,
            highlights: draft.highlights,
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        product.validate()?;
        product.discount_price = product.compute_discount_price()?;
        Ok(product)
    }

    /// Apply a patch in place. On error the product is left untouched.
    pub fn apply(&mut self, patch: &ProductPatch) -> CatalogResult<()> {
        let mut next = self.clone();

        if let Some(title) = &patch.title {
            next.title = title.trim().to_string();
        }
        if let Some(description) = &patch.description {
            next.description = description.clone();
        }
        if let Some(price) = patch.price {
            next.price = price;
        }
        if let Some(discount) = patch.discount_percentage {
            next.discount_percentage = discount;
        }
        if let Some(rating) = patch.rating {
            next.rating = rating;
        }
        if let Some(stock) = patch.stock {
            next.stock = stock;
        }
        if let Some(brand) = &patch.brand {
            next.brand = brand.trim().to_string();
        }
        if let Some(category) = &patch.category {
            next.category = category.trim().to_string();
        }
        if let Some(thumbnail) = &patch.thumbnail {
            next.thumbnail = thumbnail.clone();
        }
        if let Some(images) = &patch.images {
            next.images = images.clone();
        }
        if let Some(highlights) = &patch.highlights {
            next.highlights = highlights.clone();
        }
        if let Some(deleted) = patch.deleted {
            next.deleted = deleted;
        }

        next.validate()?;
        next.discount_price = next.compute_discount_price()?;
        next.updated_at = Utc::now();
        *self = next;
        Ok(())
    }

    fn validate(&self) -> CatalogResult<()> {
        if self.title.is_empty() {
            return Err(CatalogError::validation("title is required"));
        }
        if self.brand.is_empty() {
            return Err(CatalogError::validation("brand is required"));
        }
        if self.category.is_empty() {
            return Err(CatalogError::validation("category is required"));
        }
        if self.price <= Decimal::ZERO {
            return Err(CatalogError::validation("price must be greater than 0"));
        }
        if self.price > MAX_PRICE {
            return Err(CatalogError::validation(format!(
                "price must not exceed {MAX_PRICE}"
            )));
        }
        if self.discount_percentage < Decimal::ZERO
            || self.discount_percentage >= Decimal::ONE_HUNDRED
        {
            return Err(CatalogError::validation(
                "discountPercentage must be between 0 and 99",
            ));
        }
        if self.rating < Decimal::ZERO || self.rating > MAX_RATING {
            return Err(CatalogError::validation("rating must be between 0 and 5"));
        }
        if self.stock < 0 {
            return Err(CatalogError::validation("stock cannot be negative"));
        }
        Ok(())
    }

    fn compute_discount_price(&self) -> CatalogResult<Decimal> {
        self.price
            .checked_mul(Decimal::ONE_HUNDRED - self.discount_percentage)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .map(|price| price.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .ok_or_else(|| CatalogError::validation("price is out of range"))
    }
}
