//! Category and Brand
//!
//! Both are `{label, value}` pairs used to populate the storefront filters.
//! `value` is what products reference in their `category` / `brand` field.

use kernel::id::{BrandId, CategoryId};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Brand {
    pub id: BrandId,
    pub label: String,
    pub value: String,
}

/// Validated `{label, value}` body
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonDraft {
    pub label: String,
    /// Defaults to the label
    #[serde(default)]
    pub value: Option<String>,
}

impl TaxonDraft {
    /// Trimmed label and value, both non-empty
    pub fn normalize(self) -> CatalogResult<(String, String)> {
        let label = self.label.trim().to_string();
        if label.is_empty() {
            return Err(CatalogError::validation("label is required"));
        }
        let value = match self.value {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => label.clone(),
        };
        Ok((label, value))
    }
}

impl Category {
    pub fn create(draft: TaxonDraft) -> CatalogResult<Self> {
        let (label, value) = draft.normalize()?;
        Ok(Self {
            id: CategoryId::new(),
            label,
            value,
        })
    }
}

impl Brand {
    pub fn create(draft: TaxonDraft) -> CatalogResult<Self> {
        let (label, value) = draft.normalize()?;
        Ok(Self {
            id: BrandId::new(),
            label,
            value,
        })
    }
}
