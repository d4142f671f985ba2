//! API DTOs (Data Transfer Objects)

use kernel::query::{PageRequest, SortDirection, split_list};
use serde::Deserialize;

use crate::application::config::CatalogConfig;
use crate::domain::value_object::{ProductQuery, ProductSort, SortField};
use crate::error::CatalogResult;

/// Raw `GET /products` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListParams {
    pub admin: Option<String>,
    /// Comma separated category values
    pub category: Option<String>,
    /// Comma separated brand values
    pub brand: Option<String>,
    #[serde(rename = "_sort")]
    pub sort: Option<String>,
    #[serde(rename = "_order")]
    pub order: Option<String>,
    #[serde(rename = "_page")]
    pub page: Option<u32>,
    #[serde(rename = "_limit")]
    pub limit: Option<u32>,
}

impl ProductListParams {
    pub fn into_query(self, config: &CatalogConfig) -> CatalogResult<ProductQuery> {
        let include_deleted = self
            .admin
            .as_deref()
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);

        let sort = match self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(field) => Some(ProductSort {
                field: SortField::parse(field)?,
                direction: self
                    .order
                    .as_deref()
                    .map(SortDirection::parse)
                    .transpose()?
                    .unwrap_or_default(),
            }),
            None => None,
        };

        Ok(ProductQuery {
            include_deleted,
            categories: split_list(self.category.as_deref()),
            brands: split_list(self.brand.as_deref()),
            sort,
            page: PageRequest::from_params(self.page, self.limit, config.max_page_size)?,
        })
    }
}
