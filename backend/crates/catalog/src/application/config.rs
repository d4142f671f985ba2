//! Catalog Configuration

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Upper bound applied to `_limit`
    pub max_page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { max_page_size: 100 }
    }
}
