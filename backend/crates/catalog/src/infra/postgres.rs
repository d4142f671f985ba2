//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{BrandId, CategoryId, ProductId};
use kernel::query::Paged;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{Brand, Category, Product, ProductPatch};
use crate::domain::repository::{BrandRepository, CategoryRepository, ProductRepository};
use crate::domain::value_object::ProductQuery;
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PRODUCT_COLUMNS: &str = r#"
    id,
    title,
    description,
    price,
    discount_percentage,
    discount_price,
    rating,
    stock,
    brand,
    category,
    thumbnail,
    images,
    highlights,
    deleted,
    created_at,
    updated_at
"#;

/// `WHERE` clause shared by the count and the page query
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, query: &ProductQuery) {
    builder.push(" WHERE TRUE");

    if !query.include_deleted {
        builder.push(" AND NOT deleted");
    }
    if let Some(categories) = &query.categories {
        builder
            .push(" AND category = ANY(")
            .push_bind(categories.clone())
            .push(")");
    }
    if let Some(brands) = &query.brands {
        builder
            .push(" AND brand = ANY(")
            .push_bind(brands.clone())
            .push(")");
    }
}

fn unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for PgCatalogRepository {
    async fn create_product(&self, product: &Product) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id,
                title,
                description,
                price,
                discount_percentage,
                discount_price,
                rating,
                stock,
                brand,
                category,
                thumbnail,
                images,
                highlights,
                deleted,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.discount_percentage)
        .bind(product.discount_price)
        .bind(product.rating)
        .bind(product.stock)
        .bind(&product.brand)
        .bind(&product.category)
        .bind(&product.thumbnail)
        .bind(&product.images)
        .bind(&product.highlights)
        .bind(product.deleted)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_product(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn update_product(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> CatalogResult<Option<Product>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut product = row.into_product();
        product.apply(patch)?;

        sqlx::query(
            r#"
            UPDATE products
            SET title = $2,
                description = $3,
                price = $4,
                discount_percentage = $5,
                discount_price = $6,
                rating = $7,
                stock = $8,
                brand = $9,
                category = $10,
                thumbnail = $11,
                images = $12,
                highlights = $13,
                deleted = $14,
                updated_at = $15
            WHERE id = $1
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.discount_percentage)
        .bind(product.discount_price)
        .bind(product.rating)
        .bind(product.stock)
        .bind(&product.brand)
        .bind(&product.category)
        .bind(&product.thumbnail)
        .bind(&product.images)
        .bind(&product.highlights)
        .bind(product.deleted)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(product))
    }

    async fn list_products(&self, query: &ProductQuery) -> CatalogResult<Paged<Product>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filter(&mut count, query);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut select =
            QueryBuilder::<Postgres>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        push_filter(&mut select, query);

        select.push(" ORDER BY ");
        if let Some(sort) = query.sort {
            select
                .push(sort.field.column())
                .push(" ")
                .push(sort.direction.as_sql())
                .push(", ");
        }
        select.push("created_at ASC, id ASC");

        if let Some(page) = query.page {
            select
                .push(" LIMIT ")
                .push_bind(i64::from(page.limit()))
                .push(" OFFSET ")
                .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));
        }

        let rows = select
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(Paged {
            items: rows.into_iter().map(ProductRow::into_product).collect(),
            total: u64::try_from(total).unwrap_or_default(),
        })
    }
}

// ============================================================================
// Category / Brand Repository Implementations
// ============================================================================

impl CategoryRepository for PgCatalogRepository {
    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, TaxonRow>(
            "SELECT id, label, value FROM categories ORDER BY label",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Category {
                id: CategoryId::from_uuid(row.id),
                label: row.label,
                value: row.value,
            })
            .collect())
    }

    async fn create_category(&self, category: &Category) -> CatalogResult<()> {
        sqlx::query("INSERT INTO categories (id, label, value) VALUES ($1, $2, $3)")
            .bind(category.id.as_uuid())
            .bind(&category.label)
            .bind(&category.value)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if unique_violation(&e) {
                    CatalogError::Duplicate("Category".into())
                } else {
                    e.into()
                }
            })?;
        Ok(())
    }
}

impl BrandRepository for PgCatalogRepository {
    async fn list_brands(&self) -> CatalogResult<Vec<Brand>> {
        let rows =
            sqlx::query_as::<_, TaxonRow>("SELECT id, label, value FROM brands ORDER BY label")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|row| Brand {
                id: BrandId::from_uuid(row.id),
                label: row.label,
                value: row.value,
            })
            .collect())
    }

    async fn create_brand(&self, brand: &Brand) -> CatalogResult<()> {
        sqlx::query("INSERT INTO brands (id, label, value) VALUES ($1, $2, $3)")
            .bind(brand.id.as_uuid())
            .bind(&brand.label)
            .bind(&brand.value)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if unique_violation(&e) {
                    CatalogError::Duplicate("Brand".into())
                } else {
                    e.into()
                }
            })?;
        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    title: String,
    description: String,
    price: Decimal,
    discount_percentage: Decimal,
    discount_price: Decimal,
    rating: Decimal,
    stock: i32,
    brand: String,
    category: String,
    thumbnail: String,
    images: Vec<String>,
    highlights: Vec<String>,
    deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::from_uuid(self.id),
            title: self.title,
            description: self.description,
            price: self.price,
            discount_percentage: self.discount_percentage,
            discount_price: self.discount_price,
            rating: self.rating,
            stock: self.stock,
            brand: self.brand,
            category: self.category,
            thumbnail: self.thumbnail,
            images: self.images,
            highlights: self.highlights,
            deleted: self.deleted,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TaxonRow {
    id: Uuid,
    label: String,
    value: String,
}
