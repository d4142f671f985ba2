//! PostgreSQL Repository Implementations
//!
//! Orders keep their line items and delivery address as JSONB snapshots.
//! Placing an order takes stock with a guarded `UPDATE` per line so two
//! concurrent checkouts can never drive stock below zero.

use auth::domain::value_object::address::Address;
use catalog::Product;
use chrono::{DateTime, Utc};
use kernel::error::app_error::AppError;
use kernel::id::{CartItemId, OrderId, ProductId, UserId};
use kernel::query::Paged;
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::cart::{MAX_LINE_QUANTITY, line_limit_exceeded};
use crate::domain::entity::{CartItem, CartLine, Order, OrderItem, OrderPatch};
use crate::domain::repository::{CartRepository, OrderRepository};
use crate::domain::value_object::{OrderQuery, OrderStatus, PaymentMethod, PaymentStatus};
use crate::error::{CheckoutError, CheckoutResult};

/// PostgreSQL-backed checkout repository
#[derive(Clone)]
pub struct PgCheckoutRepository {
    pool: PgPool,
}

impl PgCheckoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CART_LINE_SELECT: &str = r#"
    SELECT
        c.id AS item_id,
        c.quantity,
        p.id,
        p.title,
        p.description,
        p.price,
        p.discount_percentage,
        p.discount_price,
        p.rating,
        p.stock,
        p.brand,
        p.category,
        p.thumbnail,
        p.images,
        p.highlights,
        p.deleted,
        p.created_at,
        p.updated_at
    FROM cart_items c
    JOIN products p ON p.id = c.product_id
"#;

const ORDER_COLUMNS: &str = r#"
    id,
    user_id,
    items,
    total_amount,
    total_items,
    payment_method,
    payment_status,
    status,
    selected_address,
    created_at,
    updated_at
"#;

// ============================================================================
// Cart Repository Implementation
// ============================================================================

impl CartRepository for PgCheckoutRepository {
    async fn find_cart_product(&self, product_id: &ProductId) -> CheckoutResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                id, title, description, price, discount_percentage, discount_price,
                rating, stock, brand, category, thumbnail, images, highlights,
                deleted, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn add_to_cart(&self, item: &CartItem) -> CheckoutResult<CartItem> {
        // The guarded upsert returns no row when the merged line would exceed the bound
        let row = sqlx::query_as::<_, CartItemRow>(
            r#"
            INSERT INTO cart_items (id, user_id, product_id, quantity, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            WHERE cart_items.quantity + EXCLUDED.quantity <= $6
            RETURNING id, user_id, product_id, quantity, created_at
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.user_id.as_uuid())
        .bind(item.product_id.as_uuid())
        .bind(item.quantity)
        .bind(item.created_at)
        .bind(MAX_LINE_QUANTITY)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(row.into_item()),
            None => Err(line_limit_exceeded()),
        }
    }

    async fn cart_lines(&self, user_id: &UserId) -> CheckoutResult<Vec<CartLine>> {
        let rows = sqlx::query_as::<_, CartLineRow>(&format!(
            "{CART_LINE_SELECT} WHERE c.user_id = $1 ORDER BY c.created_at ASC, c.id ASC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CartLineRow::into_line).collect())
    }

    async fn cart_line(
        &self,
        user_id: &UserId,
        id: &CartItemId,
    ) -> CheckoutResult<Option<CartLine>> {
        let row = sqlx::query_as::<_, CartLineRow>(&format!(
            "{CART_LINE_SELECT} WHERE c.user_id = $1 AND c.id = $2"
        ))
        .bind(user_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CartLineRow::into_line))
    }

    async fn set_cart_quantity(
        &self,
        user_id: &UserId,
        id: &CartItemId,
        quantity: i32,
    ) -> CheckoutResult<bool> {
        let result = sqlx::query("UPDATE cart_items SET quantity = $3 WHERE user_id = $1 AND id = $2")
            .bind(user_id.as_uuid())
            .bind(id.as_uuid())
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_cart_item(&self, user_id: &UserId, id: &CartItemId) -> CheckoutResult<bool> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND id = $2")
            .bind(user_id.as_uuid())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Order Repository Implementation
// ============================================================================

impl OrderRepository for PgCheckoutRepository {
    async fn place_order(&self, order: &Order) -> CheckoutResult<()> {
        let mut tx = self.pool.begin().await?;

        for item in &order.items {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET stock = stock - $2, updated_at = NOW()
                WHERE id = $1 AND stock >= $2 AND NOT deleted
                "#,
            )
            .bind(item.product.id.as_uuid())
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(CheckoutError::OutOfStock(item.product.title.clone()));
            }
        }

        sqlx::query(
            r#"
            INSERT INTO orders (
                id,
                user_id,
                items,
                total_amount,
                total_items,
                payment_method,
                payment_status,
                status,
                selected_address,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(Json(&order.items))
        .bind(order.total_amount)
        .bind(order.total_items)
        .bind(order.payment_method.code())
        .bind(order.payment_status.code())
        .bind(order.status.code())
        .bind(Json(&order.selected_address))
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(order.user_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_order(&self, id: &OrderId) -> CheckoutResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(OrderRow::into_order).transpose()
    }

    async fn orders_of_user(&self, user_id: &UserId) -> CheckoutResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    async fn list_orders(&self, query: &OrderQuery) -> CheckoutResult<Paged<Order>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        let mut select =
            QueryBuilder::<Postgres>::new(format!("SELECT {ORDER_COLUMNS} FROM orders"));

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
            .build_query_as::<OrderRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(Paged {
            items: rows
                .into_iter()
                .map(OrderRow::into_order)
                .collect::<CheckoutResult<_>>()?,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn update_order(
        &self,
        id: &OrderId,
        patch: &OrderPatch,
    ) -> CheckoutResult<Option<Order>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut order = row.into_order()?;
        order.apply(patch);

        sqlx::query(
            r#"
            UPDATE orders
            SET status = $2,
                payment_status = $3,
                selected_address = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.status.code())
        .bind(order.payment_status.code())
        .bind(Json(&order.selected_address))
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(order))
    }

    async fn delete_order(&self, id: &OrderId) -> CheckoutResult<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_payment_status(
        &self,
        id: &OrderId,
        status: PaymentStatus,
    ) -> CheckoutResult<bool> {
        let result = sqlx::query("UPDATE orders SET payment_status = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(status.code())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// A stored code that no longer parses is a server fault, not a bad request
fn corrupt(err: CheckoutError) -> CheckoutError {
    CheckoutError::Store(AppError::internal(format!("Corrupt order row: {err}")))
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CartItemRow {
    id: Uuid,
    user_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    created_at: DateTime<Utc>,
}

impl CartItemRow {
    fn into_item(self) -> CartItem {
        CartItem {
            id: CartItemId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            product_id: ProductId::from_uuid(self.product_id),
            quantity: self.quantity,
            created_at: self.created_at,
        }
    }
}

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
struct CartLineRow {
    item_id: Uuid,
    quantity: i32,
    #[sqlx(flatten)]
    product: ProductRow,
}

impl CartLineRow {
    fn into_line(self) -> CartLine {
        CartLine {
            id: CartItemId::from_uuid(self.item_id),
            quantity: self.quantity,
            product: self.product.into_product(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    items: Json<Vec<OrderItem>>,
    total_amount: Decimal,
    total_items: i32,
    payment_method: String,
    payment_status: String,
    status: String,
    selected_address: Json<Address>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> CheckoutResult<Order> {
        Ok(Order {
            id: OrderId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            items: self.items.0,
            total_amount: self.total_amount,
            total_items: self.total_items,
            payment_method: PaymentMethod::from_code(&self.payment_method).map_err(corrupt)?,
            payment_status: PaymentStatus::from_code(&self.payment_status).map_err(corrupt)?,
            status: OrderStatus::from_code(&self.status).map_err(corrupt)?,
            selected_address: self.selected_address.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
