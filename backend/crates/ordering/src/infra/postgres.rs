//! PostgreSQL Order Store

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, OrderItemId, ProductId, UserId};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entity::order::{Order, OrderItem};
use crate::domain::entity::stock::{Buyer, ProductStock};
use crate::domain::repository::{OrderReader, OrderTransaction, OrderUnitOfWork};
use crate::error::OrderResult;

#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Rolled back on drop unless committed
pub struct PgOrderTransaction {
    tx: Transaction<'static, Postgres>,
}

impl OrderUnitOfWork for PgOrderStore {
    type Tx = PgOrderTransaction;

    async fn begin(&self) -> OrderResult<PgOrderTransaction> {
        let tx = self.pool.begin().await?;
        Ok(PgOrderTransaction { tx })
    }
}

// ============================================================================
// Transaction
// ============================================================================

impl OrderTransaction for PgOrderTransaction {
    async fn find_buyer(&mut self, user_id: &UserId) -> OrderResult<Option<Buyer>> {
        let row = sqlx::query_as::<_, BuyerRow>(
            r#"
            SELECT u.user_id, r.name AS role
            FROM users u
            JOIN roles r ON r.role_id = u.role_id
            WHERE u.user_id = $1 AND u.deleted_at IS NULL
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(|r| Buyer {
            user_id: UserId::from_uuid(r.user_id),
            role: r.role,
        }))
    }

    async fn lock_product(&mut self, product_id: &ProductId) -> OrderResult<Option<ProductStock>> {
        let row = sqlx::query_as::<_, ProductStockRow>(
            r#"
            SELECT product_id, name, price, stock
            FROM products
            WHERE product_id = $1 AND deleted_at IS NULL
            FOR UPDATE
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(|r| ProductStock {
            product_id: ProductId::from_uuid(r.product_id),
            name: r.name,
            price: r.price,
            stock: r.stock,
        }))
    }

    async fn decrement_stock(&mut self, product_id: &ProductId, quantity: i32) -> OrderResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock - $2, updated_at = NOW()
            WHERE product_id = $1 AND deleted_at IS NULL AND stock >= $2
            "#,
        )
        .bind(product_id.as_uuid())
        .bind(quantity)
        .execute(&mut *self.tx)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }

    async fn insert_order(&mut self, order: &Order) -> OrderResult<()> {
        sqlx::query(
            r#"
            INSERT INTO orders (order_id, buyer_id, order_date, total, status)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(order.order_id.as_uuid())
        .bind(order.buyer_id.as_uuid())
        .bind(order.order_date)
        .bind(order.total)
        .bind(&order.status)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn insert_order_item(&mut self, item: &OrderItem) -> OrderResult<()> {
        sqlx::query(
            r#"
            INSERT INTO order_items (item_id, order_id, product_id, line_no, quantity, price)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(item.item_id.as_uuid())
        .bind(item.order_id.as_uuid())
        .bind(item.product_id.as_uuid())
        .bind(item.line_no)
        .bind(item.quantity)
        .bind(item.price)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn commit(self) -> OrderResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

// ============================================================================
// Read paths
// ============================================================================

impl OrderReader for PgOrderStore {
    async fn list_orders(&self, buyer_id: Option<&UserId>) -> OrderResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT order_id, buyer_id, order_date, total, status
            FROM orders
            WHERE $1::uuid IS NULL OR buyer_id = $1
            ORDER BY order_date DESC
            "#,
        )
        .bind(buyer_id.map(|id| id.into_uuid()))
        .fetch_all(&self.pool)
        .await?;

        let order_ids: Vec<Uuid> = rows.iter().map(|r| r.order_id).collect();
        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT item_id, order_id, product_id, line_no, quantity, price
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY order_id, line_no
            "#,
        )
        .bind(&order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut items: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for row in item_rows {
            items.entry(row.order_id).or_default().push(row.into_item());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let order_items = items.remove(&row.order_id).unwrap_or_default();
                row.into_order(order_items)
            })
            .collect())
    }

    async fn find_product_name(&self, product_id: &ProductId) -> OrderResult<Option<String>> {
        let name = sqlx::query_scalar::<_, String>(
            "SELECT name FROM products WHERE product_id = $1 AND deleted_at IS NULL",
        )
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(name)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct BuyerRow {
    user_id: Uuid,
    role: String,
}

#[derive(sqlx::FromRow)]
struct ProductStockRow {
    product_id: Uuid,
    name: String,
    price: Decimal,
    stock: i32,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: Uuid,
    buyer_id: Uuid,
    order_date: DateTime<Utc>,
    total: Decimal,
    status: String,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            order_id: OrderId::from_uuid(self.order_id),
            buyer_id: UserId::from_uuid(self.buyer_id),
            order_date: self.order_date,
            total: self.total,
            status: self.status,
            items,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    item_id: Uuid,
    order_id: Uuid,
    product_id: Uuid,
    line_no: i32,
    quantity: i32,
    price: Decimal,
}

impl OrderItemRow {
    fn into_item(self) -> OrderItem {
        OrderItem {
            item_id: OrderItemId::from_uuid(self.item_id),
            order_id: OrderId::from_uuid(self.order_id),
            product_id: ProductId::from_uuid(self.product_id),
            line_no: self.line_no,
            quantity: self.quantity,
            price: self.price,
        }
    }
}
