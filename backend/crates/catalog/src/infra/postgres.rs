//! PostgreSQL Product Repository

use chrono::{DateTime, Utc};
use kernel::id::{ProductId, UserId};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::slug::Slug;
use crate::error::{CatalogError, CatalogResult};

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PRODUCT_COLUMNS: &str = "product_id, seller_id, name, slug, description, price, stock, \
                               image, created_at, updated_at";

impl ProductRepository for PgProductRepository {
    async fn insert_product(&self, product: &Product) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                product_id,
                seller_id,
                name,
                slug,
                description,
                price,
                stock,
                image,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(product.product_id.as_uuid())
        .bind(product.seller_id.as_uuid())
        .bind(&product.name)
        .bind(product.slug.as_str())
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.image)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(())
    }

    async fn find_product(&self, product_id: &ProductId) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1 AND deleted_at IS NULL"
        ))
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE deleted_at IS NULL ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn update_product(&self, product: &Product) -> CatalogResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE products
            SET name = $2,
                slug = $3,
                description = $4,
                price = $5,
                stock = $6,
                image = $7,
                updated_at = $8
            WHERE product_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(product.product_id.as_uuid())
        .bind(&product.name)
        .bind(product.slug.as_str())
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.image)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_slug_conflict)?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn soft_delete_product(&self, product_id: &ProductId) -> CatalogResult<bool> {
        let deleted = sqlx::query(
            r#"
            UPDATE products
            SET deleted_at = NOW()
            WHERE product_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(product_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(deleted > 0)
    }

    async fn slug_taken(&self, slug: &Slug, except: Option<&ProductId>) -> CatalogResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM products
                WHERE slug = $1 AND ($2::uuid IS NULL OR product_id <> $2)
            )
            "#,
        )
        .bind(slug.as_str())
        .bind(except.map(|id| id.into_uuid()))
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }
}

fn map_slug_conflict(e: sqlx::Error) -> CatalogError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => CatalogError::SlugTaken,
        _ => CatalogError::Database(e),
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    seller_id: Uuid,
    name: String,
    slug: String,
    description: String,
    price: Decimal,
    stock: i32,
    image: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            product_id: ProductId::from_uuid(self.product_id),
            seller_id: UserId::from_uuid(self.seller_id),
            name: self.name,
            slug: Slug::from_db(self.slug),
            description: self.description,
            price: self.price,
            stock: self.stock,
            image: self.image,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
