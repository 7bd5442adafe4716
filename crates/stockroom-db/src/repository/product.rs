//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations
//! - Limited listing
//! - Targeted stock updates
//!
//! ## Update Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Full Update vs Quantity Update                       │
//! │                                                                         │
//! │  update_product(&p)                                                    │
//! │     UPDATE products SET name = ?, quantity = ?, price_cents = ?        │
//! │     WHERE id = ?                                                        │
//! │     → used by the "Update Product" menu entry                          │
//! │                                                                         │
//! │  update_product_quantity(id, n)                                        │
//! │     UPDATE products SET quantity = ? WHERE id = ?                      │
//! │     → used after a sale; leaves name/price edits untouched             │
//! │                                                                         │
//! │  Both are silent no-ops when the id doesn't exist.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::{Money, Product};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let widget = repo.add_product("Widget", 10, Money::from_cents(250)).await?;
/// let found = repo.get_product_by_id(widget.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product. The store assigns the id.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The inserted row, including its new id
    /// * `Err(DbError::ConstraintViolation)` - Negative quantity or price
    pub async fn add_product(&self, name: &str, quantity: i64, price: Money) -> DbResult<Product> {
        debug!(name = %name, quantity, price_cents = price.cents(), "Inserting product");

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, quantity, price_cents)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, quantity, price_cents
            "#,
        )
        .bind(name)
        .bind(quantity)
        .bind(price.cents())
        .fetch_one(&self.pool)
        .await?;

        debug!(id = product.id, "Product inserted");
        Ok(product)
    }

    /// Returns every product, ordered by id.
    pub async fn get_all_products(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, price_cents
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed all products");
        Ok(products)
    }

    /// Returns at most `limit` products, ordered by id.
    ///
    /// A limit of 0 yields an empty list.
    pub async fn get_limited_products(&self, limit: u32) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, price_cents
            FROM products
            ORDER BY id
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        debug!(limit, count = products.len(), "Listed limited products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_product_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, price_cents
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Replaces name, quantity and price of the row matching `product.id`.
    pub async fn update_product(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                quantity = ?3,
                price_cents = ?4
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.quantity)
        .bind(product.price_cents)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(id = product.id, "Update matched no product");
        }

        Ok(())
    }

    /// Deletes the product matching `id`.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted, or nothing to delete
    /// * `Err(DbError::ForeignKeyViolation)` - The product still has sales
    pub async fn delete_product(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!(id, "Delete matched no product");
        }

        Ok(())
    }

    /// Sets the stock level of one product without touching name or price.
    pub async fn update_product_quantity(&self, id: i64, new_quantity: i64) -> DbResult<()> {
        debug!(id, new_quantity, "Updating product quantity");

        let result = sqlx::query("UPDATE products SET quantity = ?2 WHERE id = ?1")
            .bind(id)
            .bind(new_quantity)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!(id, "Quantity update matched no product");
        }

        Ok(())
    }

    /// Counts products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
