//! # Sale Repository
//!
//! Database operations for sales and the sales summary.
//!
//! ## Registering a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       register_sale()                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                   SINGLE TRANSACTION                            │    │
//! │  │                                                                 │    │
//! │  │  1. UPDATE products SET quantity = <new stock> WHERE id = ?     │    │
//! │  │     (no row → NotFound, nothing written)                        │    │
//! │  │                                                                 │    │
//! │  │  2. INSERT INTO sales (product_id, quantity, unit_price, ...)   │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT ← Both succeed or both fail                                     │
//! │                                                                         │
//! │  The stock check itself happens before this call                        │
//! │  (Product::remaining_after_sale in stockroom-core).                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sales Summary
//! Revenue is `SUM(quantity × unit_price_cents)` over the sales rows, using
//! the price frozen on each sale. Products without sales never appear
//! (inner join).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockroom_core::{Money, Sale, SaleSummary};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts a sale record on its own.
    ///
    /// Does not look at stock; callers validate against the product first.
    ///
    /// ## Returns
    /// * `Ok(Sale)` - The stored sale with its id and timestamp
    /// * `Err(DbError::ForeignKeyViolation)` - `product_id` doesn't exist
    pub async fn add_sale(&self, product_id: i64, quantity: i64, unit_price: Money) -> DbResult<Sale> {
        debug!(product_id, quantity, "Inserting sale");

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (product_id, quantity, unit_price_cents, sold_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, product_id, quantity, unit_price_cents, sold_at
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price.cents())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Records a sale and persists the product's new stock level atomically.
    ///
    /// ## Arguments
    /// * `product_id` - Product being sold
    /// * `quantity` - Units sold
    /// * `unit_price` - Price at time of sale
    /// * `new_stock` - Stock level after the sale
    ///
    /// ## Returns
    /// * `Ok(Sale)` - Both writes committed
    /// * `Err(DbError::NotFound)` - Product vanished; nothing written
    pub async fn register_sale(
        &self,
        product_id: i64,
        quantity: i64,
        unit_price: Money,
        new_stock: i64,
    ) -> DbResult<Sale> {
        debug!(product_id, quantity, new_stock, "Registering sale");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE products SET quantity = ?2 WHERE id = ?1")
            .bind(product_id)
            .bind(new_stock)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Dropping `tx` rolls back
            return Err(DbError::not_found("Product", product_id));
        }

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (product_id, quantity, unit_price_cents, sold_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, product_id, quantity, unit_price_cents, sold_at
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price.cents())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(sale_id = sale.id, "Sale committed");
        Ok(sale)
    }

    /// Returns total quantity and revenue per product name, sorted by name.
    pub async fn get_sales_summary(&self) -> DbResult<Vec<SaleSummary>> {
        let summary = sqlx::query_as::<_, SaleSummary>(
            r#"
            SELECT
                p.name AS product_name,
                SUM(s.quantity) AS total_quantity,
                SUM(s.quantity * s.unit_price_cents) AS total_revenue_cents
            FROM sales s
            INNER JOIN products p ON p.id = s.product_id
            GROUP BY p.name
            ORDER BY p.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(rows = summary.len(), "Computed sales summary");
        Ok(summary)
    }

    /// Counts sale records.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_widget_scenario() {
        let db = setup().await;
        let widget = db
            .products()
            .add_product("Widget", 10, Money::from_cents(250))
            .await
            .unwrap();
        assert_eq!(widget.id, 1);

        let remaining = widget.remaining_after_sale(3).unwrap();
        let sale = db
            .sales()
            .register_sale(widget.id, 3, widget.price(), remaining)
            .await
            .unwrap();
        assert_eq!(sale.product_id, 1);
        assert_eq!(sale.quantity, 3);
        assert_eq!(sale.line_total().cents(), 750);

        let stock = db.products().get_product_by_id(1).await.unwrap().unwrap();
        assert_eq!(stock.quantity, 7);
        assert_eq!(db.sales().count().await.unwrap(), 1);

        let summary = db.sales().get_sales_summary().await.unwrap();
        assert_eq!(
            summary,
            vec![SaleSummary {
                product_name: "Widget".to_string(),
                total_quantity: 3,
                total_revenue_cents: 750,
            }]
        );
    }

    #[tokio::test]
    async fn test_summary_excludes_unsold_and_uses_price_at_sale() {
        let db = setup().await;
        let products = db.products();
        let bolt = products.add_product("Bolt", 100, Money::from_cents(10)).await.unwrap();
        products.add_product("Nut", 100, Money::from_cents(5)).await.unwrap();

        db.sales().add_sale(bolt.id, 4, bolt.price()).await.unwrap();

        // Price change after the first sale only affects later sales
        let mut repriced = bolt.clone();
        repriced.price_cents = 20;
        products.update_product(&repriced).await.unwrap();
        db.sales().add_sale(bolt.id, 2, repriced.price()).await.unwrap();

        let summary = db.sales().get_sales_summary().await.unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].product_name, "Bolt");
        assert_eq!(summary[0].total_quantity, 6);
        assert_eq!(summary[0].total_revenue_cents, 4 * 10 + 2 * 20);
    }

    #[tokio::test]
    async fn test_summary_empty_without_sales() {
        let db = setup().await;
        db.products()
            .add_product("Widget", 10, Money::from_cents(250))
            .await
            .unwrap();

        assert!(db.sales().get_sales_summary().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_sale_does_not_touch_stock() {
        let db = setup().await;
        let widget = db
            .products()
            .add_product("Widget", 10, Money::from_cents(250))
            .await
            .unwrap();

        db.sales().add_sale(widget.id, 2, widget.price()).await.unwrap();

        let stock = db.products().get_product_by_id(widget.id).await.unwrap().unwrap();
        assert_eq!(stock.quantity, 10);
    }

    #[tokio::test]
    async fn test_add_sale_for_unknown_product_fails() {
        let db = setup().await;

        let err = db.sales().add_sale(99, 1, Money::from_cents(100)).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_register_sale_for_vanished_product_writes_nothing() {
        let db = setup().await;

        let err = db
            .sales()
            .register_sale(5, 1, Money::from_cents(100), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }), "unexpected error: {err}");
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_register_sale_rolls_back_stock_when_insert_fails() {
        let db = setup().await;
        let widget = db
            .products()
            .add_product("Widget", 10, Money::from_cents(250))
            .await
            .unwrap();

        // Stock update succeeds, then CHECK (quantity > 0) rejects the sale row
        let err = db
            .sales()
            .register_sale(widget.id, 0, widget.price(), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation { .. }), "unexpected error: {err}");

        let stored = db.products().get_product_by_id(widget.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 10);
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_product_with_sales_is_rejected() {
        let db = setup().await;
        let widget = db
            .products()
            .add_product("Widget", 10, Money::from_cents(250))
            .await
            .unwrap();
        db.sales().add_sale(widget.id, 1, widget.price()).await.unwrap();

        let err = db.products().delete_product(widget.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "unexpected error: {err}");
        assert!(db.products().get_product_by_id(widget.id).await.unwrap().is_some());
    }
}
