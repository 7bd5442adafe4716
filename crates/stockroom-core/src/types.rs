//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │  SaleSummary    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (store)     │◄──│  product_id     │   │  product_name   │       │
//! │  │  name           │   │  quantity       │   │  total_quantity │       │
//! │  │  quantity       │   │  unit_price     │   │  total_revenue  │       │
//! │  │  price_cents    │   │  sold_at        │   │  (derived)      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are integers assigned by the database on insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A stocked item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Database-generated identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Units currently in stock.
    pub quantity: i64,

    /// Unit price in cents.
    pub price_cents: i64,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the stock left after selling `requested` units.
    ///
    /// ## Returns
    /// * `Ok(remaining)` - Enough stock; `remaining = quantity - requested`
    /// * `Err(CoreError::InsufficientStock)` - Requested more than recorded stock
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::Product;
    ///
    /// let widget = Product { id: 1, name: "Widget".into(), quantity: 10, price_cents: 250 };
    /// assert_eq!(widget.remaining_after_sale(3).unwrap(), 7);
    /// assert!(widget.remaining_after_sale(11).is_err());
    /// ```
    pub fn remaining_after_sale(&self, requested: i64) -> CoreResult<i64> {
        if requested > self.quantity {
            return Err(CoreError::InsufficientStock {
                product: self.name.clone(),
                available: self.quantity,
                requested,
            });
        }

        Ok(self.quantity - requested)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// An immutable record of units sold.
///
/// `unit_price_cents` is the product price frozen at the time of sale, so
/// later price edits never rewrite historical revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub sold_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the revenue of this sale line.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Sale Summary
// =============================================================================

/// Aggregated sales for one product name. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleSummary {
    pub product_name: String,
    pub total_quantity: i64,
    pub total_revenue_cents: i64,
}

impl SaleSummary {
    /// Returns the total revenue as Money.
    #[inline]
    pub fn total_revenue(&self) -> Money {
        Money::from_cents(self.total_revenue_cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(quantity: i64) -> Product {
        Product {
            id: 1,
            name: "Widget".to_string(),
            quantity,
            price_cents: 250,
        }
    }

    #[test]
    fn test_remaining_after_sale() {
        assert_eq!(widget(10).remaining_after_sale(3).unwrap(), 7);
        assert_eq!(widget(10).remaining_after_sale(10).unwrap(), 0);
    }

    #[test]
    fn test_insufficient_stock() {
        let err = widget(2).remaining_after_sale(3).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                product,
                available,
                requested,
            } => {
                assert_eq!(product, "Widget");
                assert_eq!(available, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sale_line_total() {
        let sale = Sale {
            id: 1,
            product_id: 1,
            quantity: 3,
            unit_price_cents: 250,
            sold_at: Utc::now(),
        };
        assert_eq!(sale.line_total().cents(), 750);
    }

    #[test]
    fn test_summary_revenue() {
        let summary = SaleSummary {
            product_name: "Widget".to_string(),
            total_quantity: 3,
            total_revenue_cents: 750,
        };
        assert_eq!(summary.total_revenue().to_string(), "$7.50");
    }
}
