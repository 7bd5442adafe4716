//! Sale commands: register a sale, show the sales summary.
//!
//! ## Register Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Product ID ──► lookup ──► "Product with ID N not found." (abort)   │
//! │  2. Quantity   ──► must be > 0                                          │
//! │  3. Stock check (Product::remaining_after_sale)                        │
//! │       └── too many ──► "Error: Not enough stock. Only N available."    │
//! │  4. SaleRepository::register_sale                                       │
//! │       └── INSERT sale + UPDATE stock, one transaction                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Nothing is written unless steps 1-3 pass.

use std::io::{BufRead, Write};

use stockroom_core::validation::validate_sale_quantity;
use stockroom_core::CoreError;
use tracing::info;

use crate::console::Console;
use crate::error::ConsoleResult;
use crate::prompt::Reply;
use crate::table::write_summary;

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) async fn register_sale(&mut self) -> ConsoleResult<()> {
        let Some(product) = self.find_product("Enter Product ID for sale: ").await? else {
            return Ok(());
        };

        self.io.say(format!(
            "Product selected: {} (Available: {})",
            product.name, product.quantity
        ))?;

        let Reply::Value(quantity) = self.io.ask_number("Enter quantity to sell: ")? else {
            return Ok(());
        };

        validate_sale_quantity(quantity).map_err(CoreError::from)?;
        let remaining = product.remaining_after_sale(quantity)?;

        let sale = self
            .db
            .sales()
            .register_sale(product.id, quantity, product.price(), remaining)
            .await?;
        info!(
            sale_id = sale.id,
            product_id = product.id,
            quantity,
            remaining,
            "Sale registered"
        );

        self.io.say(format!(
            "Sale registered successfully! Remaining stock for {}: {}",
            product.name, remaining
        ))
    }

    pub(crate) async fn view_sales_summary(&mut self) -> ConsoleResult<()> {
        let rows = self.db.sales().get_sales_summary().await?;
        write_summary(self.io.output(), &rows, &self.config.currency_symbol)?;
        Ok(())
    }
}
