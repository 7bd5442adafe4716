//! Product commands: add, list, update, delete.

use std::io::{BufRead, Write};

use stockroom_core::validation::is_confirmation;
use stockroom_core::Product;
use tracing::info;

use crate::console::Console;
use crate::error::ConsoleResult;
use crate::prompt::Reply;
use crate::table::write_products;

impl<R: BufRead, W: Write> Console<R, W> {
    /// Prompts for name, quantity and price, then stores a new product.
    pub(crate) async fn add_product(&mut self) -> ConsoleResult<()> {
        let name = self.io.ask_line("Enter product name: ")?.trim().to_string();

        let Reply::Value(quantity) = self.io.ask_number("Enter quantity: ")? else {
            return Ok(());
        };
        let Reply::Value(price) = self.io.ask_amount("Enter price: ")? else {
            return Ok(());
        };

        let product = self.db.products().add_product(&name, quantity, price).await?;
        info!(id = product.id, name = %product.name, "Product added");

        self.io.say("Product added successfully!")
    }

    pub(crate) async fn view_all_products(&mut self) -> ConsoleResult<()> {
        let products = self.db.products().get_all_products().await?;
        write_products(
            self.io.output(),
            "All Products",
            &products,
            &self.config.currency_symbol,
        )?;
        Ok(())
    }

    pub(crate) async fn view_limited_products(&mut self) -> ConsoleResult<()> {
        let Reply::Value(limit) = self.io.ask_number("Enter limit for products to view: ")? else {
            return Ok(());
        };

        // Anything past u32::MAX already means "everything"
        let capped = u32::try_from(limit).unwrap_or(u32::MAX);
        let products = self.db.products().get_limited_products(capped).await?;

        write_products(
            self.io.output(),
            &format!("Limited Products (Top {})", limit),
            &products,
            &self.config.currency_symbol,
        )?;
        Ok(())
    }

    /// Edits an existing product field by field.
    ///
    /// A blank reply keeps the current value. So does a negative quantity
    /// or price, after the usual warning.
    pub(crate) async fn update_product(&mut self) -> ConsoleResult<()> {
        let Some(existing) = self.find_product("Enter product ID to update: ").await? else {
            return Ok(());
        };

        self.io.say(format!("\nUpdating Product: {}", existing.name))?;

        let name = self
            .io
            .ask_line(&format!("Enter new product name (current: {}): ", existing.name))?;
        let name = match name.trim() {
            "" => existing.name.clone(),
            typed => typed.to_string(),
        };

        let quantity = self
            .io
            .ask_number_or_keep(&format!("Enter new quantity (current: {}): ", existing.quantity))?
            .or_keep(existing.quantity);

        let price = self
            .io
            .ask_amount_or_keep(&format!(
                "Enter new price (current: {}): ",
                existing.price().format_with("")
            ))?
            .or_keep(existing.price());

        let updated = Product {
            id: existing.id,
            name,
            quantity,
            price_cents: price.cents(),
        };
        self.db.products().update_product(&updated).await?;
        info!(id = updated.id, "Product updated");

        self.io.say("Product updated successfully!")
    }

    /// Deletes a product after the user types "yes".
    pub(crate) async fn delete_product(&mut self) -> ConsoleResult<()> {
        let Some(existing) = self.find_product("Enter product ID to delete: ").await? else {
            return Ok(());
        };

        let reply = self.io.ask_line(&format!(
            "Are you sure you want to delete '{}' (ID: {})? (yes/no): ",
            existing.name, existing.id
        ))?;

        if !is_confirmation(&reply) {
            return self.io.say("Product deletion cancelled.");
        }

        self.db.products().delete_product(existing.id).await?;
        info!(id = existing.id, "Product deleted");

        self.io.say("Product deleted successfully!")
    }

    /// Asks for a product id and looks it up.
    ///
    /// Prints the not-found message itself; `None` means the caller should
    /// abandon the action.
    pub(crate) async fn find_product(&mut self, prompt: &str) -> ConsoleResult<Option<Product>> {
        let Reply::Value(id) = self.io.ask_number(prompt)? else {
            return Ok(None);
        };

        let product = self.db.products().get_product_by_id(id).await?;
        if product.is_none() {
            self.io.say(format!("Product with ID {} not found.", id))?;
        }

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use crate::console::tests::{run_script, setup};
    use stockroom_core::Money;

    #[tokio::test]
    async fn test_add_then_list() {
        let db = setup().await;

        let out = run_script(&db, "1\nWidget\n10\n2.50\n2\n8\n").await;

        assert!(out.contains("Product added successfully!"));
        assert!(out.contains("--- All Products ---"));
        assert!(out.contains("1     | Widget               | 10         | $2.50"));

        let stored = db.products().get_product_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.name, "Widget");
        assert_eq!(stored.quantity, 10);
        assert_eq!(stored.price_cents, 250);
    }

    #[tokio::test]
    async fn test_add_reprompts_on_text_and_aborts_on_negative() {
        let db = setup().await;

        let out = run_script(&db, "1\nWidget\nten\n10\n2.50\n1\nGadget\n-1\n8\n").await;

        assert!(out.contains("Invalid input. Please enter a valid number."));
        assert!(out.contains("Input must be a positive number."));
        assert_eq!(out.matches("Product added successfully!").count(), 1);
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let db = setup().await;

        let out = run_script(&db, "2\n8\n").await;
        assert!(out.contains("No products found."));
    }

    #[tokio::test]
    async fn test_limited_list() {
        let db = setup().await;
        for name in ["Alpha", "Beta", "Gamma"] {
            db.products()
                .add_product(name, 1, Money::from_cents(100))
                .await
                .unwrap();
        }

        let out = run_script(&db, "3\n2\n8\n").await;

        assert!(out.contains("--- Limited Products (Top 2) ---"));
        assert!(out.contains("| Alpha"));
        assert!(out.contains("| Beta"));
        assert!(!out.contains("| Gamma"));
    }

    #[tokio::test]
    async fn test_update_with_blanks_keeps_current_values() {
        let db = setup().await;
        db.products()
            .add_product("Widget", 10, Money::from_cents(250))
            .await
            .unwrap();

        let out = run_script(&db, "4\n1\n\n\n3.75\n8\n").await;

        assert!(out.contains("Updating Product: Widget"));
        assert!(out.contains("Enter new product name (current: Widget): "));
        assert!(out.contains("Enter new quantity (current: 10): "));
        assert!(out.contains("Enter new price (current: 2.50): "));
        assert!(out.contains("Product updated successfully!"));

        let stored = db.products().get_product_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.name, "Widget");
        assert_eq!(stored.quantity, 10);
        assert_eq!(stored.price_cents, 375);
    }

    #[tokio::test]
    async fn test_update_negative_keeps_current_value() {
        let db = setup().await;
        db.products()
            .add_product("Widget", 10, Money::from_cents(250))
            .await
            .unwrap();

        let out = run_script(&db, "4\n1\nGadget\n-5\n\n8\n").await;

        assert!(out.contains("Input must be a positive number."));

        let stored = db.products().get_product_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.name, "Gadget");
        assert_eq!(stored.quantity, 10);
        assert_eq!(stored.price_cents, 250);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let db = setup().await;

        let out = run_script(&db, "4\n7\n8\n").await;

        assert!(out.contains("Product with ID 7 not found."));
        assert!(!out.contains("Updating Product"));
    }

    #[tokio::test]
    async fn test_delete_requires_yes() {
        let db = setup().await;
        db.products()
            .add_product("Widget", 10, Money::from_cents(250))
            .await
            .unwrap();

        let out = run_script(&db, "5\n1\nno\n8\n").await;
        assert!(out.contains("Are you sure you want to delete 'Widget' (ID: 1)? (yes/no): "));
        assert!(out.contains("Product deletion cancelled."));
        assert!(db.products().get_product_by_id(1).await.unwrap().is_some());

        let out = run_script(&db, "5\n1\n YES \n8\n").await;
        assert!(out.contains("Product deleted successfully!"));
        assert!(db.products().get_product_by_id(1).await.unwrap().is_none());
    }
}
