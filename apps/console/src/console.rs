//! # Console Controller
//!
//! The numbered menu loop.
//!
//! ## Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Console::run()                                 │
//! │                                                                         │
//! │   ┌──► print menu ──► read choice                                      │
//! │   │                       │                                             │
//! │   │        not a number ──┼──► "Invalid input. Please enter a number." │
//! │   │        unknown number ┼──► "Invalid choice. Please try again."     │
//! │   │                       ▼                                             │
//! │   │                 dispatch(choice)                                    │
//! │   │                       │                                             │
//! │   │      Ok(Continue) ────┤                                             │
//! │   │      Err(db/core) ────┼──► user_message(), keep going              │
//! │   └───────────────────────┘                                             │
//! │                                                                         │
//! │   Ok(Exit) / stdin closed ──► return Ok(())                            │
//! │   stdout broken ────────────► return Err(Io)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store round trips are awaited one at a time; stdin is read with blocking
//! calls between them. There's only ever one user at the keyboard.

use std::io::{BufRead, Write};

use stockroom_db::Database;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::{ConsoleError, ConsoleResult};
use crate::prompt::Prompter;

/// Menu entries, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddProduct,
    ViewAllProducts,
    ViewLimitedProducts,
    UpdateProduct,
    DeleteProduct,
    RegisterSale,
    ViewSalesSummary,
    Exit,
}

impl MenuChoice {
    /// All entries in menu order.
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::AddProduct,
        MenuChoice::ViewAllProducts,
        MenuChoice::ViewLimitedProducts,
        MenuChoice::UpdateProduct,
        MenuChoice::DeleteProduct,
        MenuChoice::RegisterSale,
        MenuChoice::ViewSalesSummary,
        MenuChoice::Exit,
    ];

    /// Maps a typed number to an entry.
    pub fn from_number(n: i64) -> Option<Self> {
        usize::try_from(n)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddProduct => "Add Product",
            MenuChoice::ViewAllProducts => "View All Products",
            MenuChoice::ViewLimitedProducts => "View Limited Products",
            MenuChoice::UpdateProduct => "Update Product",
            MenuChoice::DeleteProduct => "Delete Product",
            MenuChoice::RegisterSale => "Register Sale",
            MenuChoice::ViewSalesSummary => "View Sales Summary",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// Interactive inventory console.
///
/// ## Usage
/// ```rust,ignore
/// let stdin = std::io::stdin();
/// let mut console = Console::new(stdin.lock(), std::io::stdout(), db, config);
/// console.run().await?;
/// ```
pub struct Console<R, W> {
    pub(crate) io: Prompter<R, W>,
    pub(crate) db: Database,
    pub(crate) config: AppConfig,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, db: Database, config: AppConfig) -> Self {
        Console {
            io: Prompter::new(input, output),
            db,
            config,
        }
    }

    /// Runs the menu until the user exits or stdin closes.
    ///
    /// ## Returns
    /// * `Ok(())` - Exit chosen, or end of input
    /// * `Err(ConsoleError::Io)` - The terminal itself failed
    pub async fn run(&mut self) -> ConsoleResult<()> {
        info!("Menu loop started");

        loop {
            let outcome = match self.read_choice() {
                Ok(Some(choice)) => self.dispatch(choice).await,
                Ok(None) => Ok(Flow::Continue),
                Err(err) => Err(err),
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(ConsoleError::EndOfInput) => {
                    info!("Input closed, leaving menu");
                    return Ok(());
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    error!(error = %err, "Menu action failed");
                    self.io.say(err.user_message())?;
                }
            }
        }
    }

    /// Prints the menu and reads one choice. `None` means the reply was
    /// rejected and the menu should be shown again.
    fn read_choice(&mut self) -> ConsoleResult<Option<MenuChoice>> {
        self.io.say("\n--- Inventory Management Menu ---")?;
        for (idx, choice) in MenuChoice::ALL.iter().enumerate() {
            self.io.say(format!("{}. {}", idx + 1, choice.label()))?;
        }

        let line = self.io.ask_line("Enter your choice: ")?;
        let Ok(number) = line.trim().parse::<i64>() else {
            self.io.say("Invalid input. Please enter a number.")?;
            return Ok(None);
        };

        match MenuChoice::from_number(number) {
            Some(choice) => Ok(Some(choice)),
            None => {
                self.io.say("Invalid choice. Please try again.")?;
                Ok(None)
            }
        }
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> ConsoleResult<Flow> {
        match choice {
            MenuChoice::AddProduct => self.add_product().await?,
            MenuChoice::ViewAllProducts => self.view_all_products().await?,
            MenuChoice::ViewLimitedProducts => self.view_limited_products().await?,
            MenuChoice::UpdateProduct => self.update_product().await?,
            MenuChoice::DeleteProduct => self.delete_product().await?,
            MenuChoice::RegisterSale => self.register_sale().await?,
            MenuChoice::ViewSalesSummary => self.view_sales_summary().await?,
            MenuChoice::Exit => {
                self.io.say("Exiting application. Goodbye!")?;
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;
    use stockroom_db::DbConfig;

    /// Runs `script` as stdin against `db` and returns everything printed.
    pub(crate) async fn run_script(db: &Database, script: &str) -> String {
        let mut output = Vec::new();
        {
            let mut console = Console::new(
                Cursor::new(script.as_bytes().to_vec()),
                &mut output,
                db.clone(),
                AppConfig::new(":memory:"),
            );
            console.run().await.unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    pub(crate) async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[test]
    fn test_menu_numbers() {
        assert_eq!(MenuChoice::from_number(1), Some(MenuChoice::AddProduct));
        assert_eq!(MenuChoice::from_number(8), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(9), None);
        assert_eq!(MenuChoice::from_number(-1), None);
    }

    #[tokio::test]
    async fn test_menu_shown_and_exit() {
        let db = setup().await;

        let out = run_script(&db, "8\n").await;

        assert!(out.contains("--- Inventory Management Menu ---"));
        assert!(out.contains("1. Add Product"));
        assert!(out.contains("7. View Sales Summary"));
        assert!(out.contains("8. Exit"));
        assert!(out.contains("Enter your choice: "));
        assert!(out.ends_with("Exiting application. Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_invalid_menu_input() {
        let db = setup().await;

        let out = run_script(&db, "abc\n9\n0\n8\n").await;

        assert_eq!(out.matches("Invalid input. Please enter a number.").count(), 1);
        assert_eq!(out.matches("Invalid choice. Please try again.").count(), 2);
        assert_eq!(out.matches("--- Inventory Management Menu ---").count(), 4);
        assert!(out.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_end_of_input_ends_loop() {
        let db = setup().await;

        let out = run_script(&db, "2\n").await;

        assert!(out.contains("No products found."));
        assert!(!out.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_end_of_input_mid_action() {
        let db = setup().await;

        let out = run_script(&db, "1\nWidget\n").await;

        assert!(out.contains("Enter quantity: "));
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_storage_error_is_reported_and_loop_continues() {
        let db = setup().await;
        let widget = db
            .products()
            .add_product("Widget", 10, stockroom_core::Money::from_cents(250))
            .await
            .unwrap();
        db.sales().add_sale(widget.id, 1, widget.price()).await.unwrap();

        let out = run_script(&db, "5\n1\nyes\n2\n8\n").await;

        assert!(out.contains("Database error: Foreign key violation"));
        assert!(out.contains("| Widget"));
        assert!(out.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_connection_error_is_reported() {
        let db = setup().await;
        db.close().await;

        let out = run_script(&db, "2\n8\n").await;

        assert!(out.contains("Database connection failed:"));
        assert!(out.contains("Goodbye!"));
    }
}
