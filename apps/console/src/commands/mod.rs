//! # Menu Commands
//!
//! One method per menu entry, all implemented on [`Console`](crate::console::Console).
//!
//! ```text
//! commands/
//! ├── product.rs  ◄─── add, list all, list limited, update, delete
//! └── sale.rs     ◄─── register sale, sales summary
//! ```
//!
//! Each command returns `ConsoleResult<()>`. Storage and business-rule
//! errors bubble up with `?` and are reported by the menu loop; prompt
//! outcomes that abort an action (negative input, unknown id) print their
//! message here and return `Ok(())`.

pub mod product;
pub mod sale;
