//! Fixed-width tables for product listings and the sales summary.

use std::io::{self, Write};

use stockroom_core::{Product, SaleSummary};

const PRODUCT_RULE_WIDTH: usize = 52;
const SUMMARY_RULE_WIDTH: usize = 50;

/// Writes a titled product table, or "No products found." when empty.
///
/// ```text
/// --- All Products ---
/// ID    | Name                 | Quantity   | Price
/// ----------------------------------------------------
/// 1     | Widget               | 10         | $2.50
/// ----------------------------------------------------
/// ```
pub fn write_products<W: Write>(
    out: &mut W,
    title: &str,
    products: &[Product],
    currency_symbol: &str,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- {} ---", title)?;

    if products.is_empty() {
        return writeln!(out, "No products found.");
    }

    writeln!(out, "{:<5} | {:<20} | {:<10} | {:<10}", "ID", "Name", "Quantity", "Price")?;
    writeln!(out, "{}", "-".repeat(PRODUCT_RULE_WIDTH))?;
    for product in products {
        writeln!(
            out,
            "{:<5} | {:<20} | {:<10} | {:<10}",
            product.id,
            product.name,
            product.quantity,
            product.price().format_with(currency_symbol)
        )?;
    }
    writeln!(out, "{}", "-".repeat(PRODUCT_RULE_WIDTH))
}

/// Writes the sales summary, or "No sales recorded yet." when empty.
pub fn write_summary<W: Write>(
    out: &mut W,
    rows: &[SaleSummary],
    currency_symbol: &str,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Sales Summary ---")?;

    if rows.is_empty() {
        return writeln!(out, "No sales recorded yet.");
    }

    writeln!(out, "{:<20} {:<15} {:<15}", "Product Name", "Total Qty Sold", "Total Revenue")?;
    writeln!(out, "{}", "-".repeat(SUMMARY_RULE_WIDTH))?;
    for row in rows {
        writeln!(
            out,
            "{:<20} {:<15} {:<15}",
            row.product_name,
            row.total_quantity,
            row.total_revenue().format_with(currency_symbol)
        )?;
    }
    writeln!(out, "{}", "-".repeat(SUMMARY_RULE_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_product_table_columns() {
        let products = vec![Product {
            id: 1,
            name: "Widget".to_string(),
            quantity: 10,
            price_cents: 250,
        }];

        let text = render(|out| write_products(out, "All Products", &products, "$"));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "--- All Products ---");
        assert_eq!(lines[2].trim_end(), "ID    | Name                 | Quantity   | Price");
        assert_eq!(lines[3], "-".repeat(52));
        assert_eq!(lines[4], "1     | Widget               | 10         | $2.50     ");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_empty_product_table() {
        let text = render(|out| write_products(out, "Limited Products (Top 3)", &[], "$"));

        assert!(text.contains("--- Limited Products (Top 3) ---"));
        assert!(text.contains("No products found."));
        assert!(!text.contains("Quantity"));
    }

    #[test]
    fn test_summary_table() {
        let rows = vec![SaleSummary {
            product_name: "Widget".to_string(),
            total_quantity: 3,
            total_revenue_cents: 750,
        }];

        let text = render(|out| write_summary(out, &rows, "€"));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "--- Sales Summary ---");
        assert_eq!(lines[3], "-".repeat(50));
        assert_eq!(lines[4].trim_end(), "Widget               3               €7.50");
    }

    #[test]
    fn test_empty_summary() {
        let text = render(|out| write_summary(out, &[], "$"));
        assert!(text.ends_with("No sales recorded yet.\n"));
    }
}
