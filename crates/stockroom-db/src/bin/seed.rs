//! # Seed Data Generator
//!
//! Fills a database with sample products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 products (default)
//! cargo run -p stockroom-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p stockroom-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db
//! ```
//!
//! Names come from a few fixed categories with a size suffix. Quantities and
//! prices are derived from the row index so repeated runs produce the same
//! catalog.

use std::env;
use stockroom_core::Money;
use stockroom_db::{Database, DbConfig};

/// Product names grouped by category
const CATEGORIES: &[(&str, &[&str])] = &[
    ("Hardware", &["Hammer", "Screwdriver", "Wrench", "Pliers", "Tape Measure"]),
    ("Fasteners", &["Wood Screws", "Hex Bolts", "Wing Nuts", "Washers", "Nails"]),
    ("Electrical", &["Extension Cord", "Light Bulb", "Wall Plug", "Fuse", "Cable Ties"]),
    ("Garden", &["Trowel", "Hose Nozzle", "Pruning Shears", "Seed Tray", "Gloves"]),
];

/// Size variants with a price add-on in cents
const SIZES: &[(&str, i64)] = &[("Small", 0), ("Medium", 150), ("Large", 300)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./stockroom_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./stockroom_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockroom Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let products = db.products();
    let mut generated = 0;

    for (index, (name, price)) in catalog().take(count).enumerate() {
        let quantity = ((index * 7) % 60) as i64;

        if let Err(e) = products.add_product(&name, quantity, price).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }

        generated += 1;
        if generated % 25 == 0 {
            println!("  Generated {} products...", generated);
        }
    }

    println!();
    println!("✓ Generated {} products", generated);

    db.close().await;
    Ok(())
}

/// Endless, deterministic stream of `(name, price)` pairs.
///
/// Cycles through every category/name/size combination; after the first
/// pass names get a batch suffix so they stay distinguishable.
fn catalog() -> impl Iterator<Item = (String, Money)> {
    let combos: Vec<(&str, &str, &str, i64)> = CATEGORIES
        .iter()
        .flat_map(|(category, names)| {
            names.iter().flat_map(move |name| {
                SIZES
                    .iter()
                    .map(move |(size, addon)| (*category, *name, *size, *addon))
            })
        })
        .collect();

    (0usize..).map(move |seed| {
        let (category, name, size, addon) = combos[seed % combos.len()];
        let batch = seed / combos.len();

        let full_name = if batch == 0 {
            format!("{} {} ({})", name, size, category)
        } else {
            format!("{} {} ({}) #{}", name, size, category, batch + 1)
        };

        // $0.99 - $12.98 plus the size add-on
        let price = Money::from_cents(99 + ((seed * 37) % 1200) as i64 + addon);

        (full_name, price)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn combo_count() -> usize {
        CATEGORIES.iter().map(|(_, names)| names.len()).sum::<usize>() * SIZES.len()
    }

    #[test]
    fn test_catalog_is_deterministic() {
        let first: Vec<_> = catalog().take(20).collect();
        let second: Vec<_> = catalog().take(20).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_catalog_names_unique_past_one_batch() {
        let total = combo_count() * 2 + 3;
        let names: HashSet<String> = catalog().take(total).map(|(name, _)| name).collect();
        assert_eq!(names.len(), total);

        let repeat = catalog().nth(combo_count()).unwrap().0;
        assert!(repeat.ends_with("#2"), "second batch name: {repeat}");
    }

    #[test]
    fn test_catalog_prices_in_range() {
        let max_addon = SIZES.iter().map(|(_, addon)| *addon).max().unwrap();
        for (name, price) in catalog().take(combo_count()) {
            assert!(price.cents() >= 99, "{name} priced at {}", price.cents());
            assert!(price.cents() < 99 + 1200 + max_addon, "{name} priced at {}", price.cents());
        }
    }
}
