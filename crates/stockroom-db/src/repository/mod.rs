//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Console dispatch                                                      │
//! │       │                                                                 │
//! │       │  db.products().get_product_by_id(1)                            │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── add_product / update_product / delete_product                     │
//! │  ├── get_all_products / get_limited_products / get_product_by_id       │
//! │  └── update_product_quantity                                           │
//! │                                                                         │
//! │  SaleRepository                                                        │
//! │  ├── add_sale / register_sale                                          │
//! │  └── get_sales_summary                                                 │
//! │       │                                                                 │
//! │       │  Parameterized SQL                                              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queries are bound at runtime (`sqlx::query_as::<_, T>`) and decoded
//! through the `FromRow` derives that `stockroom-core` enables under its
//! `sqlx` feature.

pub mod product;
pub mod sale;
