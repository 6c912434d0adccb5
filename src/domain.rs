//! Domain models for inventory tracking.
//!
//! This module contains the core domain types including products, the fixed
//! category table, the product collection and configuration.

/// The fixed table of product categories.
pub mod category;

/// Product entity and stock mutation rules.
pub mod product;
pub use product::{Product, StockError};

/// Ordered product collection with lookup, filtering and aggregation.
pub mod inventory;
pub use inventory::{Inventory, InventoryError, ProductEdit, Summary};

mod config;
pub use config::Config;
