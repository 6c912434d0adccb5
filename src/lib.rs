//! Plain-text Inventory Tracking
//!
//! Products are kept in memory as an ordered [`Inventory`] and persisted as a
//! single comma-separated snapshot file.

pub mod domain;
pub use domain::{
    Config, Inventory, InventoryError, Product, ProductEdit, StockError, Summary, category,
};

/// Flat-file persistence for the inventory.
pub mod storage;
pub use storage::{LoadError, load_products, save_products};

/// Fixed-width tabular rendering of products.
pub mod table;
