use std::fmt;

use serde::Serialize;

use crate::domain::category;

/// A stocked product.
///
/// The quantity on hand has no setter. It only changes through
/// [`Product::sell`] and [`Product::restock`], both of which leave the
/// product untouched when they fail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Identifier, unique (case-insensitively) within an inventory.
    id: String,
    name: String,
    /// Index into the category table.
    ///
    /// This is stored verbatim, even when it is out of range.
    category: i64,
    quantity: i64,
    price: f64,
    /// Stock level at or below which the product should be restocked.
    reorder_level: i64,
}

impl Product {
    /// Creates a product with no stock, a zero price and a zero reorder
    /// level.
    ///
    /// No range validation is performed. An out-of-range `category` is
    /// accepted and displays as "Unknown".
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            quantity: 0,
            price: 0.0,
            reorder_level: 0,
        }
    }

    /// Sets the initial quantity on hand.
    ///
    /// The value is not validated to be non-negative.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the unit price.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Sets the reorder level.
    #[must_use]
    pub const fn with_reorder_level(mut self, reorder_level: i64) -> Self {
        self.reorder_level = reorder_level;
        self
    }

    /// The product identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw category index.
    #[must_use]
    pub const fn category(&self) -> i64 {
        self.category
    }

    /// The quantity on hand.
    #[must_use]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }

    /// The unit price.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// The reorder level.
    #[must_use]
    pub const fn reorder_level(&self) -> i64 {
        self.reorder_level
    }

    /// Replaces the product identifier.
    ///
    /// Uniqueness within an inventory is the caller's concern.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Replaces the product name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replaces the category index without validation.
    pub const fn set_category(&mut self, category: i64) {
        self.category = category;
    }

    /// Replaces the unit price.
    pub const fn set_price(&mut self, price: f64) {
        self.price = price;
    }

    /// Replaces the reorder level.
    pub const fn set_reorder_level(&mut self, reorder_level: i64) {
        self.reorder_level = reorder_level;
    }

    /// The display name of the product's category, or "Unknown".
    #[must_use]
    pub fn category_name(&self) -> &'static str {
        category::name_for(self.category)
    }

    /// Whether stock is at or below the reorder level.
    #[must_use]
    pub const fn needs_restock(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    /// Adds `amount` units to the stock on hand.
    ///
    /// # Errors
    ///
    /// Fails without changing the quantity if `amount` is not positive, or if
    /// the new quantity would not fit in an `i64`.
    pub const fn restock(&mut self, amount: i64) -> Result<(), StockError> {
        if amount <= 0 {
            return Err(StockError::InvalidAmount(amount));
        }
        let Some(quantity) = self.quantity.checked_add(amount) else {
            return Err(StockError::Overflow);
        };
        self.quantity = quantity;
        Ok(())
    }

    /// Removes `amount` units from the stock on hand.
    ///
    /// # Errors
    ///
    /// Fails without changing the quantity if `amount` is not positive, or if
    /// fewer than `amount` units are in stock.
    pub const fn sell(&mut self, amount: i64) -> Result<(), StockError> {
        if amount <= 0 {
            return Err(StockError::InvalidAmount(amount));
        }
        if self.quantity < amount {
            return Err(StockError::InsufficientStock {
                available: self.quantity,
                requested: amount,
            });
        }
        self.quantity -= amount;
        Ok(())
    }
}

/// Renders `"{id} {name} {category} {quantity} {price} $"`, with the price to
/// two decimal places.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {:.2} $",
            self.id,
            self.name,
            self.category_name(),
            self.quantity,
            self.price
        )
    }
}

/// Reasons a stock mutation is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StockError {
    /// The amount was zero or negative.
    #[error("invalid amount {0}: must be greater than zero")]
    InvalidAmount(i64),

    /// A sale asked for more units than are in stock.
    #[error("insufficient stock: requested {requested}, only {available} available")]
    InsufficientStock {
        /// Units in stock.
        available: i64,
        /// Units requested.
        requested: i64,
    },

    /// The resulting quantity would overflow.
    #[error("quantity overflow")]
    Overflow,
}
