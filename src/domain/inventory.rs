//! An ordered, in-memory collection of products.
//!
//! Insertion order is the display order. Identifiers are compared
//! case-insensitively, but [`Inventory::add`] does not enforce uniqueness:
//! callers that need it use [`Inventory::try_add`] or check
//! [`Inventory::find_index_by_id`] first.

use serde::Serialize;

use crate::domain::{Product, StockError};

/// The product collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    products: Vec<Product>,
}

/// Aggregate counts over an [`Inventory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of products.
    pub count: usize,
    /// Sum of the quantities of all products.
    ///
    /// Wider than a single quantity so that any set of `i64` quantities sums
    /// exactly.
    pub total_quantity: i128,
}

/// A set of optional field overwrites applied by [`Inventory::edit`].
///
/// Fields left as `None` keep their current value. The quantity is not
/// editable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductEdit {
    /// New product name.
    pub name: Option<String>,
    /// New category index.
    pub category: Option<i64>,
    /// New unit price.
    pub price: Option<f64>,
    /// New reorder level.
    pub reorder_level: Option<i64>,
}

impl ProductEdit {
    /// Whether this edit changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.reorder_level.is_none()
    }

    fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.set_name(name);
        }
        if let Some(category) = self.category {
            product.set_category(category);
        }
        if let Some(price) = self.price {
            product.set_price(price);
        }
        if let Some(reorder_level) = self.reorder_level {
            product.set_reorder_level(reorder_level);
        }
    }
}

/// Errors from identifier-based operations on an [`Inventory`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// No product has the given identifier.
    #[error("product '{0}' not found")]
    NotFound(String),

    /// A product with the given identifier already exists.
    #[error("product '{0}' already exists")]
    DuplicateId(String),

    /// The stock mutation was refused.
    #[error(transparent)]
    Stock(#[from] StockError),
}

fn same_id(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// The number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the inventory holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterates over the products in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// The products as a slice, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    /// Returns the position of the first product whose identifier matches
    /// `id`, ignoring case.
    #[must_use]
    pub fn find_index_by_id(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|p| same_id(p.id(), id))
    }

    /// Returns the first product whose identifier matches `id`, ignoring case.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.find_index_by_id(id).map(|i| &self.products[i])
    }

    /// Mutable variant of [`Inventory::find`].
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.find_index_by_id(id).map(|i| &mut self.products[i])
    }

    /// Returns the product at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    /// Returns the product at `index` mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Product> {
        self.products.get_mut(index)
    }

    /// Appends a product.
    ///
    /// Duplicate identifiers are not rejected.
    pub fn add(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Appends a product unless one with the same identifier (ignoring case)
    /// already exists.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::DuplicateId`] if the identifier is taken.
    pub fn try_add(&mut self, product: Product) -> Result<(), InventoryError> {
        if self.find_index_by_id(product.id()).is_some() {
            return Err(InventoryError::DuplicateId(product.id().to_string()));
        }
        self.add(product);
        Ok(())
    }

    /// Removes and returns the product at `index`, or `None` if out of
    /// bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<Product> {
        (index < self.products.len()).then(|| self.products.remove(index))
    }

    /// Removes and returns the first product matching `id`, ignoring case.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Product> {
        let index = self.find_index_by_id(id)?;
        self.remove_at(index)
    }

    /// Products whose name or category name contains `term`, ignoring case.
    ///
    /// An empty term matches every product.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let term = term.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name().to_lowercase().contains(&term)
                    || p.category_name().to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Products whose category index is exactly `category`.
    #[must_use]
    pub fn filter_by_category(&self, category: i64) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category() == category)
            .collect()
    }

    /// Products at or below their reorder level.
    #[must_use]
    pub fn low_stock(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.needs_restock()).collect()
    }

    /// The product count and the total quantity across all products.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            count: self.products.len(),
            total_quantity: self
                .products
                .iter()
                .map(|product| i128::from(product.quantity()))
                .sum(),
        }
    }

    /// Sells `amount` units of the product matching `id`.
    ///
    /// # Errors
    ///
    /// Fails if no product matches, or if the sale is refused (see
    /// [`Product::sell`]). Nothing is changed on failure.
    pub fn sell(&mut self, id: &str, amount: i64) -> Result<&Product, InventoryError> {
        let product = self.require_mut(id)?;
        product.sell(amount)?;
        Ok(product)
    }

    /// Restocks `amount` units of the product matching `id`.
    ///
    /// # Errors
    ///
    /// Fails if no product matches, or if the restock is refused (see
    /// [`Product::restock`]). Nothing is changed on failure.
    pub fn restock(&mut self, id: &str, amount: i64) -> Result<&Product, InventoryError> {
        let product = self.require_mut(id)?;
        product.restock(amount)?;
        Ok(product)
    }

    /// Applies `edit` to the product matching `id`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] if no product matches.
    pub fn edit(&mut self, id: &str, edit: ProductEdit) -> Result<&Product, InventoryError> {
        let product = self.require_mut(id)?;
        edit.apply(product);
        Ok(product)
    }

    fn require_mut(&mut self, id: &str) -> Result<&mut Product, InventoryError> {
        self.find_mut(id)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))
    }
}

impl FromIterator<Product> for Inventory {
    fn from_iter<T: IntoIterator<Item = Product>>(iter: T) -> Self {
        Self {
            products: iter.into_iter().collect(),
        }
    }
}

impl Extend<Product> for Inventory {
    fn extend<T: IntoIterator<Item = Product>>(&mut self, iter: T) {
        self.products.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

impl IntoIterator for Inventory {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Inventory {
        [
            Product::new("A001", "Television", 0)
                .with_quantity(10)
                .with_price(299.99)
                .with_reorder_level(5),
            Product::new("T001", "Electro-Gadget", 5)
                .with_quantity(2)
                .with_price(19.5)
                .with_reorder_level(3),
            Product::new("C001", "Jacket", 1)
                .with_quantity(7)
                .with_price(80.0)
                .with_reorder_level(7),
            Product::new("B001", "Atlas", 4)
                .with_quantity(12)
                .with_price(35.0)
                .with_reorder_level(1),
        ]
        .into_iter()
        .collect()
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id().to_string()).collect()
    }

    #[test]
    fn find_index_by_id_ignores_case() {
        let inventory = sample();

        assert_eq!(inventory.find_index_by_id("a001"), Some(0));
        assert_eq!(inventory.find_index_by_id("c001"), Some(2));
        assert_eq!(inventory.find_index_by_id("Z999"), None);
    }

    #[test]
    fn find_index_by_id_returns_first_match() {
        let mut inventory = sample();
        inventory.add(Product::new("a001", "Duplicate", 0));

        assert_eq!(inventory.len(), 5);
        assert_eq!(inventory.find_index_by_id("A001"), Some(0));
    }

    #[test]
    fn add_appends_in_order() {
        let mut inventory = Inventory::new();
        inventory.add(Product::new("X", "First", 0));
        inventory.add(Product::new("Y", "Second", 0));

        let names: Vec<_> = inventory.iter().map(Product::name).collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[test]
    fn try_add_rejects_duplicate_ids() {
        let mut inventory = sample();

        let error = inventory
            .try_add(Product::new("t001", "Other", 2))
            .unwrap_err();

        assert_eq!(error, InventoryError::DuplicateId("t001".to_string()));
        assert_eq!(inventory.len(), 4);
    }

    #[test]
    fn remove_at_out_of_bounds_is_none() {
        let mut inventory = sample();

        assert!(inventory.remove_at(4).is_none());
        assert_eq!(inventory.len(), 4);
    }

    #[test]
    fn remove_by_id_preserves_order_of_rest() {
        let mut inventory = sample();

        let removed = inventory.remove_by_id("t001").unwrap();

        assert_eq!(removed.name(), "Electro-Gadget");
        let remaining: Vec<_> = inventory.iter().map(Product::id).collect();
        assert_eq!(remaining, ["A001", "C001", "B001"]);
        assert!(inventory.remove_by_id("t001").is_none());
    }

    #[test]
    fn search_matches_name_or_category_name() {
        let inventory = sample();

        assert_eq!(ids(&inventory.search("electro")), ["A001", "T001"]);
        assert_eq!(ids(&inventory.search("ELECTRO")), ["A001", "T001"]);
    }

    #[test]
    fn search_with_empty_term_matches_everything() {
        let inventory = sample();

        assert_eq!(inventory.search("").len(), inventory.len());
    }

    #[test]
    fn search_without_matches_is_empty() {
        assert!(sample().search("kayak").is_empty());
    }

    #[test]
    fn filter_by_category_is_exact() {
        let inventory = sample();

        assert_eq!(ids(&inventory.filter_by_category(4)), ["B001"]);
        assert!(inventory.filter_by_category(9).is_empty());
    }

    #[test]
    fn low_stock_preserves_order() {
        let inventory = sample();

        assert_eq!(ids(&inventory.low_stock()), ["T001", "C001"]);
    }

    #[test]
    fn summary_counts_products_and_quantity() {
        assert_eq!(
            sample().summary(),
            Summary {
                count: 4,
                total_quantity: 31
            }
        );
        assert_eq!(Inventory::new().summary(), Summary::default());
    }

    #[test]
    fn summary_total_exceeds_single_quantity_range() {
        let inventory: Inventory = [
            Product::new("A001", "TV", 0).with_quantity(i64::MAX),
            Product::new("B001", "Radio", 0).with_quantity(1),
        ]
        .into_iter()
        .collect();

        let summary = inventory.summary();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_quantity, i128::from(i64::MAX) + 1);
    }

    #[test]
    fn sell_by_id() {
        let mut inventory = sample();

        let product = inventory.sell("a001", 3).unwrap();
        assert_eq!(product.quantity(), 7);

        assert_eq!(
            inventory.sell("a001", 8).unwrap_err(),
            InventoryError::Stock(StockError::InsufficientStock {
                available: 7,
                requested: 8
            })
        );
        assert_eq!(
            inventory.sell("nope", 1).unwrap_err(),
            InventoryError::NotFound("nope".to_string())
        );
    }

    #[test]
    fn restock_by_id() {
        let mut inventory = sample();

        assert_eq!(inventory.restock("T001", 4).unwrap().quantity(), 6);
        assert_eq!(
            inventory.restock("T001", 0).unwrap_err(),
            InventoryError::Stock(StockError::InvalidAmount(0))
        );
        assert_eq!(inventory.find("T001").unwrap().quantity(), 6);
    }

    #[test]
    fn edit_overwrites_only_given_fields() {
        let mut inventory = sample();

        let edit = ProductEdit {
            name: Some("Big Atlas".to_string()),
            price: Some(40.0),
            ..ProductEdit::default()
        };
        let product = inventory.edit("b001", edit).unwrap();

        assert_eq!(product.name(), "Big Atlas");
        assert!((product.price() - 40.0).abs() < f64::EPSILON);
        assert_eq!(product.category(), 4);
        assert_eq!(product.reorder_level(), 1);
        assert_eq!(product.quantity(), 12);
    }

    #[test]
    fn edit_missing_product_fails() {
        let mut inventory = sample();

        assert!(matches!(
            inventory.edit("nope", ProductEdit::default()),
            Err(InventoryError::NotFound(_))
        ));
    }
}
