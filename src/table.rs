//! Fixed-width listings.
//!
//! Columns are ID (8), Name (20), Category (12), Qty (8, right-aligned),
//! Price (10, right-aligned, two decimals) and `ReorderLvl` (14,
//! right-aligned). Values wider than their column are not truncated.

use crate::{Product, Summary};

/// Width of the rule printed below the header.
const RULE_WIDTH: usize = 74;

/// Placeholder printed instead of a table when there is nothing to list.
pub const EMPTY: &str = "(no products)";

/// Renders `products` as a table with a header row, one line per product.
///
/// An empty listing renders as [`EMPTY`].
#[must_use]
pub fn render_products<'a, I>(products: I) -> String
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut products = products.into_iter().peekable();
    if products.peek().is_none() {
        return EMPTY.to_string();
    }

    let mut lines = vec![
        format!(
            "{:<8} {:<20} {:<12} {:>8} {:>10} {:>14}",
            "ID", "Name", "Category", "Qty", "Price", "ReorderLvl"
        ),
        "-".repeat(RULE_WIDTH),
    ];
    lines.extend(products.map(|product| {
        format!(
            "{:<8} {:<20} {:<12} {:>8} {:>10.2} {:>14}",
            product.id(),
            product.name(),
            product.category_name(),
            product.quantity(),
            product.price(),
            product.reorder_level()
        )
    }));
    lines.join("\n")
}

/// Renders the inventory summary lines.
#[must_use]
pub fn render_summary(summary: &Summary) -> String {
    format!(
        "Total number of products: {}\nTotal quantity of all products: {}",
        summary.count, summary.total_quantity
    )
}
