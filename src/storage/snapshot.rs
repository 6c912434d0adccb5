//! The line-oriented snapshot format.
//!
//! ```text
//! ID,Name,Category Index,Quantity,Price,Reorder Level
//! A001,TV,0,10,299.99,5
//! ```
//!
//! Fields are comma-separated with no quoting or escaping, so a comma inside
//! an identifier or name does not survive a round trip.

use std::{
    io::{self, BufRead, Write},
    num::{ParseFloatError, ParseIntError},
};

use crate::{Inventory, Product};

/// The header line written at the top of every snapshot.
pub const HEADER: &str = "ID,Name,Category Index,Quantity,Price,Reorder Level";

/// Reasons a snapshot line is not a valid product record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The line has fewer than six comma-separated fields.
    #[error("expected 6 fields, found {0}")]
    TooFewFields(usize),

    /// A numeric field could not be parsed.
    #[error("invalid {field} '{value}'")]
    InvalidNumber {
        /// Name of the offending field.
        field: &'static str,
        /// The raw field text.
        value: String,
    },
}

impl RecordError {
    fn invalid_int(field: &'static str, value: &str) -> impl FnOnce(ParseIntError) -> Self {
        let value = value.to_string();
        move |_| Self::InvalidNumber { field, value }
    }

    fn invalid_float(field: &'static str, value: &str) -> impl FnOnce(ParseFloatError) -> Self {
        let value = value.to_string();
        move |_| Self::InvalidNumber { field, value }
    }
}

/// Parses one snapshot line into a product.
///
/// Fields are read positionally and whitespace-trimmed. Fields beyond the
/// sixth are ignored.
///
/// # Errors
///
/// Returns an error if the line has fewer than six fields, or if the
/// category, quantity, price or reorder level does not parse.
pub fn parse_record(line: &str) -> Result<Product, RecordError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [id, name, category, quantity, price, reorder_level, ..] = fields.as_slice() else {
        return Err(RecordError::TooFewFields(fields.len()));
    };

    let category: i64 = category
        .parse()
        .map_err(RecordError::invalid_int("category", category))?;
    let quantity: i64 = quantity
        .parse()
        .map_err(RecordError::invalid_int("quantity", quantity))?;
    let price: f64 = price
        .parse()
        .map_err(RecordError::invalid_float("price", price))?;
    let reorder_level: i64 = reorder_level
        .parse()
        .map_err(RecordError::invalid_int("reorder level", reorder_level))?;

    Ok(Product::new(*id, *name, category)
        .with_quantity(quantity)
        .with_price(price)
        .with_reorder_level(reorder_level))
}

/// Formats a product as one snapshot line, without the line terminator.
#[must_use]
pub fn format_record(product: &Product) -> String {
    format!(
        "{},{},{},{},{:.2},{}",
        product.id(),
        product.name(),
        product.category(),
        product.quantity(),
        product.price(),
        product.reorder_level()
    )
}

/// Reads an inventory from a snapshot.
///
/// Blank lines and a header line (any line starting with `id,`, ignoring
/// case) are skipped. Malformed records are dropped with a warning and do not
/// abort the read.
///
/// # Errors
///
/// Returns an error only if the underlying reader fails.
pub fn read<R: BufRead>(reader: R) -> io::Result<Inventory> {
    let mut inventory = Inventory::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.to_lowercase().starts_with("id,") {
            continue;
        }

        match parse_record(line) {
            Ok(product) => inventory.add(product),
            Err(e) => tracing::warn!(line = index + 1, "skipping malformed record: {e}"),
        }
    }

    Ok(inventory)
}

/// Writes the header and one line per product, in inventory order.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn write<W: Write>(writer: &mut W, inventory: &Inventory) -> io::Result<()> {
    writeln!(writer, "{HEADER}")?;
    for product in inventory {
        writeln!(writer, "{}", format_record(product))?;
    }
    Ok(())
}
