use clap::{Parser, ValueEnum};
use serde::Serialize;
use stockroom::{Product, table};
use tracing::instrument;

use super::{
    Session, parse_category,
    terminal::{Colorize, is_narrow},
};

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Command arguments for `inv list`.
#[derive(Debug, Parser)]
pub struct List {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl List {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let inventory = session.load()?;
        let products: Vec<&Product> = inventory.iter().collect();
        print_products(&products, self.output, None)
    }
}

/// Command arguments for `inv search`.
#[derive(Debug, Parser)]
pub struct Search {
    /// Case-insensitive substring of the product name or category name.
    term: String,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Search {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let inventory = session.load()?;
        let found = inventory.search(self.term.trim());
        print_products(&found, self.output, Some("No matches."))
    }
}

/// Command arguments for `inv category`.
#[derive(Debug, Parser)]
pub struct ByCategory {
    /// Category index (0-9).
    #[arg(value_parser = parse_category)]
    index: i64,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl ByCategory {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let inventory = session.load()?;
        let filtered = inventory.filter_by_category(self.index);
        print_products(
            &filtered,
            self.output,
            Some("No products in selected category."),
        )
    }
}

/// Command arguments for `inv low-stock`.
#[derive(Debug, Parser)]
pub struct LowStock {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl LowStock {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let inventory = session.load()?;
        let lows = inventory.low_stock();
        if self.output == OutputFormat::Table && !lows.is_empty() {
            println!("{}", "=== Low Stock Items ===".heading());
        }
        print_products(&lows, self.output, Some("No products below reorder level."))
    }
}

/// A product as emitted by `--output json`.
#[derive(Debug, Serialize)]
struct ProductRow<'a> {
    #[serde(flatten)]
    product: &'a Product,
    category_name: &'static str,
    needs_restock: bool,
}

impl<'a> From<&'a Product> for ProductRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            product,
            category_name: product.category_name(),
            needs_restock: product.needs_restock(),
        }
    }
}

/// Prints a product listing in the requested format.
///
/// In table format an empty listing prints `empty` if given, otherwise the
/// table placeholder. Narrow terminals get one canonical line per product
/// instead of the table.
pub fn print_products(
    products: &[&Product],
    output: OutputFormat,
    empty: Option<&str>,
) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => {
            let rows: Vec<ProductRow> = products.iter().copied().map(ProductRow::from).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Table => match empty {
            Some(message) if products.is_empty() => println!("{message}"),
            _ if is_narrow() && !products.is_empty() => {
                for product in products {
                    println!("{product}");
                }
            }
            _ => println!("{}", table::render_products(products.iter().copied())),
        },
    }
    Ok(())
}
