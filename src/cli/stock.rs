//! Commands that change the inventory and write it back.

use clap::Parser;
use stockroom::{InventoryError, Product, ProductEdit};
use tracing::instrument;

use super::{Session, parse_category, terminal::Colorize};

/// Command arguments for `inv add`.
#[derive(Debug, Parser)]
pub struct Add {
    /// Product identifier (unique, case-insensitive)
    id: String,

    /// Product name
    name: String,

    /// Category index (0-9)
    #[arg(value_parser = parse_category)]
    category: i64,

    /// Initial quantity on hand
    #[arg(long, short, default_value_t = 0, allow_negative_numbers = true)]
    quantity: i64,

    /// Unit price
    #[arg(long, short, default_value_t = 0.0, allow_negative_numbers = true)]
    price: f64,

    /// Stock level at or below which the product should be restocked
    #[arg(long, short = 'l', default_value_t = 0, allow_negative_numbers = true)]
    reorder_level: i64,
}

impl Add {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let mut inventory = session.load()?;

        let product = Product::new(self.id.trim(), self.name.trim(), self.category)
            .with_quantity(self.quantity)
            .with_price(self.price)
            .with_reorder_level(self.reorder_level);

        match inventory.try_add(product) {
            Ok(()) => {}
            Err(InventoryError::DuplicateId(_)) => anyhow::bail!("ID already exists."),
            Err(e) => return Err(e.into()),
        }
        session.save(&inventory)?;

        println!("{}", "Product added.".success());
        Ok(())
    }
}

/// Command arguments for `inv remove`.
#[derive(Debug, Parser)]
pub struct Remove {
    /// Identifier of the product to remove
    id: String,
}

impl Remove {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let mut inventory = session.load()?;

        let Some(removed) = inventory.remove_by_id(self.id.trim()) else {
            anyhow::bail!("Product not found.");
        };
        session.save(&inventory)?;

        tracing::info!("removed {removed}");
        println!("{}", "Product removed.".success());
        Ok(())
    }
}

/// Command arguments for `inv edit`.
///
/// Options that are not given keep their current value. The quantity can
/// only be changed with `sell` and `restock`.
#[derive(Debug, Parser)]
pub struct Edit {
    /// Identifier of the product to edit
    id: String,

    /// New name
    #[arg(long, short)]
    name: Option<String>,

    /// New category index (0-9)
    #[arg(long, short, value_parser = parse_category)]
    category: Option<i64>,

    /// New unit price
    #[arg(long, short, allow_negative_numbers = true)]
    price: Option<f64>,

    /// New reorder level
    #[arg(long, short = 'l', allow_negative_numbers = true)]
    reorder_level: Option<i64>,
}

impl Edit {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let mut inventory = session.load()?;

        let edit = ProductEdit {
            name: self
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            category: self.category,
            price: self.price,
            reorder_level: self.reorder_level,
        };
        if edit.is_empty() {
            println!("Nothing to change.");
            return Ok(());
        }

        let product = match inventory.edit(self.id.trim(), edit) {
            Ok(product) => product.clone(),
            Err(InventoryError::NotFound(_)) => anyhow::bail!("Product not found."),
            Err(e) => return Err(e.into()),
        };
        session.save(&inventory)?;

        println!("{}", "Product updated.".success());
        println!("{product}");
        Ok(())
    }
}

/// Command arguments for `inv sell`.
#[derive(Debug, Parser)]
pub struct Sell {
    /// Identifier of the product to sell
    id: String,

    /// Number of units sold
    #[arg(allow_negative_numbers = true)]
    amount: i64,
}

impl Sell {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let mut inventory = session.load()?;

        let quantity = match inventory.sell(self.id.trim(), self.amount) {
            Ok(product) => product.quantity(),
            Err(InventoryError::NotFound(_)) => anyhow::bail!("Product not found."),
            Err(e) => {
                tracing::debug!("sale refused: {e}");
                anyhow::bail!("Not enough stock or invalid amount.");
            }
        };
        session.save(&inventory)?;

        println!("{}", "Sale successful.".success());
        println!("Remaining quantity: {quantity}");
        Ok(())
    }
}

/// Command arguments for `inv restock`.
#[derive(Debug, Parser)]
pub struct Restock {
    /// Identifier of the product to restock
    id: String,

    /// Number of units received
    #[arg(allow_negative_numbers = true)]
    amount: i64,
}

impl Restock {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let mut inventory = session.load()?;

        let quantity = match inventory.restock(self.id.trim(), self.amount) {
            Ok(product) => product.quantity(),
            Err(InventoryError::NotFound(_)) => anyhow::bail!("Product not found."),
            Err(e) => {
                tracing::debug!("restock refused: {e}");
                anyhow::bail!("Invalid restock amount.");
            }
        };
        session.save(&inventory)?;

        println!("{}", "Restocked successfully.".success());
        println!("Quantity on hand: {quantity}");
        Ok(())
    }
}
