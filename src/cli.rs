use std::path::{Path, PathBuf};

mod init;
mod list;
mod menu;
mod stock;
mod summary;
mod terminal;

use clap::ArgAction;
use init::Init;
use list::{ByCategory, List, LowStock, Search};
use menu::Menu;
use stock::{Add, Edit, Remove, Restock, Sell};
use stockroom::{Config, Inventory, LoadError, category, load_products, save_products};
use summary::Summary;
use tracing::instrument;

/// Parse a category index, rejecting anything outside the category table.
fn parse_category(s: &str) -> Result<i64, String> {
    let index: i64 = s
        .trim()
        .parse()
        .map_err(|e| format!("invalid category index '{s}': {e}"))?;
    if category::is_valid(index) {
        Ok(index)
    } else {
        Err(format!(
            "invalid category index '{s}': expected 0-{}",
            category::CATEGORIES.len() - 1
        ))
    }
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The directory holding the inventory configuration and data
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// The inventory file to use, overriding the configured `data_file`
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let session = Session::open(self.root, self.file)?;
        self.command
            .unwrap_or(Command::Menu(Menu {}))
            .run(&session)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Where the inventory lives for this invocation.
#[derive(Debug)]
pub struct Session {
    root: PathBuf,
    data_path: PathBuf,
}

impl Session {
    fn open(root: PathBuf, file: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = Config::load_or_default(&root).map_err(|e| anyhow::anyhow!("{e}"))?;
        let data_path = file.unwrap_or_else(|| config.data_path(&root));
        tracing::debug!("using inventory file {}", data_path.display());
        Ok(Self { root, data_path })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn load(&self) -> Result<Inventory, LoadError> {
        load_products(&self.data_path)
    }

    pub fn save(&self, inventory: &Inventory) -> anyhow::Result<()> {
        save_products(&self.data_path, inventory).map_err(|e| {
            anyhow::anyhow!(
                "Failed to save inventory to {}: {e}",
                self.data_path.display()
            )
        })
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Run the interactive menu (default)
    Menu(Menu),

    /// Create a configuration file and an empty inventory
    Init(Init),

    /// List all products
    List(List),

    /// Search products by name or category name
    Search(Search),

    /// List the products in one category
    Category(ByCategory),

    /// Report products at or below their reorder level
    LowStock(LowStock),

    /// Show product and quantity totals
    Summary(Summary),

    /// Add a product
    Add(Add),

    /// Remove a product
    Remove(Remove),

    /// Edit a product's name, category, price or reorder level
    Edit(Edit),

    /// Sell units of a product
    Sell(Sell),

    /// Restock units of a product
    Restock(Restock),
}

impl Command {
    #[instrument(level = "debug", skip(session))]
    fn run(self, session: &Session) -> anyhow::Result<()> {
        match self {
            Self::Menu(command) => command.run(session)?,
            Self::Init(command) => command.run(session)?,
            Self::List(command) => command.run(session)?,
            Self::Search(command) => command.run(session)?,
            Self::Category(command) => command.run(session)?,
            Self::LowStock(command) => command.run(session)?,
            Self::Summary(command) => command.run(session)?,
            Self::Add(command) => command.run(session)?,
            Self::Remove(command) => command.run(session)?,
            Self::Edit(command) => command.run(session)?,
            Self::Sell(command) => command.run(session)?,
            Self::Restock(command) => command.run(session)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use test_case::test_case;

    use super::*;

    #[test_case("0" => Ok(0))]
    #[test_case(" 9 " => Ok(9))]
    fn parse_category_accepts_table_indices(input: &str) -> Result<i64, String> {
        parse_category(input)
    }

    #[test_case("10")]
    #[test_case("-1")]
    #[test_case("toys")]
    fn parse_category_rejects_others(input: &str) {
        assert!(parse_category(input).is_err());
    }

    #[test]
    fn no_subcommand_runs_the_menu() {
        let cli = Cli::try_parse_from(["inv"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn add_parses_optional_fields() {
        let cli = Cli::try_parse_from([
            "inv", "add", "A001", "TV", "0", "--quantity", "10", "--price", "299.99",
            "--reorder-level", "5",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Command::Add(_))));
    }

    #[test]
    fn add_rejects_out_of_range_category() {
        assert!(Cli::try_parse_from(["inv", "add", "A001", "TV", "12"]).is_err());
    }

    #[test]
    fn add_and_edit_accept_negative_prices() {
        let cli =
            Cli::try_parse_from(["inv", "add", "A001", "TV", "0", "--price", "-1"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Add(_))));

        let cli = Cli::try_parse_from(["inv", "edit", "A001", "--price", "-2.5"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Edit(_))));
    }

    #[test]
    fn sell_accepts_negative_amounts() {
        let cli = Cli::try_parse_from(["inv", "sell", "A001", "-3"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Sell(_))));
    }

    #[test]
    fn session_prefers_explicit_file() {
        let tmp = tempfile::tempdir().unwrap();
        let explicit = tmp.path().join("other.csv");

        let session = Session::open(tmp.path().to_path_buf(), Some(explicit.clone())).unwrap();

        assert_eq!(session.data_path(), explicit);
    }

    #[test]
    fn session_uses_configured_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.set_data_file("shop.csv");
        config.save(&tmp.path().join(Config::FILE_NAME)).unwrap();

        let session = Session::open(tmp.path().to_path_buf(), None).unwrap();

        assert_eq!(session.data_path(), tmp.path().join("shop.csv"));
    }
}
