use clap::Parser;
use stockroom::{Config, Inventory};
use tracing::instrument;

use super::{Session, terminal::Colorize};

/// Command arguments for `inv init`.
#[derive(Debug, Parser)]
pub struct Init {}

impl Init {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let config_path = session.root().join(Config::FILE_NAME);
        if config_path.exists() {
            anyhow::bail!(
                "Inventory already initialized (found existing {})",
                config_path.display()
            );
        }

        std::fs::create_dir_all(session.root()).map_err(|e| {
            anyhow::anyhow!("Failed to create {}: {e}", session.root().display())
        })?;

        let data_path = session.data_path();
        let mut config = Config::default();
        config.set_data_file(
            data_path
                .strip_prefix(session.root())
                .unwrap_or(data_path),
        );
        config
            .save(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", Config::FILE_NAME))?;
        println!("  Created: {}", config_path.display());

        if data_path.exists() {
            println!("  Kept existing: {}", data_path.display());
        } else {
            session.save(&Inventory::new())?;
            println!("  Created: {}", data_path.display());
        }

        println!(
            "{}",
            format!("Initialized inventory in {}", session.root().display()).success()
        );
        println!();
        println!("Next steps:");
        println!("  inv add A001 \"TV\" 0 --quantity 10 --price 299.99 --reorder-level 5");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_config_and_empty_inventory() {
        let tmp = tempfile::tempdir().unwrap();
        let session = Session::open(tmp.path().to_path_buf(), None).unwrap();

        Init {}.run(&session).unwrap();

        let config = Config::load(&tmp.path().join(Config::FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
        assert!(session.load().unwrap().is_empty());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("inventory.csv")).unwrap(),
            "ID,Name,Category Index,Quantity,Price,Reorder Level\n"
        );
    }

    #[test]
    fn records_explicit_data_file() {
        let tmp = tempfile::tempdir().unwrap();
        let session =
            Session::open(tmp.path().to_path_buf(), Some(tmp.path().join("shop.csv"))).unwrap();

        Init {}.run(&session).unwrap();

        let config = Config::load(&tmp.path().join(Config::FILE_NAME)).unwrap();
        assert_eq!(config.data_file(), std::path::Path::new("shop.csv"));
    }

    #[test]
    fn refuses_to_reinitialize() {
        let tmp = tempfile::tempdir().unwrap();
        let session = Session::open(tmp.path().to_path_buf(), None).unwrap();
        Init {}.run(&session).unwrap();

        assert!(Init {}.run(&session).is_err());
    }
}
