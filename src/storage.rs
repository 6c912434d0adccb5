//! Reading and writing the inventory snapshot file.
//!
//! The whole inventory is loaded once at startup and written back wholesale
//! on a clean exit. There is no incremental persistence.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::Inventory;

mod snapshot;
pub use snapshot::{HEADER, RecordError, format_record, parse_record, read, write};

/// Loads the inventory from the snapshot file at `path`.
///
/// A missing file is an empty inventory, not an error. Malformed lines are
/// skipped (see [`read`]).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be opened or read.
#[instrument(level = "debug")]
pub fn load_products(path: &Path) -> Result<Inventory, LoadError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!("no inventory file at {}, starting empty", path.display());
            return Ok(Inventory::new());
        }
        Err(source) => {
            return Err(LoadError {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let inventory = read(BufReader::new(file)).map_err(|source| LoadError {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(count = inventory.len(), "loaded inventory");
    Ok(inventory)
}

/// Writes the whole inventory to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
#[instrument(level = "debug", skip(inventory), fields(count = inventory.len()))]
pub fn save_products(path: &Path, inventory: &Inventory) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer, inventory)?;
    writer.flush()
}

/// The snapshot file exists but could not be read.
#[derive(Debug, thiserror::Error)]
#[error("failed to read inventory file {}", path.display())]
pub struct LoadError {
    /// The file that failed to load.
    pub path: PathBuf,
    /// The underlying I/O error.
    #[source]
    pub source: io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Product;

    #[test]
    fn missing_file_is_empty_inventory() {
        let tmp = tempfile::tempdir().unwrap();

        let inventory = load_products(&tmp.path().join("absent.csv")).unwrap();

        assert!(inventory.is_empty());
    }

    #[test]
    fn directory_is_a_load_error() {
        let tmp = tempfile::tempdir().unwrap();

        let error = load_products(tmp.path()).unwrap_err();

        assert_eq!(error.path, tmp.path());
    }

    #[test]
    fn save_then_load_reproduces_records() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("inventory.csv");
        let inventory: Inventory = [
            Product::new("A001", "TV", 0)
                .with_quantity(10)
                .with_price(299.99)
                .with_reorder_level(5),
            Product::new("Z9", "Mystery Box", 12)
                .with_quantity(-1)
                .with_price(0.5)
                .with_reorder_level(-2),
        ]
        .into_iter()
        .collect();

        save_products(&path, &inventory).unwrap();
        let loaded = load_products(&path).unwrap();

        assert_eq!(loaded, inventory);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("inventory.csv");
        std::fs::write(&path, "stale contents\nmore stale contents\n").unwrap();

        save_products(&path, &Inventory::new()).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), format!("{HEADER}\n"));
    }

    #[test]
    fn end_to_end_session() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("inventory.csv");

        let mut inventory = load_products(&path).unwrap();
        inventory.add(
            Product::new("A001", "TV", 0)
                .with_quantity(10)
                .with_price(299.99)
                .with_reorder_level(5),
        );
        assert_eq!(inventory.sell("A001", 3).unwrap().quantity(), 7);
        assert_eq!(inventory.restock("A001", 2).unwrap().quantity(), 9);
        assert!(!inventory.find("A001").unwrap().needs_restock());

        save_products(&path, &inventory).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "ID,Name,Category Index,Quantity,Price,Reorder Level\nA001,TV,0,9,299.99,5\n"
        );
        assert_eq!(load_products(&path).unwrap(), inventory);
    }
}
