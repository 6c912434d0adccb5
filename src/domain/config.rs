use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for the inventory tracker.
///
/// Stored as TOML in the working root. A missing file means defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Path of the inventory snapshot file.
    ///
    /// Relative paths are resolved against the working root.
    data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

impl Config {
    /// File name of the configuration file within the working root.
    pub const FILE_NAME: &'static str = "inventory.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration from `root`, falling back to defaults if the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(root: &Path) -> Result<Self, String> {
        let path = root.join(Self::FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The configured snapshot file path, as written in the configuration.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Sets the snapshot file path.
    pub fn set_data_file(&mut self, data_file: impl Into<PathBuf>) {
        self.data_file = data_file.into();
    }

    /// The snapshot file path resolved against `root`.
    #[must_use]
    pub fn data_path(&self, root: &Path) -> PathBuf {
        root.join(&self.data_file)
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("inventory.csv")
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_data_file")]
        data_file: PathBuf,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { data_file } => Self { data_file },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            data_file: config.data_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndata_file = \"stock/items.csv\"\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.data_file(), Path::new("stock/items.csv"));
        assert_eq!(
            config.data_path(Path::new("/srv")),
            PathBuf::from("/srv/stock/items.csv")
        );
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_or_default_without_file_returns_default() {
        let tmp = tempfile::tempdir().unwrap();

        assert_eq!(
            Config::load_or_default(tmp.path()).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndata_file = 3\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(Config::FILE_NAME);
        let mut config = Config::default();
        config.set_data_file("shop.csv");

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }
}
