//! Resolves content files inside a data directory.

use std::path::{Path, PathBuf};

use inventory_core::{GameConfig, ItemCatalog};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult};

/// Loads the item catalog and session configuration of one data directory.
///
/// ```text
/// data_dir/
/// ├── config.toml   optional
/// └── items.ron
/// ```
#[derive(Clone, Debug)]
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const ITEMS_FILE: &'static str = "items.ron";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Reads `config.toml`, or [`GameConfig::default`] when the file is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if path.is_file() {
            ConfigLoader::load(&path)
        } else {
            Ok(GameConfig::default())
        }
    }

    /// Reads `items.ron`. Unlike the config, the catalog is mandatory.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        ItemLoader::load_catalog(&self.data_dir.join(Self::ITEMS_FILE))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_data_dir() {
        let factory = ContentFactory::new("/tmp/inventory-data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/inventory-data"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert!(factory.load_items().is_err());
    }
}
