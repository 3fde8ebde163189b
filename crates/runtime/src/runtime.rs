//! Runtime configuration.

use std::path::PathBuf;

use inventory_content::ContentFactory;
use inventory_core::{GameConfig, ItemCatalog};

/// Everything a host needs to start a [`Session`](crate::Session).
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    /// Directory holding `items.ron` and `config.toml`.
    pub data_dir: Option<PathBuf>,
    pub save_dir: PathBuf,
    pub log_filter: String,
    /// Log to a file in this directory instead of stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            data_dir: None,
            save_dir: default_save_dir(),
            log_filter: "info".to_owned(),
            log_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Reads the configuration from the environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// Recognised variables:
    /// - `INVENTORY_DATA_DIR`: content directory; its `config.toml` replaces
    ///   the default game config
    /// - `INVENTORY_SAVE_DIR`: hero save directory
    /// - `INVENTORY_LOG`: log filter directive
    /// - `INVENTORY_LOG_DIR`: log to a file in this directory
    /// - `INVENTORY_EVENT_BUFFER`: per-topic event capacity
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        if let Ok(dir) = std::env::var("INVENTORY_DATA_DIR") {
            let dir = PathBuf::from(dir);
            config.game_config = ContentFactory::new(&dir).load_config()?;
            config.data_dir = Some(dir);
        }
        if let Ok(dir) = std::env::var("INVENTORY_SAVE_DIR") {
            config.save_dir = PathBuf::from(dir);
        }
        if let Ok(filter) = std::env::var("INVENTORY_LOG") {
            config.log_filter = filter;
        }
        if let Ok(dir) = std::env::var("INVENTORY_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Ok(size) = std::env::var("INVENTORY_EVENT_BUFFER") {
            config.event_buffer_size = size
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid INVENTORY_EVENT_BUFFER {:?}: {}", size, e))?;
        }
        Ok(config)
    }

    /// Loads the item catalog from `data_dir`.
    pub fn load_catalog(&self) -> anyhow::Result<ItemCatalog> {
        let Some(dir) = &self.data_dir else {
            anyhow::bail!("INVENTORY_DATA_DIR is not set");
        };
        ContentFactory::new(dir).load_items()
    }
}

/// Platform data directory for hero saves.
///
/// - Linux: `~/.local/share/inventory/heroes`
/// - macOS: `~/Library/Application Support/inventory/heroes`
/// - Fallback: `./save_data/heroes`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "inventory")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
        .join("heroes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_heroes_dir() {
        let config = RuntimeConfig::default();
        assert!(config.save_dir.ends_with("heroes"));
        assert_eq!(config.log_filter, "info");
        assert!(config.load_catalog().is_err());
    }
}
