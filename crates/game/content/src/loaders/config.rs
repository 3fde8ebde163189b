//! Session configuration from TOML.

use std::path::Path;

use anyhow::Context;
use inventory_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content).context("parsing game config")?;

        if config.max_gold == 0 {
            anyhow::bail!("max_gold must be positive");
        }
        if config.screen.right_panel_x() < 0 || config.screen.panel_left() < 0 {
            anyhow::bail!(
                "Screen {}x{} is too small for the inventory panels",
                config.screen.width,
                config.screen.height
            );
        }

        Ok(config)
    }
}
