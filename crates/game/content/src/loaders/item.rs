//! Item catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use inventory_core::{GameConfig, ItemCatalog, ItemDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalogFile {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item definitions from a RON file.
    ///
    /// Definitions are checked before they are returned: ids must be unique
    /// and every footprint must fit the backpack grid. Gold has to occupy a
    /// single cell because stacks are merged cell by cell.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Load a RON file straight into an oracle.
    pub fn load_catalog(path: &Path) -> LoadResult<ItemCatalog> {
        Self::load(path).map(ItemCatalog::from_definitions)
    }

    /// Parse item definitions from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for def in &catalog.items {
            if !seen.insert(def.id) {
                anyhow::bail!("Duplicate item id {:?} ({})", def.id, def.name);
            }
            validate_footprint(def)?;
        }

        Ok(catalog.items)
    }
}

fn validate_footprint(def: &ItemDefinition) -> LoadResult<()> {
    let footprint = def.footprint;
    let width = usize::from(footprint.width);
    let height = usize::from(footprint.height);
    if width == 0 || height == 0 {
        anyhow::bail!("Item {} has an empty footprint", def.name);
    }
    if width > GameConfig::GRID_COLUMNS || height > GameConfig::GRID_ROWS {
        anyhow::bail!(
            "Item {} footprint {}x{} does not fit the backpack",
            def.name,
            width,
            height
        );
    }
    if def.item_type == inventory_core::ItemType::Gold && !footprint.is_single_cell() {
        anyhow::bail!("Gold item {} must be 1x1", def.name);
    }
    Ok(())
}
