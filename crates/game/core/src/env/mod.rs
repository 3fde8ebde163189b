//! Read-only collaborators of the inventory rules.
//!
//! The item catalog, the deterministic RNG and the quest observer are supplied
//! from outside. [`InventoryEnv`] bundles the read-only parts so operations
//! receive everything they need without reaching for global state.
mod error;
mod items;
mod quest;
mod rng;

pub use error::OracleError;
pub use items::{BonusRange, ItemCatalog, ItemDefinition, ItemOracle};
pub use quest::{NoQuestHooks, QuestHooks};
pub use rng::{PcgRng, RngOracle, Roll, compute_seed};

use crate::config::GameConfig;
use crate::item::ItemId;

/// Aggregates the configuration and item data required by inventory operations.
#[derive(Clone, Copy)]
pub struct InventoryEnv<'a> {
    pub config: &'a GameConfig,
    pub items: &'a dyn ItemOracle,
}

impl<'a> InventoryEnv<'a> {
    pub fn new(config: &'a GameConfig, items: &'a dyn ItemOracle) -> Self {
        Self { config, items }
    }

    pub fn definition(&self, id: ItemId) -> Result<&'a ItemDefinition, OracleError> {
        self.items
            .definition(id)
            .ok_or(OracleError::ItemNotFound(id))
    }
}

impl core::fmt::Debug for InventoryEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
