//! Repository contract for saving and loading heroes.

use inventory_core::PackedPlayer;

use crate::repository::{RepositoryError, Result};

/// Repository for hero save records, keyed by hero name.
///
/// Only packed records are stored. Loading a hero rebuilds every item
/// through the item catalog, so a repository never needs the catalog itself.
pub trait HeroRepository: Send + Sync {
    /// Save a packed hero, replacing any previous record with the same name
    fn save(&self, name: &str, hero: &PackedPlayer) -> Result<()>;

    /// Load a packed hero by name
    fn load(&self, name: &str) -> Result<Option<PackedPlayer>>;

    /// Check if a hero exists
    fn exists(&self, name: &str) -> bool;

    /// Delete a hero
    fn delete(&self, name: &str) -> Result<()>;

    /// List all saved hero names
    fn list_heroes(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}

/// Rejects names that could escape the save directory.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= 32
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidName(name.to_owned()))
    }
}
