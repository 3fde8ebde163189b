//! In-memory HeroRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use inventory_core::PackedPlayer;

use crate::repository::traits::validate_name;
use crate::repository::{HeroRepository, RepositoryError, Result};

/// In-memory implementation of HeroRepository.
pub struct InMemoryHeroRepository {
    heroes: RwLock<HashMap<String, PackedPlayer>>,
}

impl InMemoryHeroRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            heroes: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryHeroRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl HeroRepository for InMemoryHeroRepository {
    fn save(&self, name: &str, hero: &PackedPlayer) -> Result<()> {
        validate_name(name)?;
        let mut heroes = self
            .heroes
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        heroes.insert(name.to_owned(), hero.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<PackedPlayer>> {
        let heroes = self
            .heroes
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(heroes.get(name).cloned())
    }

    fn exists(&self, name: &str) -> bool {
        self.heroes
            .read()
            .map(|heroes| heroes.contains_key(name))
            .unwrap_or(false)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let mut heroes = self
            .heroes
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        heroes.remove(name);
        Ok(())
    }

    fn list_heroes(&self) -> Result<Vec<String>> {
        let heroes = self
            .heroes
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut names: Vec<String> = heroes.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }
}
