//! File-based HeroRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use inventory_core::PackedPlayer;

use crate::repository::traits::validate_name;
use crate::repository::{HeroRepository, RepositoryError, Result};

/// File-based implementation of HeroRepository.
///
/// Stores heroes as `{name}.hero` files in bincode format. Writes go to a
/// temporary file first and are renamed into place, so a crash mid-save
/// leaves the previous record intact.
pub struct FileHeroRepository {
    base_dir: PathBuf,
}

impl FileHeroRepository {
    /// Create a new file-based hero repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn hero_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{}.hero", name))
    }
}

impl HeroRepository for FileHeroRepository {
    fn save(&self, name: &str, hero: &PackedPlayer) -> Result<()> {
        validate_name(name)?;
        let path = self.hero_path(name);
        let temp_path = path.with_extension("hero.tmp");

        let bytes =
            bincode::serialize(hero).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved hero {} to {}", name, path.display());

        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<PackedPlayer>> {
        validate_name(name)?;
        let path = self.hero_path(name);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let hero: PackedPlayer = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded hero {} from {}", name, path.display());

        Ok(Some(hero))
    }

    fn exists(&self, name: &str) -> bool {
        validate_name(name).is_ok() && self.hero_path(name).exists()
    }

    fn delete(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        let path = self.hero_path(name);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted hero {}", name);
        }

        Ok(())
    }

    fn list_heroes(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(name) = filename.strip_suffix(".hero")
            {
                names.push(name.to_owned());
            }
        }

        names.sort_unstable();
        Ok(names)
    }
}
