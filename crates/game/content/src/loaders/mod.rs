//! File loaders for item catalogs and session configuration.
//!
//! Catalogs are RON, configuration is TOML. [`ContentFactory`] resolves both
//! inside a single data directory.

pub mod config;
pub mod factory;
pub mod item;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;

use std::path::Path;

use anyhow::Context;

pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
