//! Data-driven content definitions and loaders.
//!
//! This crate reads the static data an inventory session is configured with:
//! - Item catalogs (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Content is consumed through the `ItemOracle` of `inventory-core` and never
//! appears in saved player state; only item ids and creation parameters do.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ItemLoader, LoadResult};
