//! Player and inventory state.
//!
//! This module owns the data the inventory rules operate on. Operations in
//! the sibling modules borrow it mutably; nothing here performs a transfer on
//! its own.
mod body;
mod error;
mod grid;
mod inventory;
mod player;
mod registry;

pub use body::BodyLocation;
pub use error::{InvariantViolation, RegistryError};
pub use grid::{GridCell, GridSlot, footprint_cells};
pub use inventory::{PlayerInventory, SpellSet};
pub use player::{
    Attributes, ClassCapabilities, DerivedStats, PlayerClass, PlayerMode, PlayerState,
    ReadiedSpell, SpellSource, TilePosition,
};
pub use registry::{PlayerId, PlayerRegistry};
