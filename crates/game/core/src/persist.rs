//! Save records for heroes.
//!
//! A packed record stores only what cannot be regenerated: item creation
//! parameters, the legacy sign-encoded grid and the player's base data.
//! Unpacking rebuilds every item and recomputes all cached values instead of
//! trusting anything derived.

use crate::config::GameConfig;
use crate::env::{InventoryEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::item::Item;
use crate::net::{ItemSync, reconstruct};
use crate::state::{
    Attributes, BodyLocation, GridCell, InvariantViolation, PlayerClass, PlayerId, PlayerInventory, PlayerState,
    ReadiedSpell, TilePosition,
};

/// Items are saved in the same form they are replicated in.
pub type PackedItem = ItemSync;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedInventory {
    pub body: [Option<PackedItem>; GameConfig::BODY_SLOTS],
    pub items: Vec<PackedItem>,
    /// One byte per backpack cell: `0` empty, `n` anchor of item `n - 1`,
    /// `-n` covered by item `n - 1`.
    pub grid: Vec<i8>,
    pub belt: [Option<PackedItem>; GameConfig::BELT_SLOTS],
    pub count: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedPlayer {
    pub class: PlayerClass,
    pub base: Attributes,
    pub position: TilePosition,
    pub readied_spell: Option<ReadiedSpell>,
    pub inventory: PackedInventory,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UnpackError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// The grid does not describe the stored item list.
    #[error("Corrupted grid at cell {cell}: {reason}")]
    CorruptedGrid { cell: usize, reason: &'static str },

    #[error("Item count {count} does not match {stored} stored items")]
    CountMismatch { count: u8, stored: usize },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for UnpackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(e) => e.severity(),
            Self::CorruptedGrid { .. } | Self::CountMismatch { .. } | Self::Invariant(_) => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(e) => e.error_code(),
            Self::CorruptedGrid { .. } => "UNPACK_CORRUPTED_GRID",
            Self::CountMismatch { .. } => "UNPACK_COUNT_MISMATCH",
            Self::Invariant(_) => "UNPACK_INVARIANT",
        }
    }
}

fn pack_slot(item: Option<&Item>) -> Option<PackedItem> {
    item.map(ItemSync::from_item)
}

fn unpack_slots<const N: usize>(
    env: &InventoryEnv<'_>,
    slots: &[Option<PackedItem>; N],
) -> Result<[Option<Item>; N], OracleError> {
    let mut items: [Option<Item>; N] = std::array::from_fn(|_| None);
    for (slot, packed) in items.iter_mut().zip(slots) {
        if let Some(packed) = packed {
            *slot = Some(reconstruct(env, packed)?);
        }
    }
    Ok(items)
}

impl PlayerInventory {
    /// Packs body, backpack and belt. The cursor item is not saved.
    pub fn pack(&self) -> PackedInventory {
        PackedInventory {
            body: std::array::from_fn(|index| pack_slot(self.body(BodyLocation::ALL[index]))),
            items: self.items().iter().map(ItemSync::from_item).collect(),
            grid: self.grid().iter().map(|cell| cell.to_legacy()).collect(),
            belt: std::array::from_fn(|index| pack_slot(self.belt_item(index))),
            count: self.item_count() as u8,
        }
    }

    /// Rebuilds an inventory from a packed record.
    ///
    /// Stat flags are left unset; [`PlayerState::unpack`] refreshes them
    /// against the owner.
    pub fn unpack(env: &InventoryEnv<'_>, packed: &PackedInventory) -> Result<Self, UnpackError> {
        let stored = packed.items.len();
        if usize::from(packed.count) != stored || stored > GameConfig::GRID_CELLS {
            return Err(UnpackError::CountMismatch {
                count: packed.count,
                stored,
            });
        }
        if packed.grid.len() != GameConfig::GRID_CELLS {
            return Err(UnpackError::CorruptedGrid {
                cell: packed.grid.len().min(GameConfig::GRID_CELLS),
                reason: "wrong grid length",
            });
        }

        let mut grid = [GridCell::Empty; GameConfig::GRID_CELLS];
        for (cell, (&value, slot)) in packed.grid.iter().zip(grid.iter_mut()).enumerate() {
            let decoded = GridCell::from_legacy(value);
            if decoded.item_index().is_some_and(|index| index >= stored) {
                return Err(UnpackError::CorruptedGrid {
                    cell,
                    reason: "cell references a missing item",
                });
            }
            *slot = decoded;
        }

        let items = packed
            .items
            .iter()
            .map(|item| reconstruct(env, item))
            .collect::<Result<Vec<_>, _>>()?;
        let body = unpack_slots(env, &packed.body)?;
        let belt = unpack_slots(env, &packed.belt)?;

        let inventory = Self::from_parts(body, grid, items, belt);
        inventory.validate(env.config)?;
        Ok(inventory)
    }

    /// SHA-256 of the packed inventory, for comparing two copies.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], DigestError> {
        digest_of(&self.pack())
    }
}

impl PlayerState {
    pub fn pack(&self) -> PackedPlayer {
        PackedPlayer {
            class: self.class,
            base: self.base,
            position: self.position,
            readied_spell: self.readied_spell,
            inventory: self.inventory.pack(),
        }
    }

    /// Restores a player from a save record and recomputes every derived value.
    pub fn unpack(
        env: &InventoryEnv<'_>,
        id: PlayerId,
        packed: &PackedPlayer,
    ) -> Result<Self, UnpackError> {
        let mut player = Self::new(id, packed.class, packed.base);
        player.position = packed.position;
        player.inventory = PlayerInventory::unpack(env, &packed.inventory)?;
        player.readied_spell = packed.readied_spell;
        player.recalculate();
        Ok(player)
    }

    /// SHA-256 over the body slots only.
    ///
    /// Peers replicate equipment but not backpacks, so this is what a remote
    /// mirror can be compared on.
    #[cfg(feature = "serde")]
    pub fn equipment_digest(&self) -> Result<[u8; 32], DigestError> {
        let body: Vec<Option<PackedItem>> = BodyLocation::ALL
            .iter()
            .map(|&location| pack_slot(self.inventory.body(location)))
            .collect();
        digest_of(&body)
    }
}

/// A state snapshot could not be encoded for hashing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("state could not be encoded for hashing: {0}")]
pub struct DigestError(pub String);

impl GameError for DigestError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "DIGEST_ENCODE_FAILED"
    }
}

#[cfg(feature = "serde")]
fn digest_of<T: serde::Serialize>(value: &T) -> Result<[u8; 32], DigestError> {
    use sha2::{Digest, Sha256};

    let bytes = bincode::serialize(value).map_err(|e| DigestError(e.to_string()))?;
    Ok(Sha256::digest(&bytes).into())
}
