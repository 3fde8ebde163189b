//! Transfer errors.
//!
//! Every variant is raised before anything is written, so an error always
//! leaves the player exactly as it was.

use crate::audio::{SoundEffect, SpeechCue};
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{PlayerClass, PlayerMode, RegistryError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// The player is attacking, casting or otherwise busy.
    #[error("Player is busy ({mode})")]
    PlayerBusy { mode: PlayerMode },

    #[error("Cursor already holds an item")]
    CursorOccupied,

    #[error("Cursor holds nothing")]
    CursorEmpty,

    /// The pointer is not over any inventory slot.
    #[error("No inventory slot under the pointer")]
    NoSlot,

    #[error("Slot is empty")]
    EmptySlot,

    /// The item does not belong in the slot under the pointer.
    #[error("Item cannot go in that slot")]
    IncompatibleSlot,

    /// The owner does not meet the item's requirements.
    #[error("Item requirements are not met")]
    RequirementsNotMet,

    /// The footprint would cover more than one stored item.
    #[error("Footprint overlaps several items")]
    Overlap,

    /// The footprint would hang past the edge of the backpack.
    #[error("Footprint does not fit inside the backpack")]
    OutOfBounds,

    /// The item displaced by a two-handed weapon has nowhere to go.
    #[error("No room for the displaced item")]
    NoRoomForDisplaced,

    /// Picking up found no room anywhere.
    #[error("Inventory is full")]
    InventoryFull,

    /// An automatic move of a belt or unequipped item found no room.
    #[error("Nowhere to put the item")]
    NowhereToPut,

    /// An automatic equip from the backpack found no compatible slot.
    #[error("Item cannot be equipped")]
    CannotEquip,

    #[error("Item is not gold")]
    NotGold,

    #[error("Cannot take {amount} from a stack of {available}")]
    InvalidAmount { amount: u32, available: u32 },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl TransferError {
    /// Speech the player should hear for this failure, if any.
    pub fn feedback(&self, class: PlayerClass) -> Option<SoundEffect> {
        let cue = match self {
            Self::RequirementsNotMet => SpeechCue::RequirementsNotMet,
            Self::InventoryFull => SpeechCue::InventoryFull,
            Self::NowhereToPut => SpeechCue::NowhereToPut,
            Self::CannotEquip => SpeechCue::CannotEquip,
            _ => return None,
        };
        Some(SoundEffect::speech(class, cue))
    }
}

impl GameError for TransferError {
    fn severity(&self) -> ErrorSeverity {
        use TransferError::*;
        match self {
            PlayerBusy { .. }
            | NoRoomForDisplaced
            | InventoryFull
            | NowhereToPut
            | CannotEquip => ErrorSeverity::Recoverable,

            CursorOccupied
            | CursorEmpty
            | NoSlot
            | EmptySlot
            | IncompatibleSlot
            | RequirementsNotMet
            | Overlap
            | OutOfBounds
            | NotGold
            | InvalidAmount { .. } => ErrorSeverity::Validation,

            Registry(e) => e.severity(),
            Oracle(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use TransferError::*;
        match self {
            PlayerBusy { .. } => "TRANSFER_PLAYER_BUSY",
            CursorOccupied => "TRANSFER_CURSOR_OCCUPIED",
            CursorEmpty => "TRANSFER_CURSOR_EMPTY",
            NoSlot => "TRANSFER_NO_SLOT",
            EmptySlot => "TRANSFER_EMPTY_SLOT",
            IncompatibleSlot => "TRANSFER_INCOMPATIBLE_SLOT",
            RequirementsNotMet => "TRANSFER_REQUIREMENTS_NOT_MET",
            Overlap => "TRANSFER_OVERLAP",
            OutOfBounds => "TRANSFER_OUT_OF_BOUNDS",
            NoRoomForDisplaced => "TRANSFER_NO_ROOM_FOR_DISPLACED",
            InventoryFull => "TRANSFER_INVENTORY_FULL",
            NowhereToPut => "TRANSFER_NOWHERE_TO_PUT",
            CannotEquip => "TRANSFER_CANNOT_EQUIP",
            NotGold => "TRANSFER_NOT_GOLD",
            InvalidAmount { .. } => "TRANSFER_INVALID_AMOUNT",
            Registry(e) => e.error_code(),
            Oracle(e) => e.error_code(),
        }
    }
}
