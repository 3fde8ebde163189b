//! State management errors.
//!
//! Errors related to player bookkeeping and the structural invariants of an
//! inventory.

use super::PlayerId;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised by [`PlayerRegistry`](super::PlayerRegistry) lookups.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegistryError {
    /// No player occupies this id.
    #[error("Player {0:?} is not present")]
    UnknownPlayer(PlayerId),

    /// The id is past the player table.
    #[error("Player id {0:?} is out of range")]
    OutOfRange(PlayerId),
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownPlayer(_) => ErrorSeverity::Validation,
            Self::OutOfRange(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownPlayer(_) => "REGISTRY_UNKNOWN_PLAYER",
            Self::OutOfRange(_) => "REGISTRY_OUT_OF_RANGE",
        }
    }
}

/// A structural invariant of [`PlayerInventory`](super::PlayerInventory) does not hold.
///
/// Operations never produce these; they surface when validating unpacked or
/// externally built state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    #[error("Grid cell {cell} refers to missing item {index}")]
    DanglingCell { cell: u8, index: u8 },

    #[error("Item {index} has {anchors} anchor cells")]
    AnchorCount { index: u8, anchors: u8 },

    #[error("Grid cells of item {index} do not match its footprint")]
    FootprintMismatch { index: u8 },

    #[error("Two-handed weapon equipped alongside an off-hand item")]
    TwoHandedConflict,

    #[error("Gold stack of {value} exceeds the limit of {max}")]
    GoldOverCap { value: u32, max: u32 },

    #[error("Cached gold {cached} differs from stored gold {actual}")]
    GoldMismatch { cached: u32, actual: u32 },

    #[error("Belt slot {slot} holds an item larger than one cell")]
    BeltItemTooLarge { slot: u8 },
}

impl GameError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // A stale cache is repaired by the next recalculation.
            Self::GoldMismatch { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use InvariantViolation::*;
        match self {
            DanglingCell { .. } => "STATE_DANGLING_CELL",
            AnchorCount { .. } => "STATE_ANCHOR_COUNT",
            FootprintMismatch { .. } => "STATE_FOOTPRINT_MISMATCH",
            TwoHandedConflict => "STATE_TWO_HANDED_CONFLICT",
            GoldOverCap { .. } => "STATE_GOLD_OVER_CAP",
            GoldMismatch { .. } => "STATE_GOLD_MISMATCH",
            BeltItemTooLarge { .. } => "STATE_BELT_ITEM_TOO_LARGE",
        }
    }
}
