//! Using consumables, scrolls and staff charges.
//!
//! These only decide which item is spent. Applying the item's effect (healing,
//! casting) is the caller's job.

use crate::audio::{SoundEffect, SpeechCue};
use crate::cursor::SlotId;
use crate::engine::Effects;
use crate::error::{ErrorSeverity, GameError};
use crate::item::{Item, MiscKind, SpellId};
use crate::state::{BodyLocation, PlayerClass, PlayerState, RegistryError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UseError {
    #[error("Cursor already holds an item")]
    CursorOccupied,

    /// Only backpack and belt items can be used in place.
    #[error("Items cannot be used from that slot")]
    InvalidSlot,

    #[error("Slot is empty")]
    EmptySlot,

    #[error("Item is not usable")]
    NotUsable,

    #[error("Item requirements are not met")]
    RequirementsNotMet,

    /// Gold is split with [`split_gold`](crate::gold::split_gold) instead.
    #[error("Gold cannot be used")]
    GoldStack,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl UseError {
    /// Speech the player should hear for this failure, if any.
    pub fn feedback(&self, class: PlayerClass) -> Option<SoundEffect> {
        matches!(self, Self::RequirementsNotMet)
            .then(|| SoundEffect::speech(class, SpeechCue::RequirementsNotMet))
    }
}

impl GameError for UseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Registry(e) => e.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use UseError::*;
        match self {
            Registry(e) => e.error_code(),
            CursorOccupied => "USE_CURSOR_OCCUPIED",
            InvalidSlot => "USE_INVALID_SLOT",
            EmptySlot => "USE_EMPTY_SLOT",
            NotUsable => "USE_NOT_USABLE",
            RequirementsNotMet => "USE_REQUIREMENTS_NOT_MET",
            GoldStack => "USE_GOLD_STACK",
        }
    }
}

/// An item that was used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsedItem {
    pub item: Item,
    /// `false` for items that stay in place after use, such as quest notes.
    pub consumed: bool,
}

/// Whether an item survives being used from the given container.
fn kept_after_use(item: &Item, from_belt: bool) -> bool {
    match item.misc {
        MiscKind::Note => true,
        MiscKind::MapOfDoom => !from_belt,
        _ => false,
    }
}

/// Uses the item in a backpack or belt slot.
pub(crate) fn use_item(
    player: &mut PlayerState,
    slot: SlotId,
    effects: &mut Effects,
) -> Result<UsedItem, UseError> {
    if player.inventory.is_holding() {
        return Err(UseError::CursorOccupied);
    }

    let (item, from_belt, index) = match slot {
        SlotId::Grid(cell) => {
            let (index, item) = player.inventory.item_at(cell).ok_or(UseError::EmptySlot)?;
            (item, false, index)
        }
        SlotId::Belt(index) => {
            let item = player.inventory.belt_item(index).ok_or(UseError::EmptySlot)?;
            (item, true, index)
        }
        SlotId::Body(_) => return Err(UseError::InvalidSlot),
    };

    if !item.usable {
        return Err(UseError::NotUsable);
    }
    if !item.stat_flag {
        return Err(UseError::RequirementsNotMet);
    }
    if item.is_gold() {
        return Err(UseError::GoldStack);
    }

    effects.flip(item);
    if kept_after_use(item, from_belt) {
        return Ok(UsedItem {
            item: item.clone(),
            consumed: false,
        });
    }

    let removed = if from_belt {
        player.inventory.remove_belt_item(index)
    } else {
        player.inventory.remove_item(index)
    };
    let Some(item) = removed else {
        return Err(UseError::EmptySlot);
    };
    player.recalculate();
    Ok(UsedItem {
        item,
        consumed: true,
    })
}

/// Removes the first scroll of `spell`, searching the backpack before the belt.
pub fn remove_scroll(player: &mut PlayerState, spell: SpellId) -> Option<Item> {
    let matches = |item: &Item| item.misc.is_scroll() && item.spell == Some(spell);

    let removed = if let Some(index) = player.inventory.items().iter().position(matches) {
        player.inventory.remove_item(index)
    } else {
        let slot = player
            .inventory
            .belt()
            .iter()
            .position(|item| item.as_ref().is_some_and(matches))?;
        player.inventory.remove_belt_item(slot)
    };
    player.recalculate();
    removed
}

/// Spends one charge of the left-hand staff if it casts `spell`.
pub fn use_staff_charge(player: &mut PlayerState, spell: SpellId) -> bool {
    let Some(staff) = player.inventory.body_mut(BodyLocation::HandLeft) else {
        return false;
    };
    if !matches!(staff.misc, MiscKind::Staff | MiscKind::Unique)
        || staff.spell != Some(spell)
        || staff.charges.current == 0
    {
        return false;
    }
    staff.charges.current -= 1;
    player.recalculate();
    true
}
