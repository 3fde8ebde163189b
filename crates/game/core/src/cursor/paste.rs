//! Dropping the held item into a slot.
//!
//! A paste is resolved into a [`PasteTarget`] first. Only a fully validated
//! target is committed, so a rejected paste never touches the player.

use super::error::TransferError;
use super::layout::{SlotId, paste_origin};
use crate::config::GameConfig;
use crate::engine::Effects;
use crate::gold::merge_into;
use crate::item::{EquipClass, Item, ItemClass};
use crate::placement::{PlaceMode, auto_place_in_inventory};
use crate::state::{
    BodyLocation, ClassCapabilities, GridCell, GridSlot, PlayerState, footprint_cells,
};

/// Validated destination of a paste.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PasteTarget {
    /// A non-hand body slot; swaps with whatever is there.
    Body(BodyLocation),
    /// One hand, resolved against the other hand on commit.
    OneHand(BodyLocation),
    /// Both hands. `displaced` must move to the backpack first.
    TwoHand { displaced: Option<BodyLocation> },
    /// Backpack cells starting at `origin`, replacing at most one item.
    Grid {
        origin: GridSlot,
        replaces: Option<usize>,
    },
    /// Held gold dropped on a gold stack.
    GoldMerge { index: usize },
    Belt(usize),
}

/// Validates a paste of the held item onto `slot`.
fn resolve(
    config: &GameConfig,
    player: &PlayerState,
    held: &Item,
    slot: SlotId,
) -> Result<PasteTarget, TransferError> {
    let inventory = &player.inventory;

    let target = match slot {
        SlotId::Body(location) if location.is_hand() => {
            if held.location == EquipClass::OneHand {
                PasteTarget::OneHand(location)
            } else if held.location == EquipClass::TwoHand {
                if player.grips_one_handed(held) {
                    PasteTarget::OneHand(location)
                } else {
                    PasteTarget::TwoHand { displaced: None }
                }
            } else {
                return Err(TransferError::IncompatibleSlot);
            }
        }
        SlotId::Body(location) => {
            if held.location != location.equip_class() {
                return Err(TransferError::IncompatibleSlot);
            }
            PasteTarget::Body(location)
        }
        SlotId::Belt(index) => {
            let accepted = matches!(held.location, EquipClass::Unequipable | EquipClass::Belt)
                && held.inventory_size().is_single_cell()
                && held.usable
                && held.stat_flag
                && (!held.is_gold() || config.belt_accepts_gold);
            if !accepted || index >= GameConfig::BELT_SLOTS {
                return Err(TransferError::IncompatibleSlot);
            }
            PasteTarget::Belt(index)
        }
        SlotId::Grid(cell) if held.is_gold() => match inventory.cell(cell) {
            GridCell::Empty => PasteTarget::Grid {
                origin: cell,
                replaces: None,
            },
            GridCell::Anchor(index) if inventory.item(index as usize).is_some_and(Item::is_gold) => {
                PasteTarget::GoldMerge {
                    index: index as usize,
                }
            }
            GridCell::Anchor(index) | GridCell::Covered(index) => PasteTarget::Grid {
                origin: cell,
                replaces: Some(index as usize),
            },
        },
        SlotId::Grid(cell) => {
            let footprint = held.inventory_size();
            let origin = paste_origin(cell, footprint).ok_or(TransferError::OutOfBounds)?;
            let cells = footprint_cells(origin, footprint).ok_or(TransferError::OutOfBounds)?;
            let mut replaces = None;
            for (covered, _) in cells {
                if let Some(index) = inventory.cell(covered).item_index() {
                    match replaces {
                        None => replaces = Some(index),
                        Some(existing) if existing != index => return Err(TransferError::Overlap),
                        Some(_) => {}
                    }
                }
            }
            PasteTarget::Grid { origin, replaces }
        }
    };

    let equipping = matches!(
        target,
        PasteTarget::Body(_) | PasteTarget::OneHand(_) | PasteTarget::TwoHand { .. }
    );
    if equipping && !held.stat_flag {
        return Err(TransferError::RequirementsNotMet);
    }

    if let PasteTarget::TwoHand { .. } = target {
        let left = inventory.body(BodyLocation::HandLeft);
        let right = inventory.body(BodyLocation::HandRight);
        if let (Some(_), Some(right)) = (left, right) {
            let displaced = if right.is_shield() {
                BodyLocation::HandRight
            } else {
                BodyLocation::HandLeft
            };
            let Some(item) = inventory.body(displaced) else {
                return Err(TransferError::NoRoomForDisplaced);
            };
            let mut probe = inventory.clone();
            if auto_place_in_inventory(&mut probe, item, PlaceMode::Probe).is_none() {
                return Err(TransferError::NoRoomForDisplaced);
            }
            return Ok(PasteTarget::TwoHand {
                displaced: Some(displaced),
            });
        }
    }

    Ok(target)
}

/// Swaps the held item with the contents of a body slot.
fn swap_with_body(player: &mut PlayerState, location: BodyLocation) {
    let held = player.inventory.take_held();
    let previous = player.inventory.set_body(location, held);
    player.inventory.set_held(previous);
}

/// Whether `other` keeps the held item out of the hand next to it.
fn blocks(player: &PlayerState, held: &Item, other: BodyLocation) -> bool {
    let Some(other) = player.inventory.body(other) else {
        return false;
    };
    let both_weapons = other.class == ItemClass::Weapon && held.class == ItemClass::Weapon;
    other.class == held.class && !(player.has(ClassCapabilities::DUAL_WIELD) && both_weapons)
}

fn paste_one_hand(player: &mut PlayerState, held: &Item, target: BodyLocation, effects: &mut Effects) {
    use BodyLocation::{HandLeft, HandRight};

    let changed = if target == HandLeft {
        if blocks(player, held, HandRight) {
            HandRight
        } else {
            HandLeft
        }
    } else if player.inventory.is_body_empty(HandRight) {
        let left = player.inventory.body(HandLeft);
        let left_frees_right = left.is_none_or(|left| player.grips_one_handed(left));
        if !left_frees_right {
            // The two-hander in the left hand comes off and the held item
            // takes the right hand.
            effects.send(crate::net::NetCommand::DeleteItem { location: HandLeft });
            let two_hander = player.inventory.take_body(HandLeft);
            player.inventory.set_body(HandRight, two_hander);
            swap_with_body(player, HandRight);
            effects.body_changed(player, HandRight);
            return;
        }
        if blocks(player, held, HandLeft) {
            HandLeft
        } else {
            HandRight
        }
    } else if blocks(player, held, HandLeft) {
        HandLeft
    } else {
        HandRight
    };

    swap_with_body(player, changed);
    effects.body_changed(player, changed);
}

fn paste_two_hand(
    player: &mut PlayerState,
    displaced: Option<BodyLocation>,
    effects: &mut Effects,
) {
    use BodyLocation::{HandLeft, HandRight};

    effects.send(crate::net::NetCommand::DeleteItem {
        location: HandRight,
    });
    if let Some(location) = displaced
        && let Some(item) = player.inventory.take_body(location)
    {
        let placed = auto_place_in_inventory(&mut player.inventory, &item, PlaceMode::Commit);
        debug_assert!(placed.is_some(), "probe found room for the displaced item");
    }

    if player.inventory.is_body_empty(HandLeft) {
        let right = player.inventory.take_body(HandRight);
        player.inventory.set_body(HandLeft, right);
    }
    swap_with_body(player, HandLeft);
    effects.body_changed(player, HandLeft);
    player.ready_staff_spell();
}

fn paste_grid(player: &mut PlayerState, origin: GridSlot, replaces: Option<usize>) {
    let inventory = &mut player.inventory;
    let Some(held) = inventory.take_held() else {
        return;
    };
    let footprint = held.inventory_size();
    match replaces {
        None => {
            inventory.insert_item(origin, held);
        }
        Some(index) => {
            let previous = inventory.replace_item(index, held);
            inventory.clear_cells(index);
            inventory.stamp(origin, footprint.width, footprint.height, index);
            inventory.set_held(Some(previous));
        }
    }
}

fn paste_belt(config: &GameConfig, player: &mut PlayerState, index: usize) {
    let inventory = &mut player.inventory;
    let merge = inventory.held().is_some_and(Item::is_gold)
        && inventory.belt_item(index).is_some_and(Item::is_gold);
    if merge {
        merge_held_into(config, player, |player| player.inventory.belt_item_mut(index));
        return;
    }
    let held = inventory.take_held();
    let previous = inventory.set_belt(index, held);
    inventory.set_held(previous);
}

/// Adds held gold to a stack, leaving any overflow on the cursor.
fn merge_held_into(
    config: &GameConfig,
    player: &mut PlayerState,
    stack: impl FnOnce(&mut PlayerState) -> Option<&mut Item>,
) {
    let Some(mut held) = player.inventory.take_held() else {
        return;
    };
    let Some(stack) = stack(player) else {
        player.inventory.set_held(Some(held));
        return;
    };
    let overflow = merge_into(stack, held.value, config.max_gold);
    if overflow > 0 {
        held.value = overflow;
        held.refresh_gold_graphic();
        player.inventory.set_held(Some(held));
    }
}

/// Drops the held item onto `slot`.
pub(crate) fn paste(
    config: &GameConfig,
    player: &mut PlayerState,
    slot: SlotId,
    effects: &mut Effects,
) -> Result<(), TransferError> {
    let held = player.inventory.held().ok_or(TransferError::CursorEmpty)?;
    let target = resolve(config, player, held, slot)?;
    let held = held.clone();

    effects.flip(&held);
    match target {
        PasteTarget::Body(location) => {
            swap_with_body(player, location);
            effects.body_changed(player, location);
        }
        PasteTarget::OneHand(location) => paste_one_hand(player, &held, location, effects),
        PasteTarget::TwoHand { displaced } => paste_two_hand(player, displaced, effects),
        PasteTarget::Grid { origin, replaces } => paste_grid(player, origin, replaces),
        PasteTarget::GoldMerge { index } => {
            merge_held_into(config, player, |player| player.inventory.item_mut(index));
        }
        PasteTarget::Belt(index) => paste_belt(config, player, index),
    }

    player.recalculate();
    Ok(())
}
