//! Automatic placement into the backpack grid and the belt.
//!
//! Every search runs in a fixed candidate order per footprint. The orders are
//! part of the observable behaviour: peers replay the same searches and must
//! land items in the same cells.

use crate::config::GameConfig;
use crate::item::{Footprint, Item};
use crate::state::{GridSlot, PlayerInventory, footprint_cells};

/// Whether a placement only checks for room or also stores the item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceMode {
    Probe,
    Commit,
}

/// Preferred top-left cells for 2x2 items, pairing columns across rows 0 and 2.
const PREFERRED_2X2: [usize; 10] = [8, 28, 6, 26, 4, 24, 2, 22, 0, 20];

/// Only single-cell items fit the belt.
pub fn fits_in_belt_slot(item: &Item) -> bool {
    item.inventory_size().is_single_cell()
}

/// Belt items are single-cell usable consumables the owner can use.
pub fn can_be_placed_on_belt(item: &Item) -> bool {
    fits_in_belt_slot(item) && item.usable && item.stat_flag && !item.is_gold()
}

/// Candidate top-left cells tried for a footprint, in order.
///
/// Footprints without a defined order have no candidates and never auto-place.
pub fn scan_order(footprint: Footprint) -> Vec<usize> {
    match (footprint.width, footprint.height) {
        (1, 1) => (30..=39).chain(20..=29).chain(10..=19).chain(0..=9).collect(),
        (1, 2) => (20..=29)
            .rev()
            .chain((0..=9).rev())
            .chain((10..=19).rev())
            .collect(),
        (1, 3) => (0..20).collect(),
        (2, 2) => PREFERRED_2X2
            .into_iter()
            .chain((21..29).step_by(2))
            .chain((1..9).step_by(2))
            .chain(10..19)
            .collect(),
        (2, 3) => (0..9).chain(10..19).collect(),
        _ => Vec::new(),
    }
}

/// True when the footprint starting at `slot` is inside the grid and free.
pub fn fits_at(inventory: &PlayerInventory, slot: GridSlot, footprint: Footprint) -> bool {
    footprint_cells(slot, footprint)
        .is_some_and(|mut cells| cells.all(|(cell, _)| inventory.cell(cell).is_empty()))
}

/// Tries to put `item` with its top-left cell at `slot`.
pub fn auto_place_in_inventory_slot(
    inventory: &mut PlayerInventory,
    slot: GridSlot,
    item: &Item,
    mode: PlaceMode,
) -> bool {
    if inventory.item_count() >= GameConfig::GRID_CELLS
        || !fits_at(inventory, slot, item.inventory_size())
    {
        return false;
    }
    if mode == PlaceMode::Commit {
        inventory.insert_item(slot, item.clone());
        inventory.refresh_scroll_cache();
    }
    true
}

/// Finds the first candidate cell with room for `item`.
///
/// Returns the chosen top-left cell, or `None` when the backpack has no room.
pub fn auto_place_in_inventory(
    inventory: &mut PlayerInventory,
    item: &Item,
    mode: PlaceMode,
) -> Option<GridSlot> {
    scan_order(item.inventory_size())
        .into_iter()
        .filter_map(GridSlot::new)
        .find(|&slot| auto_place_in_inventory_slot(inventory, slot, item, mode))
}

/// Puts a belt-eligible item in the first free belt slot.
pub fn auto_place_in_belt(
    inventory: &mut PlayerInventory,
    item: &Item,
    mode: PlaceMode,
) -> Option<usize> {
    if !can_be_placed_on_belt(item) {
        return None;
    }
    let slot = inventory.belt().iter().position(Option::is_none)?;
    if mode == PlaceMode::Commit {
        inventory.set_belt(slot, Some(item.clone()));
    }
    Some(slot)
}
