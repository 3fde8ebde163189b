//! Per-player item storage.
//!
//! A [`PlayerInventory`] owns five collections: body slots, the backpack grid
//! with its dense item list, the belt, and the cursor item. Items are moved
//! between them by value; nothing is ever stored in two places at once.

use arrayvec::ArrayVec;

use super::body::BodyLocation;
use super::error::InvariantViolation;
use super::grid::{GridCell, GridSlot, footprint_cells};
use crate::config::GameConfig;
use crate::item::{Item, SpellId};

/// Small set of spell ids, used for the scroll and staff caches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellSet(u64);

impl SpellSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, spell: SpellId) {
        debug_assert!(spell.0 < 64, "spell id {} out of range", spell.0);
        if spell.0 < 64 {
            self.0 |= 1 << spell.0;
        }
    }

    pub const fn contains(&self, spell: SpellId) -> bool {
        spell.0 < 64 && self.0 & (1 << spell.0) != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

type ItemList = ArrayVec<Item, { GameConfig::GRID_CELLS }>;

/// Inventory of a single player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerInventory {
    body: [Option<Item>; GameConfig::BODY_SLOTS],
    grid: [GridCell; GameConfig::GRID_CELLS],
    items: ItemList,
    belt: [Option<Item>; GameConfig::BELT_SLOTS],
    held: Option<Item>,
    gold: u32,
    scroll_spells: SpellSet,
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self {
            body: Default::default(),
            grid: [GridCell::Empty; GameConfig::GRID_CELLS],
            items: ArrayVec::new(),
            belt: Default::default(),
            held: None,
            gold: 0,
            scroll_spells: SpellSet::empty(),
        }
    }
}

impl PlayerInventory {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== body =====

    pub fn body(&self, location: BodyLocation) -> Option<&Item> {
        self.body[location.index()].as_ref()
    }

    pub fn body_mut(&mut self, location: BodyLocation) -> Option<&mut Item> {
        self.body[location.index()].as_mut()
    }

    pub fn is_body_empty(&self, location: BodyLocation) -> bool {
        self.body[location.index()].is_none()
    }

    /// Puts `item` in a body slot, returning what was there.
    pub fn set_body(&mut self, location: BodyLocation, item: Option<Item>) -> Option<Item> {
        core::mem::replace(&mut self.body[location.index()], item)
    }

    pub fn take_body(&mut self, location: BodyLocation) -> Option<Item> {
        self.body[location.index()].take()
    }

    pub(crate) fn swap_hands(&mut self) {
        self.body.swap(
            BodyLocation::HandLeft.index(),
            BodyLocation::HandRight.index(),
        );
    }

    pub fn body_items(&self) -> impl Iterator<Item = (BodyLocation, &Item)> {
        BodyLocation::ALL
            .into_iter()
            .filter_map(|location| self.body(location).map(|item| (location, item)))
    }

    // ===== backpack =====

    pub fn grid(&self) -> &[GridCell; GameConfig::GRID_CELLS] {
        &self.grid
    }

    pub fn cell(&self, slot: GridSlot) -> GridCell {
        self.grid[slot.index()]
    }

    /// Backpack items in list order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    /// Number of items in the backpack.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// List index and item covering a grid cell.
    pub fn item_at(&self, slot: GridSlot) -> Option<(usize, &Item)> {
        let index = self.cell(slot).item_index()?;
        self.items.get(index).map(|item| (index, item))
    }

    /// Appends `item` to the list and stamps its footprint starting at `top_left`.
    ///
    /// The caller has already checked that every covered cell is free.
    pub(crate) fn insert_item(&mut self, top_left: GridSlot, item: Item) -> usize {
        let index = self.items.len();
        let footprint = item.footprint;
        self.items.push(item);
        self.stamp(top_left, footprint.width, footprint.height, index);
        index
    }

    /// Writes anchor and covered markers for the item at `index`.
    pub(crate) fn stamp(&mut self, top_left: GridSlot, width: u8, height: u8, index: usize) {
        let footprint = crate::item::Footprint::new(width, height);
        let Some(cells) = footprint_cells(top_left, footprint) else {
            debug_assert!(false, "footprint out of bounds at {top_left:?}");
            return;
        };
        for (slot, anchor) in cells {
            self.grid[slot.index()] = if anchor {
                GridCell::Anchor(index as u8)
            } else {
                GridCell::Covered(index as u8)
            };
        }
    }

    /// Places a one-cell item directly in `slot` as a new list entry.
    pub(crate) fn insert_single(&mut self, slot: GridSlot, item: Item) -> usize {
        debug_assert!(self.cell(slot).is_empty());
        let index = self.items.len();
        self.items.push(item);
        self.grid[slot.index()] = GridCell::Anchor(index as u8);
        index
    }

    /// Empties every cell referring to `index`.
    pub(crate) fn clear_cells(&mut self, index: usize) {
        for cell in self.grid.iter_mut() {
            if cell.item_index() == Some(index) {
                *cell = GridCell::Empty;
            }
        }
    }

    /// Swaps the list entry at `index` with `item`, keeping the grid as is.
    pub(crate) fn replace_item(&mut self, index: usize, item: Item) -> Item {
        core::mem::replace(&mut self.items[index], item)
    }

    /// Removes a backpack item and keeps the list dense.
    ///
    /// The last item moves into the hole and every cell that referred to it is
    /// rewritten to its new index.
    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        if index >= self.items.len() {
            return None;
        }

        self.clear_cells(index);
        let last = self.items.len() - 1;
        let removed = self.items.swap_remove(index);

        if index != last {
            for cell in self.grid.iter_mut() {
                *cell = match *cell {
                    GridCell::Anchor(i) if i as usize == last => GridCell::Anchor(index as u8),
                    GridCell::Covered(i) if i as usize == last => GridCell::Covered(index as u8),
                    other => other,
                };
            }
        }

        self.refresh_scroll_cache();
        Some(removed)
    }

    // ===== belt =====

    pub fn belt(&self) -> &[Option<Item>; GameConfig::BELT_SLOTS] {
        &self.belt
    }

    pub fn belt_item(&self, slot: usize) -> Option<&Item> {
        self.belt.get(slot).and_then(Option::as_ref)
    }

    pub fn belt_item_mut(&mut self, slot: usize) -> Option<&mut Item> {
        self.belt.get_mut(slot).and_then(Option::as_mut)
    }

    /// Puts `item` in a belt slot, returning what was there.
    pub fn set_belt(&mut self, slot: usize, item: Option<Item>) -> Option<Item> {
        let previous = core::mem::replace(&mut self.belt[slot], item);
        self.refresh_scroll_cache();
        previous
    }

    pub fn remove_belt_item(&mut self, slot: usize) -> Option<Item> {
        let removed = self.belt.get_mut(slot)?.take();
        self.refresh_scroll_cache();
        removed
    }

    // ===== cursor =====

    pub fn held(&self) -> Option<&Item> {
        self.held.as_ref()
    }

    pub fn held_mut(&mut self) -> Option<&mut Item> {
        self.held.as_mut()
    }

    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    pub fn set_held(&mut self, item: Option<Item>) -> Option<Item> {
        core::mem::replace(&mut self.held, item)
    }

    pub fn take_held(&mut self) -> Option<Item> {
        self.held.take()
    }

    // ===== derived caches =====

    /// Cached gold total of backpack and belt.
    pub fn gold(&self) -> u32 {
        self.gold
    }

    /// Sums every gold stack in the belt and the backpack.
    pub fn calculate_gold(&self) -> u32 {
        let belt = self.belt.iter().flatten();
        belt.chain(self.items.iter())
            .filter(|item| item.is_gold())
            .map(|item| item.value)
            .sum()
    }

    /// Recomputes the cached gold total.
    pub fn refresh_gold(&mut self) {
        self.gold = self.calculate_gold();
    }

    /// Spells castable from scrolls currently in the backpack or belt.
    pub fn scroll_spells(&self) -> SpellSet {
        self.scroll_spells
    }

    pub fn refresh_scroll_cache(&mut self) {
        let mut spells = SpellSet::empty();
        let belt = self.belt.iter().flatten();
        for item in self.items.iter().chain(belt) {
            if item.misc.is_scroll()
                && item.stat_flag
                && let Some(spell) = item.spell
            {
                spells.insert(spell);
            }
        }
        self.scroll_spells = spells;
    }

    /// Every stored item, cursor included, for stat refreshes.
    pub(crate) fn for_each_item_mut(&mut self, mut f: impl FnMut(&mut Item)) {
        self.body.iter_mut().flatten().for_each(&mut f);
        self.items.iter_mut().for_each(&mut f);
        self.belt.iter_mut().flatten().for_each(&mut f);
        self.held.iter_mut().for_each(&mut f);
    }

    // ===== invariants =====

    /// Checks the structural invariants of the inventory.
    pub fn validate(&self, config: &GameConfig) -> Result<(), InvariantViolation> {
        let count = self.items.len();

        for (cell, value) in self.grid.iter().enumerate() {
            if let Some(index) = value.item_index()
                && index >= count
            {
                return Err(InvariantViolation::DanglingCell {
                    cell: cell as u8,
                    index: index as u8,
                });
            }
        }

        for (index, item) in self.items.iter().enumerate() {
            let anchors: Vec<usize> = self
                .grid
                .iter()
                .enumerate()
                .filter(|(_, cell)| **cell == GridCell::Anchor(index as u8))
                .map(|(slot, _)| slot)
                .collect();
            let [anchor] = anchors[..] else {
                return Err(InvariantViolation::AnchorCount {
                    index: index as u8,
                    anchors: anchors.len() as u8,
                });
            };

            let footprint = item.footprint;
            let anchor = GridSlot::new(anchor).ok_or(InvariantViolation::FootprintMismatch {
                index: index as u8,
            })?;
            let top_row = (anchor.row() + 1).checked_sub(footprint.height as usize);
            let top_left = top_row.and_then(|row| GridSlot::from_row_column(row, anchor.column()));
            let cells = top_left.and_then(|slot| footprint_cells(slot, footprint));
            let Some(cells) = cells else {
                return Err(InvariantViolation::FootprintMismatch { index: index as u8 });
            };

            let mut covered = 0;
            for (slot, _) in cells {
                if self.grid[slot.index()].item_index() != Some(index) {
                    return Err(InvariantViolation::FootprintMismatch { index: index as u8 });
                }
                covered += 1;
            }
            let referencing = self
                .grid
                .iter()
                .filter(|cell| cell.item_index() == Some(index))
                .count();
            if referencing != covered {
                return Err(InvariantViolation::FootprintMismatch { index: index as u8 });
            }
        }

        if let (Some(left), Some(_)) = (
            self.body(BodyLocation::HandLeft),
            self.body(BodyLocation::HandRight),
        ) && left.is_two_handed()
        {
            return Err(InvariantViolation::TwoHandedConflict);
        }

        for (slot, item) in self.belt.iter().enumerate() {
            if let Some(item) = item
                && !item.footprint.is_single_cell()
            {
                return Err(InvariantViolation::BeltItemTooLarge { slot: slot as u8 });
            }
        }

        let stacks = self.belt.iter().flatten().chain(self.items.iter());
        for item in stacks.filter(|item| item.is_gold()) {
            if item.value > config.max_gold {
                return Err(InvariantViolation::GoldOverCap {
                    value: item.value,
                    max: config.max_gold,
                });
            }
        }

        let actual = self.calculate_gold();
        if actual != self.gold {
            return Err(InvariantViolation::GoldMismatch {
                cached: self.gold,
                actual,
            });
        }

        Ok(())
    }

    /// Rebuilds an inventory from unpacked parts without any checks.
    pub(crate) fn from_parts(
        body: [Option<Item>; GameConfig::BODY_SLOTS],
        grid: [GridCell; GameConfig::GRID_CELLS],
        items: Vec<Item>,
        belt: [Option<Item>; GameConfig::BELT_SLOTS],
    ) -> Self {
        let mut inventory = Self {
            body,
            grid,
            items: items.into_iter().take(GameConfig::GRID_CELLS).collect(),
            belt,
            held: None,
            gold: 0,
            scroll_spells: SpellSet::empty(),
        };
        inventory.refresh_gold();
        inventory.refresh_scroll_cache();
        inventory
    }
}
