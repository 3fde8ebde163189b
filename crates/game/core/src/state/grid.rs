//! Backpack grid cells.
//!
//! Each cell records which backpack item covers it. Exactly one cell of every
//! item is its anchor: the bottom-left cell of the footprint. Save files keep
//! the legacy encoding (`0` empty, `+n` anchor, `-n` covered, with `n` the
//! 1-based list index) and convert at the boundary.

use crate::config::GameConfig;
use crate::item::Footprint;

/// Index of a cell in the backpack grid, row-major with ten columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSlot(u8);

impl GridSlot {
    pub const fn new(index: usize) -> Option<Self> {
        if index < GameConfig::GRID_CELLS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub const fn from_row_column(row: usize, column: usize) -> Option<Self> {
        if row < GameConfig::GRID_ROWS && column < GameConfig::GRID_COLUMNS {
            Some(Self((row * GameConfig::GRID_COLUMNS + column) as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn row(self) -> usize {
        self.index() / GameConfig::GRID_COLUMNS
    }

    pub const fn column(self) -> usize {
        self.index() % GameConfig::GRID_COLUMNS
    }
}

/// What occupies one backpack cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GridCell {
    #[default]
    Empty,
    /// Anchor cell of the item at this list index.
    Anchor(u8),
    /// Non-anchor cell covered by the item at this list index.
    Covered(u8),
}

impl GridCell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// List index of the covering item, if any.
    pub const fn item_index(self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Anchor(index) | Self::Covered(index) => Some(index as usize),
        }
    }

    pub const fn to_legacy(self) -> i8 {
        match self {
            Self::Empty => 0,
            Self::Anchor(index) => index as i8 + 1,
            Self::Covered(index) => -(index as i8 + 1),
        }
    }

    pub const fn from_legacy(value: i8) -> Self {
        if value > 0 {
            Self::Anchor((value - 1) as u8)
        } else if value < 0 {
            Self::Covered((-(value as i16) - 1) as u8)
        } else {
            Self::Empty
        }
    }
}

/// Cells covered by a footprint whose top-left cell is `top_left`.
///
/// Returns `None` when the footprint runs past the right or bottom edge.
/// Cells come in row-major order.
pub fn footprint_cells(
    top_left: GridSlot,
    footprint: Footprint,
) -> Option<impl Iterator<Item = (GridSlot, bool)>> {
    let (row, column) = (top_left.row(), top_left.column());
    let (width, height) = (footprint.width as usize, footprint.height as usize);
    if width == 0
        || height == 0
        || row + height > GameConfig::GRID_ROWS
        || column + width > GameConfig::GRID_COLUMNS
    {
        return None;
    }

    Some((0..height).flat_map(move |j| {
        (0..width).map(move |i| {
            let slot = GridSlot((top_left.index() + j * GameConfig::GRID_COLUMNS + i) as u8);
            (slot, i == 0 && j == height - 1)
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_encoding_is_one_based_and_signed() {
        assert_eq!(GridCell::Empty.to_legacy(), 0);
        assert_eq!(GridCell::Anchor(0).to_legacy(), 1);
        assert_eq!(GridCell::Covered(4).to_legacy(), -5);
        for value in -40i8..=40 {
            assert_eq!(GridCell::from_legacy(value).to_legacy(), value);
        }
    }

    #[test]
    fn footprint_anchor_is_bottom_left() {
        let top_left = GridSlot::new(12).unwrap();
        let cells: Vec<_> = footprint_cells(top_left, Footprint::new(2, 3))
            .unwrap()
            .collect();
        let slots: Vec<usize> = cells.iter().map(|(slot, _)| slot.index()).collect();
        assert_eq!(slots, vec![12, 13, 22, 23, 32, 33]);

        let anchors: Vec<usize> = cells
            .iter()
            .filter(|(_, anchor)| *anchor)
            .map(|(slot, _)| slot.index())
            .collect();
        assert_eq!(anchors, vec![32]);
    }

    #[test]
    fn footprint_rejects_overhang() {
        assert!(footprint_cells(GridSlot::new(9).unwrap(), Footprint::new(2, 1)).is_none());
        assert!(footprint_cells(GridSlot::new(20).unwrap(), Footprint::new(1, 3)).is_none());
        assert!(footprint_cells(GridSlot::new(18).unwrap(), Footprint::new(2, 2)).is_some());
    }
}
