//! Pointer-to-slot resolution.
//!
//! The character panel has 73 fixed rectangles: 25 for the body slots (larger
//! slots are made of several rectangles), 40 for the backpack and 8 for the
//! belt. Coordinates are the bottom-left corner of each 28x28 cell relative to
//! its panel.

use crate::config::{GameConfig, ScreenLayout};
use crate::item::Footprint;
use crate::state::{BodyLocation, GridSlot};

/// Logical slot a pointer can rest over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotId {
    Body(BodyLocation),
    Grid(GridSlot),
    Belt(usize),
}

const SLOT_COUNT: usize = 73;
const CHEST_LAST: usize = 24;
const GRID_FIRST: usize = 25;
const GRID_LAST: usize = 64;
const BELT_FIRST: usize = 65;

const HALF_CELL: i32 = GameConfig::INV_SLOT_SIZE_PX / 2;

#[rustfmt::skip]
const SLOT_RECTS: [(i32, i32); SLOT_COUNT] = [
    // head
    (132, 31), (160, 31), (132, 59), (160, 59),
    // rings
    (45, 205), (247, 205),
    // amulet
    (204, 59),
    // left hand
    (17, 104), (46, 104), (17, 132), (46, 132), (17, 160), (46, 160),
    // right hand
    (247, 104), (276, 104), (247, 132), (276, 132), (247, 160), (276, 160),
    // chest
    (132, 104), (160, 104), (132, 132), (160, 132), (132, 160), (160, 160),
    // backpack
    (17, 250), (46, 250), (75, 250), (104, 250), (133, 250), (162, 250), (191, 250), (220, 250), (249, 250), (278, 250),
    (17, 279), (46, 279), (75, 279), (104, 279), (133, 279), (162, 279), (191, 279), (220, 279), (249, 279), (278, 279),
    (17, 308), (46, 308), (75, 308), (104, 308), (133, 308), (162, 308), (191, 308), (220, 308), (249, 308), (278, 308),
    (17, 337), (46, 337), (75, 337), (104, 337), (133, 337), (162, 337), (191, 337), (220, 337), (249, 337), (278, 337),
    // belt
    (205, 33), (234, 33), (263, 33), (292, 33), (321, 33), (350, 33), (379, 33), (408, 33),
];

fn slot_for_rect(index: usize) -> Option<SlotId> {
    let slot = match index {
        0..=3 => SlotId::Body(BodyLocation::Head),
        4 => SlotId::Body(BodyLocation::RingLeft),
        5 => SlotId::Body(BodyLocation::RingRight),
        6 => SlotId::Body(BodyLocation::Amulet),
        7..=12 => SlotId::Body(BodyLocation::HandLeft),
        13..=18 => SlotId::Body(BodyLocation::HandRight),
        19..=CHEST_LAST => SlotId::Body(BodyLocation::Chest),
        GRID_FIRST..=GRID_LAST => SlotId::Grid(GridSlot::new(index - GRID_FIRST)?),
        BELT_FIRST..SLOT_COUNT => SlotId::Belt(index - BELT_FIRST),
        _ => return None,
    };
    Some(slot)
}

/// Screen position of a rectangle's bottom-left corner.
fn rect_origin(screen: &ScreenLayout, index: usize) -> (i32, i32) {
    let (x, y) = SLOT_RECTS[index];
    if index >= BELT_FIRST {
        (x + screen.panel_left(), y + screen.panel_top())
    } else {
        (x + screen.right_panel_x(), y)
    }
}

/// Slot under the centre of a held item drawn at (`x`, `y`).
///
/// Even-sized footprints are nudged half a cell so the item's centre cell,
/// not the cell boundary, decides the target.
pub fn slot_at_paste(screen: &ScreenLayout, x: i32, y: i32, footprint: Footprint) -> Option<SlotId> {
    let (width_px, height_px) = footprint.pixels();
    let mut px = x + width_px / 2;
    let mut py = y + height_px / 2;
    let even_width = footprint.width % 2 == 0;
    let even_height = footprint.height % 2 == 0;

    for index in 0..SLOT_COUNT {
        let (left, bottom) = rect_origin(screen, index);
        if (left..left + GameConfig::INV_SLOT_SIZE_PX).contains(&px)
            && (bottom - GameConfig::INV_SLOT_SIZE_PX - 1..bottom).contains(&py)
        {
            return slot_for_rect(index);
        }
        if index == CHEST_LAST {
            if even_width {
                px -= HALF_CELL;
            }
            if even_height {
                py -= HALF_CELL;
            }
        }
        if index == GRID_LAST && even_height {
            py += HALF_CELL;
        }
    }
    None
}

/// Slot under the pointer when picking an item up.
pub fn slot_at_cut(screen: &ScreenLayout, x: i32, y: i32) -> Option<SlotId> {
    let size = GameConfig::INV_SLOT_SIZE_PX + 1;
    (0..SLOT_COUNT)
        .find(|&index| {
            let (left, bottom) = rect_origin(screen, index);
            (left..left + size).contains(&x) && (bottom - size..bottom).contains(&y)
        })
        .and_then(slot_for_rect)
}

/// Top-left backpack cell covered by an item pasted with its centre over `slot`.
///
/// Clamps at the top and left edges. Overhang on the other two edges is left
/// for [`footprint_cells`](crate::state::footprint_cells) to reject.
pub fn paste_origin(slot: GridSlot, footprint: Footprint) -> Option<GridSlot> {
    let row = slot
        .row()
        .saturating_sub((footprint.height as usize).saturating_sub(1) / 2);
    let column = slot
        .column()
        .saturating_sub((footprint.width as usize).saturating_sub(1) / 2);
    GridSlot::from_row_column(row, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(index: usize) -> SlotId {
        SlotId::Grid(GridSlot::new(index).unwrap())
    }

    #[test]
    fn cut_resolves_each_panel() {
        let screen = ScreenLayout::default();
        // Head rectangle (132, 31) sits at x 452..481, y 2..31 on a 640 wide screen.
        assert_eq!(
            slot_at_cut(&screen, 460, 20),
            Some(SlotId::Body(BodyLocation::Head))
        );
        assert_eq!(
            slot_at_cut(&screen, 320 + 250, 200),
            Some(SlotId::Body(BodyLocation::RingRight))
        );
        assert_eq!(slot_at_cut(&screen, 320 + 17, 240), Some(grid(0)));
        assert_eq!(slot_at_cut(&screen, 320 + 280, 330), Some(grid(39)));
        assert_eq!(slot_at_cut(&screen, 210, 352 + 20), Some(SlotId::Belt(0)));
        assert_eq!(slot_at_cut(&screen, 410, 352 + 20), Some(SlotId::Belt(7)));
        assert_eq!(slot_at_cut(&screen, 5, 5), None);
    }

    #[test]
    fn cut_follows_screen_width() {
        let screen = ScreenLayout::new(800, 600);
        assert_eq!(slot_at_cut(&screen, 480 + 17, 240), Some(grid(0)));
        assert_eq!(slot_at_cut(&screen, 80 + 205, 472 + 20), Some(SlotId::Belt(0)));
    }

    #[test]
    fn paste_single_cell_uses_centre() {
        let screen = ScreenLayout::default();
        // A 28x28 cursor at (323, 226) is centred on (337, 240): grid cell 0.
        assert_eq!(
            slot_at_paste(&screen, 323, 226, Footprint::SINGLE),
            Some(grid(0))
        );
    }

    #[test]
    fn paste_even_footprints_shift_half_a_cell() {
        let screen = ScreenLayout::default();
        // 2x2 cursor centred on (351, 254): the boundary between cells 0, 1, 10
        // and 11. The shift moves the probe to (337, 240), cell 0.
        assert_eq!(
            slot_at_paste(&screen, 323, 226, Footprint::new(2, 2)),
            Some(grid(0))
        );
        // A 1x2 item only shifts vertically: (337, 254) becomes (337, 240).
        assert_eq!(
            slot_at_paste(&screen, 323, 226, Footprint::new(1, 2)),
            Some(grid(0))
        );
    }

    #[test]
    fn paste_over_body_slot_has_no_shift() {
        let screen = ScreenLayout::default();
        // 2x3 armor centred over the chest rectangles.
        assert_eq!(
            slot_at_paste(&screen, 320 + 132, 80, Footprint::new(2, 3)),
            Some(SlotId::Body(BodyLocation::Chest))
        );
    }

    #[test]
    fn paste_origin_centres_and_clamps() {
        let slot = GridSlot::new(15).unwrap();
        assert_eq!(paste_origin(slot, Footprint::new(2, 3)), GridSlot::new(5));
        assert_eq!(paste_origin(slot, Footprint::new(2, 2)), GridSlot::new(15));
        assert_eq!(paste_origin(GridSlot::new(0).unwrap(), Footprint::new(2, 3)), GridSlot::new(0));
    }
}
