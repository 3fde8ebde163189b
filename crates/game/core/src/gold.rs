//! Gold stacking.
//!
//! Gold is an ordinary single-cell item whose `value` is the stack size,
//! capped at [`GameConfig::max_gold`]. Every operation here moves value
//! between stacks and the cursor; the sum over all of them never changes.

use crate::config::GameConfig;
use crate::cursor::{SlotId, TransferError};
use crate::item::{Item, split_seed};
use crate::state::{GridSlot, PlayerInventory, PlayerState};

/// Adds `amount` to `stack`, returning what did not fit under the cap.
pub fn merge_into(stack: &mut Item, amount: u32, max_gold: u32) -> u32 {
    let total = stack.value.saturating_add(amount);
    let (kept, overflow) = if total > max_gold {
        (max_gold.max(stack.value), total - max_gold.max(stack.value))
    } else {
        (total, 0)
    };
    stack.value = kept;
    stack.refresh_gold_graphic();
    overflow
}

/// Stores held gold in the backpack.
///
/// Existing stacks below the cap are topped up in list order first, then new
/// stacks are opened in empty cells from the last cell backwards. Returns
/// `true` when the cursor ends up empty; otherwise the remainder stays held.
pub fn gold_auto_place(config: &GameConfig, inventory: &mut PlayerInventory) -> bool {
    let max_gold = config.max_gold;
    if !inventory.held().is_some_and(Item::is_gold) {
        return false;
    }
    let Some(mut held) = inventory.take_held() else {
        return false;
    };

    for index in 0..inventory.item_count() {
        if held.value == 0 {
            break;
        }
        let Some(stack) = inventory.item_mut(index) else {
            break;
        };
        if !stack.is_gold() || stack.value >= max_gold {
            continue;
        }
        held.value = merge_into(stack, held.value, max_gold);
        if held.value > 0 {
            held.seed = split_seed(held.seed);
        }
    }

    for cell in (0..GameConfig::GRID_CELLS).rev() {
        if held.value == 0 || inventory.item_count() >= GameConfig::GRID_CELLS {
            break;
        }
        let Some(slot) = GridSlot::new(cell) else {
            continue;
        };
        if !inventory.cell(slot).is_empty() {
            continue;
        }

        let mut stack = held.clone();
        stack.seed = split_seed(held.seed);
        stack.value = held.value.min(max_gold);
        stack.refresh_gold_graphic();
        held.value -= stack.value;
        if held.value > 0 {
            held.seed = split_seed(stack.seed);
        }
        inventory.insert_single(slot, stack);
    }

    inventory.refresh_gold();
    if held.value == 0 {
        return true;
    }
    held.refresh_gold_graphic();
    inventory.set_held(Some(held));
    false
}

/// Lifts `amount` gold off a stack onto the empty cursor.
///
/// A stack split down to nothing is removed.
pub fn split_gold(player: &mut PlayerState, slot: SlotId, amount: u32) -> Result<(), TransferError> {
    if !player.mode.allows_inventory() {
        return Err(TransferError::PlayerBusy { mode: player.mode });
    }
    if player.inventory.is_holding() {
        return Err(TransferError::CursorOccupied);
    }

    let inventory = &mut player.inventory;
    let stack = match slot {
        SlotId::Grid(cell) => {
            let index = inventory.item_at(cell).map(|(index, _)| index);
            index.and_then(|index| inventory.item_mut(index))
        }
        SlotId::Belt(belt) => inventory.belt_item_mut(belt),
        SlotId::Body(_) => None,
    };
    let Some(stack) = stack else {
        return Err(TransferError::EmptySlot);
    };
    if !stack.is_gold() {
        return Err(TransferError::NotGold);
    }
    if amount == 0 || amount > stack.value {
        return Err(TransferError::InvalidAmount {
            amount,
            available: stack.value,
        });
    }

    let mut taken = stack.clone();
    stack.value -= amount;
    stack.refresh_gold_graphic();
    let emptied = stack.value == 0;

    taken.value = amount;
    taken.seed = split_seed(stack.seed);
    taken.refresh_gold_graphic();

    if emptied {
        match slot {
            SlotId::Grid(cell) => {
                if let Some((index, _)) = inventory.item_at(cell) {
                    inventory.remove_item(index);
                }
            }
            SlotId::Belt(belt) => {
                inventory.remove_belt_item(belt);
            }
            SlotId::Body(_) => {}
        }
    }
    inventory.set_held(Some(taken));
    player.recalculate();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{PlaceMode, auto_place_in_inventory_slot};
    use crate::testing::{fixtures, items, players};

    fn total(inventory: &PlayerInventory) -> u32 {
        inventory.calculate_gold() + inventory.held().map_or(0, |item| item.value)
    }

    #[test]
    fn merge_caps_and_reports_overflow() {
        let catalog = fixtures();
        let mut stack = items::gold(&catalog, 1800);
        assert_eq!(merge_into(&mut stack, 4000, 5000), 800);
        assert_eq!(stack.value, 5000);
        assert_eq!(stack.graphic, Item::GOLD_LARGE_GRAPHIC);

        let mut stack = items::gold(&catalog, 100);
        assert_eq!(merge_into(&mut stack, 200, 5000), 0);
        assert_eq!(stack.value, 300);
    }

    #[test]
    fn pickup_tops_up_then_opens_stack_from_the_end() {
        let catalog = fixtures();
        let config = GameConfig::default();
        let mut inventory = PlayerInventory::new();
        assert!(auto_place_in_inventory_slot(
            &mut inventory,
            GridSlot::new(30).unwrap(),
            &items::gold(&catalog, 1800),
            PlaceMode::Commit,
        ));
        inventory.refresh_gold();
        inventory.set_held(Some(items::gold(&catalog, 4000)));

        assert!(gold_auto_place(&config, &mut inventory));
        assert!(!inventory.is_holding());
        assert_eq!(inventory.item(0).unwrap().value, 5000);
        let (_, second) = inventory.item_at(GridSlot::new(39).unwrap()).unwrap();
        assert_eq!(second.value, 800);
        assert_eq!(second.graphic, Item::GOLD_SMALL_GRAPHIC);
        assert_eq!(inventory.calculate_gold(), 5800);
        assert_eq!(inventory.gold(), 5800);
        inventory.validate(&config).unwrap();
    }

    #[test]
    fn oversized_pickup_opens_several_stacks() {
        let catalog = fixtures();
        let config = GameConfig::default();
        let mut inventory = PlayerInventory::new();
        inventory.set_held(Some(items::gold(&catalog, 12_000)));

        assert!(gold_auto_place(&config, &mut inventory));
        let values: Vec<u32> = inventory.items().iter().map(|item| item.value).collect();
        assert_eq!(values, vec![5000, 5000, 2000]);
        assert!(inventory.item_at(GridSlot::new(37).unwrap()).is_some());
        assert_eq!(inventory.gold(), 12_000);

        let seeds: Vec<u32> = inventory.items().iter().map(|item| item.seed).collect();
        assert_ne!(seeds[0], seeds[1]);
        assert_ne!(seeds[1], seeds[2]);
    }

    #[test]
    fn full_backpack_keeps_remainder_on_cursor() {
        let catalog = fixtures();
        let config = GameConfig::default();
        let mut inventory = PlayerInventory::new();
        let potion = items::healing_potion(&catalog);
        for cell in 0..40 {
            auto_place_in_inventory_slot(
                &mut inventory,
                GridSlot::new(cell).unwrap(),
                &potion,
                PlaceMode::Commit,
            );
        }
        inventory.set_held(Some(items::gold(&catalog, 700)));
        let before = total(&inventory);

        assert!(!gold_auto_place(&config, &mut inventory));
        assert_eq!(inventory.held().unwrap().value, 700);
        assert_eq!(total(&inventory), before);
    }

    #[test]
    fn partial_top_up_conserves_value() {
        let catalog = fixtures();
        let config = GameConfig::with_max_gold(1000);
        let mut inventory = PlayerInventory::new();
        let potion = items::healing_potion(&catalog);
        for cell in 1..40 {
            auto_place_in_inventory_slot(
                &mut inventory,
                GridSlot::new(cell).unwrap(),
                &potion,
                PlaceMode::Commit,
            );
        }
        auto_place_in_inventory_slot(
            &mut inventory,
            GridSlot::new(0).unwrap(),
            &items::gold(&catalog, 900),
            PlaceMode::Commit,
        );
        inventory.set_held(Some(items::gold(&catalog, 450)));

        assert!(!gold_auto_place(&config, &mut inventory));
        assert_eq!(inventory.calculate_gold(), 1000);
        assert_eq!(inventory.held().unwrap().value, 350);
    }

    #[test]
    fn split_moves_value_to_cursor_and_removes_empty_stack() {
        let catalog = fixtures();
        let config = GameConfig::default();
        let mut player = players::warrior(0);
        let slot = GridSlot::new(35).unwrap();
        auto_place_in_inventory_slot(
            &mut player.inventory,
            slot,
            &items::gold(&catalog, 600),
            PlaceMode::Commit,
        );
        player.recalculate();

        split_gold(&mut player, SlotId::Grid(slot), 200).unwrap();
        assert_eq!(player.inventory.held().unwrap().value, 200);
        assert_eq!(player.inventory.gold(), 400);

        assert_eq!(
            split_gold(&mut player, SlotId::Grid(slot), 100),
            Err(TransferError::CursorOccupied)
        );

        player.inventory.take_held();
        assert_eq!(
            split_gold(&mut player, SlotId::Grid(slot), 401),
            Err(TransferError::InvalidAmount {
                amount: 401,
                available: 400
            })
        );

        split_gold(&mut player, SlotId::Grid(slot), 400).unwrap();
        assert_eq!(player.inventory.item_count(), 0);
        assert_eq!(player.inventory.held().unwrap().value, 400);
        player.inventory.take_held();
        player.recalculate();
        player.inventory.validate(&config).unwrap();
    }
}
