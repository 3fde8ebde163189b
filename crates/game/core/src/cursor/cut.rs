//! Lifting an item out of a slot.

use super::error::TransferError;
use super::layout::SlotId;
use crate::config::GameConfig;
use crate::engine::Effects;
use crate::equip::{auto_equip_at, find_equip_location};
use crate::placement::{PlaceMode, auto_place_in_belt, auto_place_in_inventory, can_be_placed_on_belt};
use crate::state::{BodyLocation, GridSlot, PlayerState};

/// Takes the item in `slot` onto the cursor.
///
/// With `automatic` set the item is moved straight on instead: body items go
/// to the backpack, backpack items to the belt or a body slot, and belt items
/// to the backpack. An automatic move that finds no room fails without
/// touching anything.
pub(crate) fn cut(
    config: &GameConfig,
    player: &mut PlayerState,
    slot: SlotId,
    automatic: bool,
    effects: &mut Effects,
) -> Result<(), TransferError> {
    if !player.mode.allows_inventory() {
        return Err(TransferError::PlayerBusy { mode: player.mode });
    }
    if player.inventory.is_holding() {
        return Err(TransferError::CursorOccupied);
    }

    match slot {
        SlotId::Body(location) => cut_body(player, location, automatic, effects)?,
        SlotId::Grid(cell) => cut_grid(config, player, cell, automatic, effects)?,
        SlotId::Belt(index) => cut_belt(player, index, automatic, effects)?,
    }

    player.recalculate();
    Ok(())
}

fn cut_body(
    player: &mut PlayerState,
    location: BodyLocation,
    automatic: bool,
    effects: &mut Effects,
) -> Result<(), TransferError> {
    let item = player
        .inventory
        .body(location)
        .cloned()
        .ok_or(TransferError::EmptySlot)?;

    if automatic
        && auto_place_in_inventory(&mut player.inventory, &item, PlaceMode::Probe).is_none()
    {
        return Err(TransferError::NowhereToPut);
    }

    player.inventory.take_body(location);
    effects.body_changed(player, location);
    if automatic {
        auto_place_in_inventory(&mut player.inventory, &item, PlaceMode::Commit);
        effects.flip(&item);
    } else {
        player.inventory.set_held(Some(item));
        effects.sound(crate::audio::SoundEffect::Grab);
    }
    Ok(())
}

fn cut_grid(
    config: &GameConfig,
    player: &mut PlayerState,
    cell: GridSlot,
    automatic: bool,
    effects: &mut Effects,
) -> Result<(), TransferError> {
    let (index, item) = player
        .inventory
        .item_at(cell)
        .map(|(index, item)| (index, item.clone()))
        .ok_or(TransferError::EmptySlot)?;

    if !automatic {
        let item = player.inventory.remove_item(index);
        player.inventory.set_held(item);
        effects.sound(crate::audio::SoundEffect::Grab);
        return Ok(());
    }

    if can_be_placed_on_belt(&item) {
        auto_place_in_belt(&mut player.inventory, &item, PlaceMode::Probe)
            .ok_or(TransferError::NowhereToPut)?;
        let Some(item) = player.inventory.remove_item(index) else {
            return Err(TransferError::EmptySlot);
        };
        auto_place_in_belt(&mut player.inventory, &item, PlaceMode::Commit);
        effects.sound(crate::audio::SoundEffect::Grab);
        return Ok(());
    }

    let location = find_equip_location(player, &item).ok_or(TransferError::CannotEquip)?;
    let Some(item) = player.inventory.remove_item(index) else {
        return Err(TransferError::EmptySlot);
    };
    if !config.auto_equip_sound {
        effects.flip(&item);
    }
    if let Err(item) = auto_equip_at(config, player, item, location, effects) {
        player.inventory.set_held(Some(item));
    }
    Ok(())
}

fn cut_belt(
    player: &mut PlayerState,
    index: usize,
    automatic: bool,
    effects: &mut Effects,
) -> Result<(), TransferError> {
    let item = player
        .inventory
        .belt_item(index)
        .cloned()
        .ok_or(TransferError::EmptySlot)?;

    if automatic {
        auto_place_in_inventory(&mut player.inventory, &item, PlaceMode::Probe).ok_or(
            if can_be_placed_on_belt(&item) {
                TransferError::NowhereToPut
            } else {
                TransferError::CannotEquip
            },
        )?;
        player.inventory.remove_belt_item(index);
        auto_place_in_inventory(&mut player.inventory, &item, PlaceMode::Commit);
    } else {
        player.inventory.remove_belt_item(index);
        player.inventory.set_held(Some(item));
    }
    effects.sound(crate::audio::SoundEffect::Grab);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{SoundEffect, SpeechCue};
    use crate::engine::Outcome;
    use crate::net::NetCommand;
    use crate::placement::auto_place_in_inventory_slot;
    use crate::state::{GridCell, PlayerMode};
    use crate::testing::{fixtures, items, players};

    fn run(
        player: &mut PlayerState,
        slot: SlotId,
        automatic: bool,
    ) -> Result<Outcome, TransferError> {
        let config = GameConfig::default();
        let mut effects = Effects::new(player, true);
        cut(&config, player, slot, automatic, &mut effects)?;
        Ok(effects.finish(player))
    }

    fn fill_backpack(player: &mut PlayerState) {
        let potion = items::healing_potion(&fixtures());
        for cell in 0..40 {
            auto_place_in_inventory_slot(
                &mut player.inventory,
                GridSlot::new(cell).unwrap(),
                &potion,
                PlaceMode::Commit,
            );
        }
        player.recalculate();
    }

    #[test]
    fn manual_cut_from_body_holds_item_and_deletes_slot() {
        let catalog = fixtures();
        let mut player = players::warrior(0);
        let cap = items::cap(&catalog);
        player.inventory.set_body(BodyLocation::Head, Some(cap.clone()));
        player.recalculate();

        let outcome = run(&mut player, SlotId::Body(BodyLocation::Head), false).unwrap();
        assert!(player.inventory.is_body_empty(BodyLocation::Head));
        assert_eq!(player.inventory.held().map(|i| i.id), Some(cap.id));
        assert_eq!(
            outcome.commands,
            vec![NetCommand::DeleteItem {
                location: BodyLocation::Head
            }]
        );
        assert_eq!(outcome.sounds, vec![SoundEffect::Grab]);
    }

    #[test]
    fn automatic_unequip_moves_to_backpack() {
        let catalog = fixtures();
        let mut player = players::warrior(0);
        let armor = items::quilted_armor(&catalog);
        player.inventory.set_body(BodyLocation::Chest, Some(armor.clone()));
        player.recalculate();

        let outcome = run(&mut player, SlotId::Body(BodyLocation::Chest), true).unwrap();
        assert!(!player.inventory.is_holding());
        assert!(player.inventory.is_body_empty(BodyLocation::Chest));
        assert_eq!(
            player.inventory.cell(GridSlot::new(20).unwrap()),
            GridCell::Anchor(0)
        );
        assert_eq!(outcome.sounds, vec![SoundEffect::flip(&armor)]);
    }

    #[test]
    fn automatic_unequip_with_full_backpack_changes_nothing() {
        let catalog = fixtures();
        let mut player = players::warrior(0);
        player
            .inventory
            .set_body(BodyLocation::RingLeft, Some(items::ring(&catalog)));
        fill_backpack(&mut player);
        let before = player.clone();

        let error = run(&mut player, SlotId::Body(BodyLocation::RingLeft), true).unwrap_err();
        assert_eq!(error, TransferError::NowhereToPut);
        assert_eq!(
            error.feedback(player.class),
            Some(SoundEffect::speech(player.class, SpeechCue::NowhereToPut))
        );
        assert_eq!(player, before);
    }

    #[test]
    fn automatic_cut_moves_potion_to_belt() {
        let catalog = fixtures();
        let mut player = players::warrior(0);
        auto_place_in_inventory(
            &mut player.inventory,
            &items::healing_potion(&catalog),
            PlaceMode::Commit,
        );
        player.recalculate();

        run(&mut player, SlotId::Grid(GridSlot::new(30).unwrap()), true).unwrap();
        assert_eq!(player.inventory.item_count(), 0);
        assert!(player.inventory.belt_item(0).is_some());
    }

    #[test]
    fn automatic_cut_equips_from_backpack() {
        let catalog = fixtures();
        let mut player = players::warrior(0);
        auto_place_in_inventory(&mut player.inventory, &items::cap(&catalog), PlaceMode::Commit);
        player.recalculate();

        let outcome = run(&mut player, SlotId::Grid(GridSlot::new(18).unwrap()), true).unwrap();
        assert_eq!(player.inventory.item_count(), 0);
        assert!(player.inventory.body(BodyLocation::Head).is_some());
        assert!(matches!(
            outcome.commands.as_slice(),
            [NetCommand::ChangeItem {
                location: BodyLocation::Head,
                ..
            }]
        ));
    }

    #[test]
    fn automatic_cut_of_unwearable_item_reports_cannot_equip() {
        let catalog = fixtures();
        let mut player = players::warrior(0);
        player
            .inventory
            .set_body(BodyLocation::Head, Some(items::cap(&catalog)));
        auto_place_in_inventory(&mut player.inventory, &items::cap(&catalog), PlaceMode::Commit);
        player.recalculate();
        let before = player.clone();

        assert_eq!(
            run(&mut player, SlotId::Grid(GridSlot::new(8).unwrap()), true),
            Err(TransferError::CannotEquip)
        );
        assert_eq!(player, before);
    }

    #[test]
    fn manual_cut_from_grid_compacts_list() {
        let catalog = fixtures();
        let mut player = players::warrior(0);
        let potion = items::healing_potion(&catalog);
        let ring = items::ring(&catalog);
        auto_place_in_inventory(&mut player.inventory, &potion, PlaceMode::Commit);
        auto_place_in_inventory(&mut player.inventory, &ring, PlaceMode::Commit);
        player.recalculate();

        run(&mut player, SlotId::Grid(GridSlot::new(30).unwrap()), false).unwrap();
        assert_eq!(player.inventory.held().map(|i| i.id), Some(potion.id));
        assert_eq!(player.inventory.item_count(), 1);
        assert_eq!(
            player.inventory.cell(GridSlot::new(31).unwrap()),
            GridCell::Anchor(0)
        );
        player.inventory.validate(&GameConfig::default()).unwrap();
    }

    #[test]
    fn cut_from_belt() {
        let catalog = fixtures();
        let mut player = players::warrior(0);
        player
            .inventory
            .set_belt(3, Some(items::healing_potion(&catalog)));
        player.recalculate();

        run(&mut player, SlotId::Belt(3), true).unwrap();
        assert!(player.inventory.belt_item(3).is_none());
        assert_eq!(player.inventory.item_count(), 1);
    }

    #[test]
    fn busy_player_or_full_cursor_cannot_cut() {
        let catalog = fixtures();
        let mut player = players::warrior(0);
        player
            .inventory
            .set_body(BodyLocation::Head, Some(items::cap(&catalog)));
        player.mode = PlayerMode::Attack;
        assert_eq!(
            run(&mut player, SlotId::Body(BodyLocation::Head), false),
            Err(TransferError::PlayerBusy {
                mode: PlayerMode::Attack
            })
        );

        player.mode = PlayerMode::Stand;
        player.inventory.set_held(Some(items::ring(&catalog)));
        assert_eq!(
            run(&mut player, SlotId::Body(BodyLocation::Head), false),
            Err(TransferError::CursorOccupied)
        );
    }

    #[test]
    fn empty_slot_is_an_error() {
        let mut player = players::warrior(0);
        assert_eq!(
            run(&mut player, SlotId::Belt(0), false),
            Err(TransferError::EmptySlot)
        );
    }
}
