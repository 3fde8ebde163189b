//! Moving items between the ground and a player.
//!
//! The ground itself belongs to the world layer. These helpers take the
//! ground item by reference and report what the world should do with it.

use super::error::TransferError;
use crate::audio::SpeechCue;
use crate::config::GameConfig;
use crate::engine::Effects;
use crate::env::QuestHooks;
use crate::equip::{auto_equip, auto_equip_enabled};
use crate::gold::gold_auto_place;
use crate::item::{CreateInfo, Item};
use crate::net::{ItemSync, NetCommand};
use crate::placement::{PlaceMode, auto_place_in_belt, auto_place_in_inventory};
use crate::state::{PlayerState, TilePosition};

/// What became of a ground item after an automatic pick up.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickupResult {
    /// The whole item was stored; remove it from the ground.
    Stored,
    /// Only part of a gold pile fit. The ground pile shrinks to this item.
    Remainder(Item),
}

/// Copy of a ground item as it looks once a player owns it.
fn take_ownership(player: &PlayerState, ground: &Item) -> Item {
    let mut item = ground.clone();
    item.create_info.remove(CreateInfo::PREGEN);
    item.check_stats(&player.attributes());
    item
}

/// Lifts a ground item onto the cursor.
///
/// Whatever the cursor held before goes back to the ground next to the
/// player and is returned to the caller together with a `SyncPutItem`.
pub(crate) fn grab_ground_item(
    config: &GameConfig,
    player: &mut PlayerState,
    ground: &Item,
    quests: &mut dyn QuestHooks,
    effects: &mut Effects,
) -> Option<Item> {
    let dropped = player.inventory.take_held();
    if let Some(previous) = &dropped {
        effects.send(NetCommand::SyncPutItem {
            position: player.position,
            item: ItemSync::from_item(previous),
        });
    }

    let item = take_ownership(player, ground);
    quests.item_acquired(player.id, &item);
    let is_gold = item.is_gold();
    player.inventory.set_held(Some(item));
    if is_gold && config.gold_auto_place_on_grab {
        gold_auto_place(config, &mut player.inventory);
    }
    player.recalculate();
    dropped
}

/// Stores a ground item without going through the cursor.
///
/// Gold is stacked into the backpack. Anything else is equipped when the
/// auto-equip options allow it, then tried on the belt, then in the backpack.
/// If nothing has room the player is left untouched.
pub(crate) fn auto_pick_up(
    config: &GameConfig,
    player: &mut PlayerState,
    ground: &Item,
    quests: &mut dyn QuestHooks,
    effects: &mut Effects,
) -> Result<PickupResult, TransferError> {
    if player.inventory.is_holding() {
        return Err(TransferError::CursorOccupied);
    }
    let item = take_ownership(player, ground);

    if item.is_gold() {
        let acquired = item.clone();
        player.inventory.set_held(Some(item));
        let stored = gold_auto_place(config, &mut player.inventory);
        let remainder = player.inventory.take_held();
        player.recalculate();
        let result = match remainder {
            None if stored => PickupResult::Stored,
            Some(remainder) if remainder.value < ground.value => {
                effects.speech(SpeechCue::InventoryFull);
                PickupResult::Remainder(remainder)
            }
            _ => return Err(TransferError::InventoryFull),
        };
        quests.item_acquired(player.id, &acquired);
        return Ok(result);
    }

    let item = if auto_equip_enabled(config, player, &item) {
        match auto_equip(config, player, item, effects) {
            Ok(location) => {
                if let Some(equipped) = player.inventory.body(location) {
                    quests.item_acquired(player.id, equipped);
                    quests.item_equipped(player.id, equipped);
                }
                return Ok(PickupResult::Stored);
            }
            Err(item) => item,
        }
    } else {
        item
    };

    let stored = auto_place_in_belt(&mut player.inventory, &item, PlaceMode::Commit).is_some()
        || auto_place_in_inventory(&mut player.inventory, &item, PlaceMode::Commit).is_some();
    if !stored {
        return Err(TransferError::InventoryFull);
    }
    quests.item_acquired(player.id, &item);
    player.recalculate();
    Ok(PickupResult::Stored)
}

/// Drops the held item on the ground at `position`.
pub(crate) fn put_held_item(
    player: &mut PlayerState,
    position: TilePosition,
    effects: &mut Effects,
) -> Result<Item, TransferError> {
    let item = player.inventory.take_held().ok_or(TransferError::CursorEmpty)?;
    effects.send(NetCommand::PutItem {
        position,
        item: ItemSync::from_item(&item),
    });
    player.recalculate();
    Ok(item)
}

/// Asks the owner of the ground item at `position` to hand it over.
pub(crate) fn request_pick_up(position: TilePosition, ground: &Item, effects: &mut Effects) {
    effects.send(NetCommand::RequestGetItem {
        position,
        item: ItemSync::from_item(ground),
    });
}
