//! Replication commands exchanged between peers.
//!
//! Local operations emit [`NetCommand`]s after they commit. Peers never ship
//! whole items: they send creation parameters plus the handful of fields that
//! change during play, and the receiver regenerates the rest with
//! [`reconstruct`].

use crate::env::{InventoryEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::item::{
    BuffFlags, CreateInfo, Item, ItemBonuses, ItemId, Meter, Requirements, recreate_item,
};
use crate::state::{BodyLocation, PlayerId, PlayerState, RegistryError, TilePosition};

/// Wire form of an item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSync {
    pub id: ItemId,
    pub create_info: CreateInfo,
    pub seed: u32,
    pub buff: BuffFlags,
    pub identified: bool,
    pub durability: Meter,
    pub charges: Meter,
    pub value: u32,
    pub requirements: Requirements,
    pub bonuses: ItemBonuses,
}

impl ItemSync {
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.id,
            create_info: item.create_info,
            seed: item.seed,
            buff: item.buff,
            identified: item.identified,
            durability: item.durability,
            charges: item.charges,
            value: item.value,
            requirements: item.requirements,
            bonuses: item.bonuses,
        }
    }
}

/// Regenerates an item from its wire form.
pub fn reconstruct(env: &InventoryEnv<'_>, sync: &ItemSync) -> Result<Item, OracleError> {
    let definition = env.definition(sync.id)?;
    let mut item = recreate_item(
        definition,
        sync.create_info,
        sync.seed,
        sync.value,
        sync.buff,
    );
    item.identified = sync.identified;
    item.durability = sync.durability;
    item.charges = sync.charges;
    item.value = sync.value;
    item.requirements = sync.requirements;
    item.bonuses = sync.bonuses;
    if item.is_gold() {
        item.refresh_gold_graphic();
    }
    Ok(item)
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NetCommand {
    /// The item now in a body slot.
    ChangeItem {
        location: BodyLocation,
        item: ItemSync,
    },
    /// A body slot was emptied.
    DeleteItem { location: BodyLocation },
    /// The held item was dropped on the ground.
    PutItem {
        position: TilePosition,
        item: ItemSync,
    },
    /// Ask the item's owner to hand over a ground item.
    RequestGetItem {
        position: TilePosition,
        item: ItemSync,
    },
    /// A previously held item was put back on the ground to make room.
    SyncPutItem {
        position: TilePosition,
        item: ItemSync,
    },
}

impl NetCommand {
    pub fn change_item(location: BodyLocation, item: &Item) -> Self {
        Self::ChangeItem {
            location,
            item: ItemSync::from_item(item),
        }
    }

    /// Short name used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ChangeItem { .. } => "change_item",
            Self::DeleteItem { .. } => "delete_item",
            Self::PutItem { .. } => "put_item",
            Self::RequestGetItem { .. } => "request_get_item",
            Self::SyncPutItem { .. } => "sync_put_item",
        }
    }
}

/// A command together with the player whose inventory it describes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Replicated {
    pub player: PlayerId,
    pub command: NetCommand,
}

/// Errors raised while applying a peer's command.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Peers only replicate their own players.
    #[error("Remote command targets the local player {0:?}")]
    LocalPlayer(PlayerId),
}

impl GameError for RemoteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(e) => e.severity(),
            Self::Registry(e) => e.severity(),
            Self::LocalPlayer(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(e) => e.error_code(),
            Self::Registry(e) => e.error_code(),
            Self::LocalPlayer(_) => "REMOTE_LOCAL_PLAYER",
        }
    }
}

/// Applies a peer's command to the mirrored copy of that peer's player.
///
/// Returns the reconstructed item for commands that put something on the
/// ground; placing it in the world is up to the caller.
pub fn apply_remote(
    env: &InventoryEnv<'_>,
    player: &mut PlayerState,
    command: &NetCommand,
) -> Result<Option<Item>, OracleError> {
    match command {
        NetCommand::ChangeItem { location, item } => {
            let item = reconstruct(env, item)?;
            let both_hands = !player.grips_one_handed(&item);
            player.inventory.set_body(*location, Some(item));
            if both_hands && let Some(other) = location.opposite_hand() {
                player.inventory.take_body(other);
            }
            player.recalculate();
            Ok(None)
        }
        NetCommand::DeleteItem { location } => {
            player.inventory.take_body(*location);
            player.recalculate();
            Ok(None)
        }
        NetCommand::PutItem { item, .. } | NetCommand::SyncPutItem { item, .. } => {
            reconstruct(env, item).map(Some)
        }
        NetCommand::RequestGetItem { .. } => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::testing::{fixtures, items, players};

    #[test]
    fn reconstruct_reproduces_item() {
        let catalog = fixtures();
        let config = GameConfig::default();
        let env = InventoryEnv::new(&config, &catalog);

        let mut sword = items::short_sword(&catalog);
        sword.identified = true;
        sword.durability.current = 3;
        let rebuilt = reconstruct(&env, &ItemSync::from_item(&sword)).unwrap();
        assert_eq!(rebuilt, Item { stat_flag: false, ..sword });
    }

    #[test]
    fn remote_two_hander_clears_other_hand() {
        let catalog = fixtures();
        let config = GameConfig::default();
        let env = InventoryEnv::new(&config, &catalog);
        let mut player = players::warrior(1);
        player
            .inventory
            .set_body(BodyLocation::HandRight, Some(items::buckler(&catalog)));

        let command = NetCommand::change_item(BodyLocation::HandLeft, &items::great_sword(&catalog));
        assert_eq!(apply_remote(&env, &mut player, &command), Ok(None));

        assert!(player.inventory.body(BodyLocation::HandLeft).is_some());
        assert!(player.inventory.is_body_empty(BodyLocation::HandRight));
        assert!(player.inventory.validate(&config).is_ok());
    }

    #[test]
    fn remote_barbarian_keeps_shield_beside_great_sword() {
        let catalog = fixtures();
        let config = GameConfig::default();
        let env = InventoryEnv::new(&config, &catalog);
        let mut player = players::of_class(crate::state::PlayerClass::Barbarian, 1);
        player
            .inventory
            .set_body(BodyLocation::HandRight, Some(items::buckler(&catalog)));

        let command = NetCommand::change_item(BodyLocation::HandLeft, &items::great_sword(&catalog));
        apply_remote(&env, &mut player, &command).unwrap();

        assert!(player.inventory.body(BodyLocation::HandLeft).is_some());
        assert_eq!(
            player.inventory.body(BodyLocation::HandRight).map(|item| item.id),
            Some(crate::testing::ids::BUCKLER)
        );
    }

    #[test]
    fn remote_delete_empties_slot() {
        let catalog = fixtures();
        let config = GameConfig::default();
        let env = InventoryEnv::new(&config, &catalog);
        let mut player = players::warrior(1);
        player
            .inventory
            .set_body(BodyLocation::Head, Some(items::cap(&catalog)));

        let command = NetCommand::DeleteItem {
            location: BodyLocation::Head,
        };
        apply_remote(&env, &mut player, &command).unwrap();
        assert!(player.inventory.is_body_empty(BodyLocation::Head));
    }

    #[test]
    fn unknown_definition_is_rejected() {
        let catalog = fixtures();
        let config = GameConfig::default();
        let env = InventoryEnv::new(&config, &catalog);
        let mut player = players::warrior(1);
        let mut sync = ItemSync::from_item(&items::cap(&catalog));
        sync.id = ItemId(9999);

        let command = NetCommand::ChangeItem {
            location: BodyLocation::Head,
            item: sync,
        };
        assert_eq!(
            apply_remote(&env, &mut player, &command),
            Err(OracleError::ItemNotFound(ItemId(9999)))
        );
        assert!(player.inventory.is_body_empty(BodyLocation::Head));
    }
}
