//! Entry point for every inventory mutation.
//!
//! [`InventoryEngine`] borrows the [`PlayerRegistry`] for the duration of one
//! call, runs the rule functions against the addressed player and hands back
//! an [`Outcome`]: the replication commands to broadcast, the sounds for the
//! local client and the resulting cursor. Commands are only produced by
//! operations that committed; a returned error means no state changed and
//! nothing needs to be sent.

mod effects;

pub(crate) use effects::Effects;
pub use effects::{CursorState, Outcome};

use crate::consume::{self, UseError, UsedItem};
use crate::cursor::{self, PickupResult, SlotId, TransferError};
use crate::env::{InventoryEnv, NoQuestHooks, QuestHooks};
use crate::equip;
use crate::gold;
use crate::item::{Item, SpellId};
use crate::net::{self, NetCommand, RemoteError, Replicated};
use crate::state::{
    BodyLocation, PlayerId, PlayerRegistry, PlayerState, RegistryError, TilePosition,
};

/// Applies inventory operations to players in a registry.
pub struct InventoryEngine<'a> {
    registry: &'a mut PlayerRegistry,
    quests: Option<&'a mut dyn QuestHooks>,
}

impl<'a> InventoryEngine<'a> {
    pub fn new(registry: &'a mut PlayerRegistry) -> Self {
        Self {
            registry,
            quests: None,
        }
    }

    /// Routes pick up and equip notifications to `quests`.
    pub fn with_quests(mut self, quests: &'a mut dyn QuestHooks) -> Self {
        self.quests = Some(quests);
        self
    }

    /// Drops the held item at screen position (`x`, `y`).
    pub fn paste_at(
        &mut self,
        env: InventoryEnv<'_>,
        player: PlayerId,
        x: i32,
        y: i32,
    ) -> Result<Outcome, TransferError> {
        let footprint = self
            .registry
            .get(player)?
            .inventory
            .held()
            .ok_or(TransferError::CursorEmpty)?
            .inventory_size();
        let slot = cursor::slot_at_paste(&env.config.screen, x, y, footprint)
            .ok_or(TransferError::NoSlot)?;
        self.paste(env, player, slot)
    }

    /// Drops the held item into `slot`, swapping with whatever is there.
    pub fn paste(
        &mut self,
        env: InventoryEnv<'_>,
        player: PlayerId,
        slot: SlotId,
    ) -> Result<Outcome, TransferError> {
        let local = self.registry.is_local(player);
        let state = self.registry.get_mut(player)?;
        let mut effects = Effects::new(state, local);
        cursor::paste(env.config, state, slot, &mut effects)?;
        let outcome = effects.finish(state);
        if let Some(quests) = self.quests.as_deref_mut() {
            notify_equipped(quests, state, &outcome);
        }
        Ok(outcome)
    }

    /// Picks up the item under screen position (`x`, `y`).
    pub fn cut_at(
        &mut self,
        env: InventoryEnv<'_>,
        player: PlayerId,
        x: i32,
        y: i32,
        automatic: bool,
    ) -> Result<Outcome, TransferError> {
        let slot = cursor::slot_at_cut(&env.config.screen, x, y).ok_or(TransferError::NoSlot)?;
        self.cut(env, player, slot, automatic)
    }

    pub fn cut(
        &mut self,
        env: InventoryEnv<'_>,
        player: PlayerId,
        slot: SlotId,
        automatic: bool,
    ) -> Result<Outcome, TransferError> {
        let local = self.registry.is_local(player);
        let state = self.registry.get_mut(player)?;
        let mut effects = Effects::new(state, local);
        cursor::cut(env.config, state, slot, automatic, &mut effects)?;
        let outcome = effects.finish(state);
        if let Some(quests) = self.quests.as_deref_mut() {
            notify_equipped(quests, state, &outcome);
        }
        Ok(outcome)
    }

    /// Lifts a ground item onto the cursor.
    ///
    /// Returns the item the cursor held before, which the caller must put
    /// back on the ground.
    pub fn grab(
        &mut self,
        env: InventoryEnv<'_>,
        player: PlayerId,
        ground: &Item,
    ) -> Result<(Outcome, Option<Item>), TransferError> {
        let local = self.registry.is_local(player);
        let state = self.registry.get_mut(player)?;
        let mut fallback = NoQuestHooks;
        let quests: &mut dyn QuestHooks = match self.quests.as_deref_mut() {
            Some(quests) => quests,
            None => &mut fallback,
        };
        let mut effects = Effects::new(state, local);
        let dropped = cursor::grab_ground_item(env.config, state, ground, quests, &mut effects);
        Ok((effects.finish(state), dropped))
    }

    /// Stores a ground item directly, bypassing the cursor.
    pub fn auto_pick_up(
        &mut self,
        env: InventoryEnv<'_>,
        player: PlayerId,
        ground: &Item,
    ) -> Result<(Outcome, PickupResult), TransferError> {
        let local = self.registry.is_local(player);
        let state = self.registry.get_mut(player)?;
        let mut fallback = NoQuestHooks;
        let quests: &mut dyn QuestHooks = match self.quests.as_deref_mut() {
            Some(quests) => quests,
            None => &mut fallback,
        };
        let mut effects = Effects::new(state, local);
        let result = cursor::auto_pick_up(env.config, state, ground, quests, &mut effects)?;
        Ok((effects.finish(state), result))
    }

    /// Drops the held item on the ground at `position`.
    pub fn put_held(
        &mut self,
        player: PlayerId,
        position: TilePosition,
    ) -> Result<(Outcome, Item), TransferError> {
        let local = self.registry.is_local(player);
        let state = self.registry.get_mut(player)?;
        let mut effects = Effects::new(state, local);
        let item = cursor::put_held_item(state, position, &mut effects)?;
        Ok((effects.finish(state), item))
    }

    /// Asks for a ground item owned by the world to be handed over.
    pub fn request_pick_up(
        &mut self,
        player: PlayerId,
        position: TilePosition,
        ground: &Item,
    ) -> Result<Outcome, TransferError> {
        let local = self.registry.is_local(player);
        let state = self.registry.get_mut(player)?;
        let mut effects = Effects::new(state, local);
        cursor::request_pick_up(position, ground, &mut effects);
        Ok(effects.finish(state))
    }

    pub fn use_item(
        &mut self,
        player: PlayerId,
        slot: SlotId,
    ) -> Result<(Outcome, UsedItem), UseError> {
        let local = self.registry.is_local(player);
        let state = self.registry.get_mut(player)?;
        let mut effects = Effects::new(state, local);
        let used = consume::use_item(state, slot, &mut effects)?;
        Ok((effects.finish(state), used))
    }

    pub fn remove_scroll(
        &mut self,
        player: PlayerId,
        spell: SpellId,
    ) -> Result<Option<Item>, RegistryError> {
        Ok(consume::remove_scroll(self.registry.get_mut(player)?, spell))
    }

    pub fn use_staff_charge(
        &mut self,
        player: PlayerId,
        spell: SpellId,
    ) -> Result<bool, RegistryError> {
        Ok(consume::use_staff_charge(self.registry.get_mut(player)?, spell))
    }

    /// Lifts `amount` gold off the stack in `slot` onto the cursor.
    pub fn split_gold(
        &mut self,
        player: PlayerId,
        slot: SlotId,
        amount: u32,
    ) -> Result<Outcome, TransferError> {
        let local = self.registry.is_local(player);
        let state = self.registry.get_mut(player)?;
        let effects = Effects::new(state, local);
        gold::split_gold(state, slot, amount)?;
        Ok(effects.finish(state))
    }

    /// Moves the held weapon into a free hand if one is available.
    pub fn weapon_auto_place(
        &mut self,
        player: PlayerId,
    ) -> Result<(Outcome, Option<BodyLocation>), TransferError> {
        let local = self.registry.is_local(player);
        let state = self.registry.get_mut(player)?;
        if !state.mode.allows_inventory() {
            return Err(TransferError::PlayerBusy { mode: state.mode });
        }
        let mut effects = Effects::new(state, local);
        let placed = equip::weapon_auto_place(state, &mut effects);
        Ok((effects.finish(state), placed))
    }

    /// Applies a command broadcast by the peer that owns `replicated.player`.
    ///
    /// Returns the ground item for commands that drop one.
    pub fn apply_remote(
        &mut self,
        env: InventoryEnv<'_>,
        replicated: &Replicated,
    ) -> Result<Option<Item>, RemoteError> {
        if self.registry.is_local(replicated.player) {
            return Err(RemoteError::LocalPlayer(replicated.player));
        }
        let state = self.registry.get_mut(replicated.player)?;
        Ok(net::apply_remote(&env, state, &replicated.command)?)
    }
}

/// Reports every body slot that `outcome` filled.
fn notify_equipped(quests: &mut dyn QuestHooks, player: &PlayerState, outcome: &Outcome) {
    for command in &outcome.commands {
        if let NetCommand::ChangeItem { location, .. } = command
            && let Some(item) = player.inventory.body(*location)
        {
            quests.item_equipped(player.id, item);
        }
    }
}
