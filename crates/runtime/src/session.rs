//! A peer's view of the shared inventory state.
//!
//! [`Session`] owns the player registry together with the configuration and
//! item catalog every operation needs. Local operations run through
//! [`InventoryEngine`]; their replication commands are published on the
//! [`EventBus`] only after the operation committed. Commands from other peers
//! come back in through [`Session::apply_remote`].

use std::sync::Arc;

use inventory_core::{
    BodyLocation, GameConfig, GameError, InventoryEngine, InventoryEnv, Item, ItemCatalog,
    NetCommand, Outcome, PickupResult, PlayerId, PlayerRegistry, PlayerState, QuestHooks,
    Replicated, SlotId, SpellId, TilePosition, UsedItem,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, SessionEvent};
use crate::repository::HeroRepository;

pub struct Session {
    config: GameConfig,
    catalog: Arc<ItemCatalog>,
    registry: PlayerRegistry,
    quests: Option<Box<dyn QuestHooks + Send>>,
    bus: EventBus,
}

impl Session {
    pub fn new(config: GameConfig, catalog: Arc<ItemCatalog>, local: PlayerId) -> Self {
        Self {
            config,
            catalog,
            registry: PlayerRegistry::new(local),
            quests: None,
            bus: EventBus::new(),
        }
    }

    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    pub fn with_quests(mut self, quests: Box<dyn QuestHooks + Send>) -> Self {
        self.quests = Some(quests);
        self
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    pub fn local(&self) -> PlayerId {
        self.registry.local()
    }

    pub fn player(&self, id: PlayerId) -> Result<&PlayerState> {
        Ok(self.registry.get(id)?)
    }

    /// Adds a player, local or mirrored.
    pub fn join(&mut self, player: PlayerState) -> Result<()> {
        let id = player.id;
        self.registry.insert(player)?;
        tracing::info!(player = id.0, "player joined");
        self.bus
            .publish(Event::Session(SessionEvent::PlayerJoined { player: id }));
        Ok(())
    }

    pub fn leave(&mut self, id: PlayerId) -> Option<PlayerState> {
        let player = self.registry.remove(id)?;
        tracing::info!(player = id.0, "player left");
        self.bus
            .publish(Event::Session(SessionEvent::PlayerLeft { player: id }));
        Some(player)
    }

    /// Runs `op` against the local player and publishes its commands.
    fn run<T, E>(
        &mut self,
        name: &'static str,
        op: impl FnOnce(&mut InventoryEngine<'_>, InventoryEnv<'_>, PlayerId) -> std::result::Result<(Outcome, T), E>,
    ) -> Result<(Outcome, T)>
    where
        E: GameError + Into<RuntimeError>,
    {
        let player = self.registry.local();
        let result = {
            let env = InventoryEnv::new(&self.config, &*self.catalog);
            let mut engine = InventoryEngine::new(&mut self.registry);
            if let Some(quests) = self.quests.as_deref_mut() {
                engine = engine.with_quests(quests);
            }
            op(&mut engine, env, player)
        };

        match result {
            Ok((outcome, value)) => {
                self.publish(player, &outcome.commands);
                Ok((outcome, value))
            }
            Err(error) => {
                tracing::debug!(
                    op = name,
                    code = error.error_code(),
                    severity = %error.severity(),
                    %error,
                    "operation rejected"
                );
                Err(error.into())
            }
        }
    }

    fn publish(&self, player: PlayerId, commands: &[NetCommand]) {
        for command in commands {
            tracing::debug!(player = player.0, kind = command.kind(), "publishing command");
            self.bus.publish(Event::Replicated(Replicated {
                player,
                command: command.clone(),
            }));
        }
    }

    pub fn paste(&mut self, slot: SlotId) -> Result<Outcome> {
        self.run("paste", |engine, env, player| {
            engine.paste(env, player, slot).map(|outcome| (outcome, ()))
        })
        .map(|(outcome, ())| outcome)
    }

    pub fn paste_at(&mut self, x: i32, y: i32) -> Result<Outcome> {
        self.run("paste_at", |engine, env, player| {
            engine.paste_at(env, player, x, y).map(|outcome| (outcome, ()))
        })
        .map(|(outcome, ())| outcome)
    }

    pub fn cut(&mut self, slot: SlotId, automatic: bool) -> Result<Outcome> {
        self.run("cut", |engine, env, player| {
            engine
                .cut(env, player, slot, automatic)
                .map(|outcome| (outcome, ()))
        })
        .map(|(outcome, ())| outcome)
    }

    pub fn cut_at(&mut self, x: i32, y: i32, automatic: bool) -> Result<Outcome> {
        self.run("cut_at", |engine, env, player| {
            engine
                .cut_at(env, player, x, y, automatic)
                .map(|outcome| (outcome, ()))
        })
        .map(|(outcome, ())| outcome)
    }

    /// Lifts a ground item onto the cursor. Returns the item that was held
    /// before, which belongs on the ground now.
    pub fn grab(&mut self, ground: &Item) -> Result<(Outcome, Option<Item>)> {
        self.run("grab", |engine, env, player| engine.grab(env, player, ground))
    }

    pub fn auto_pick_up(&mut self, ground: &Item) -> Result<(Outcome, PickupResult)> {
        self.run("auto_pick_up", |engine, env, player| {
            engine.auto_pick_up(env, player, ground)
        })
    }

    pub fn put_held(&mut self, position: TilePosition) -> Result<(Outcome, Item)> {
        self.run("put_held", |engine, _, player| engine.put_held(player, position))
    }

    pub fn request_pick_up(&mut self, position: TilePosition, ground: &Item) -> Result<Outcome> {
        self.run("request_pick_up", |engine, _, player| {
            engine
                .request_pick_up(player, position, ground)
                .map(|outcome| (outcome, ()))
        })
        .map(|(outcome, ())| outcome)
    }

    pub fn use_item(&mut self, slot: SlotId) -> Result<(Outcome, UsedItem)> {
        self.run("use_item", |engine, _, player| engine.use_item(player, slot))
    }

    pub fn split_gold(&mut self, slot: SlotId, amount: u32) -> Result<Outcome> {
        self.run("split_gold", |engine, _, player| {
            engine
                .split_gold(player, slot, amount)
                .map(|outcome| (outcome, ()))
        })
        .map(|(outcome, ())| outcome)
    }

    pub fn weapon_auto_place(&mut self) -> Result<(Outcome, Option<BodyLocation>)> {
        self.run("weapon_auto_place", |engine, _, player| {
            engine.weapon_auto_place(player)
        })
    }

    pub fn remove_scroll(&mut self, spell: SpellId) -> Result<Option<Item>> {
        let player = self.registry.local();
        Ok(InventoryEngine::new(&mut self.registry).remove_scroll(player, spell)?)
    }

    pub fn use_staff_charge(&mut self, spell: SpellId) -> Result<bool> {
        let player = self.registry.local();
        Ok(InventoryEngine::new(&mut self.registry).use_staff_charge(player, spell)?)
    }

    /// Applies a peer's command to its mirrored player.
    ///
    /// Returns the ground item for commands that drop one.
    pub fn apply_remote(&mut self, replicated: &Replicated) -> Result<Option<Item>> {
        let env = InventoryEnv::new(&self.config, &*self.catalog);
        let result = InventoryEngine::new(&mut self.registry).apply_remote(env, replicated);
        match result {
            Ok(ground) => {
                tracing::debug!(
                    player = replicated.player.0,
                    kind = replicated.command.kind(),
                    "applied remote command"
                );
                Ok(ground)
            }
            Err(error) => {
                tracing::warn!(
                    player = replicated.player.0,
                    kind = replicated.command.kind(),
                    code = error.error_code(),
                    %error,
                    "rejected remote command"
                );
                Err(error.into())
            }
        }
    }

    /// Hex SHA-256 of a player's body slots, comparable across peers.
    pub fn equipment_digest(&self, id: PlayerId) -> Result<String> {
        Ok(hex::encode(self.registry.get(id)?.equipment_digest()?))
    }

    /// Saves the local player under `name`.
    pub fn save_local(&self, repository: &dyn HeroRepository, name: &str) -> Result<()> {
        let player = self.registry.local();
        let packed = self.registry.get(player)?.pack();
        repository.save(name, &packed)?;
        tracing::info!(player = player.0, name, "hero saved");
        self.bus.publish(Event::Session(SessionEvent::HeroSaved {
            player,
            name: name.to_owned(),
        }));
        Ok(())
    }

    /// Loads hero `name` into slot `id`, replacing whoever was there.
    pub fn load_hero(
        &mut self,
        repository: &dyn HeroRepository,
        name: &str,
        id: PlayerId,
    ) -> Result<()> {
        let packed = repository
            .load(name)?
            .ok_or_else(|| RuntimeError::HeroNotFound(name.to_owned()))?;
        let env = InventoryEnv::new(&self.config, &*self.catalog);
        let player = PlayerState::unpack(&env, id, &packed)?;
        self.registry.insert(player)?;
        tracing::info!(player = id.0, name, "hero loaded");
        self.bus.publish(Event::Session(SessionEvent::HeroLoaded {
            player: id,
            name: name.to_owned(),
        }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Topic;
    use crate::repository::InMemoryHeroRepository;
    use inventory_core::testing::{fixtures, items, players};
    use inventory_core::{GridSlot, TransferError};

    fn session() -> Session {
        let mut session = Session::new(GameConfig::default(), Arc::new(fixtures()), PlayerId(0));
        session.join(players::warrior(0)).unwrap();
        session
    }

    #[tokio::test]
    async fn committed_operations_publish_commands() {
        let catalog = fixtures();
        let mut session = session();
        let mut rx = session.bus().subscribe(Topic::Replication);

        session.grab(&items::cap(&catalog)).unwrap();
        session.paste(SlotId::Body(BodyLocation::Head)).unwrap();

        let Event::Replicated(replicated) = rx.recv().await.unwrap() else {
            panic!("expected a replication event");
        };
        assert_eq!(replicated.player, PlayerId(0));
        assert!(matches!(
            replicated.command,
            NetCommand::ChangeItem {
                location: BodyLocation::Head,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn rejected_operations_publish_nothing() {
        let catalog = fixtures();
        let mut session = session();
        let mut rx = session.bus().subscribe(Topic::Replication);

        session.grab(&items::ring(&catalog)).unwrap();
        let error = session.paste(SlotId::Body(BodyLocation::Head)).unwrap_err();
        assert!(matches!(
            error,
            RuntimeError::Transfer(TransferError::IncompatibleSlot)
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn save_and_reload_local_hero() {
        let catalog = fixtures();
        let repository = InMemoryHeroRepository::new();
        let mut session = session();
        session.auto_pick_up(&items::quilted_armor(&catalog)).unwrap();
        session.auto_pick_up(&items::gold(&catalog, 300)).unwrap();
        session.save_local(&repository, "aldric").unwrap();

        let mut other = Session::new(GameConfig::default(), Arc::new(fixtures()), PlayerId(3));
        other.load_hero(&repository, "aldric", PlayerId(0)).unwrap();
        assert_eq!(
            other.player(PlayerId(0)).unwrap(),
            session.player(PlayerId(0)).unwrap()
        );
        assert_eq!(other.player(PlayerId(0)).unwrap().inventory.gold(), 300);
        assert!(matches!(
            other.load_hero(&repository, "nobody", PlayerId(1)),
            Err(RuntimeError::HeroNotFound(_))
        ));
    }

    #[test]
    fn split_gold_through_session() {
        let catalog = fixtures();
        let mut session = session();
        session.auto_pick_up(&items::gold(&catalog, 900)).unwrap();
        session
            .split_gold(SlotId::Grid(GridSlot::new(39).unwrap()), 400)
            .unwrap();

        let player = session.player(PlayerId(0)).unwrap();
        assert_eq!(player.inventory.held().map(|gold| gold.value), Some(400));
        assert_eq!(player.inventory.gold(), 500);
    }
}
