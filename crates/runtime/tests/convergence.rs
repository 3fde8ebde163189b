//! Two peers mirroring each other's players through the event bus.

use std::sync::Arc;

use inventory_core::testing::{fixtures, items, players};
use inventory_core::{
    BodyLocation, GameConfig, GridSlot, PlayerClass, PlayerId, SlotId, TilePosition,
};
use inventory_runtime::{Event, Session, Topic};
use tokio::sync::broadcast::Receiver;

fn peer(local: PlayerId) -> Session {
    peer_with(local, PlayerClass::Warrior)
}

/// Player 0 has `class`, player 1 is a warrior.
fn peer_with(local: PlayerId, class: PlayerClass) -> Session {
    let mut session = Session::new(GameConfig::default(), Arc::new(fixtures()), local);
    session.join(players::of_class(class, 0)).unwrap();
    session.join(players::warrior(1)).unwrap();
    session
}

/// Applies everything `from` has published so far to `to`.
fn forward(rx: &mut Receiver<Event>, to: &mut Session) -> usize {
    let mut applied = 0;
    while let Ok(event) = rx.try_recv() {
        if let Event::Replicated(replicated) = event {
            to.apply_remote(&replicated).unwrap();
            applied += 1;
        }
    }
    applied
}

#[tokio::test]
async fn peers_converge_on_equipment() {
    let catalog = fixtures();
    let mut alice = peer(PlayerId(0));
    let mut bob = peer(PlayerId(1));
    let mut from_alice = alice.bus().subscribe(Topic::Replication);
    let mut from_bob = bob.bus().subscribe(Topic::Replication);

    // Alice equips a cap and a two-handed sword, then swaps in a shield.
    alice.grab(&items::cap(&catalog)).unwrap();
    alice.paste(SlotId::Body(BodyLocation::Head)).unwrap();
    alice.grab(&items::great_sword(&catalog)).unwrap();
    alice.paste(SlotId::Body(BodyLocation::HandLeft)).unwrap();
    alice.grab(&items::buckler(&catalog)).unwrap();
    alice.paste(SlotId::Body(BodyLocation::HandRight)).unwrap();
    alice.paste(SlotId::Grid(GridSlot::new(0).unwrap())).unwrap();

    // Bob picks up armor, wears it, then takes it off again.
    bob.auto_pick_up(&items::quilted_armor(&catalog)).unwrap();
    bob.cut(SlotId::Grid(GridSlot::new(20).unwrap()), false).unwrap();
    bob.paste(SlotId::Body(BodyLocation::Chest)).unwrap();
    bob.grab(&items::ring(&catalog)).unwrap();
    bob.paste(SlotId::Body(BodyLocation::RingLeft)).unwrap();
    bob.cut(SlotId::Body(BodyLocation::Chest), true).unwrap();

    assert!(forward(&mut from_alice, &mut bob) > 0);
    assert!(forward(&mut from_bob, &mut alice) > 0);

    for id in [PlayerId(0), PlayerId(1)] {
        assert_eq!(
            alice.equipment_digest(id).unwrap(),
            bob.equipment_digest(id).unwrap(),
            "player {id:?} diverged"
        );
    }

    let mirrored = bob.player(PlayerId(0)).unwrap();
    assert!(mirrored.inventory.body(BodyLocation::Head).is_some());
    assert!(mirrored.inventory.body(BodyLocation::HandRight).is_some());
    assert!(mirrored.inventory.body(BodyLocation::HandLeft).is_none());
}

#[tokio::test]
async fn barbarian_shield_survives_on_the_mirror() {
    let catalog = fixtures();
    let mut alice = peer_with(PlayerId(0), PlayerClass::Barbarian);
    let mut bob = peer_with(PlayerId(1), PlayerClass::Barbarian);
    let mut from_alice = alice.bus().subscribe(Topic::Replication);

    alice.grab(&items::buckler(&catalog)).unwrap();
    alice.paste(SlotId::Body(BodyLocation::HandRight)).unwrap();
    alice.grab(&items::great_sword(&catalog)).unwrap();
    alice.paste(SlotId::Body(BodyLocation::HandLeft)).unwrap();

    let local = alice.player(PlayerId(0)).unwrap();
    assert!(local.inventory.body(BodyLocation::HandRight).is_some());

    assert!(forward(&mut from_alice, &mut bob) > 0);
    assert_eq!(
        alice.equipment_digest(PlayerId(0)).unwrap(),
        bob.equipment_digest(PlayerId(0)).unwrap()
    );
    let mirrored = bob.player(PlayerId(0)).unwrap();
    assert!(mirrored.inventory.body(BodyLocation::HandLeft).is_some());
    assert!(mirrored.inventory.body(BodyLocation::HandRight).is_some());
}

#[tokio::test]
async fn dropped_items_reach_the_other_peer() {
    let catalog = fixtures();
    let mut alice = peer(PlayerId(0));
    let mut bob = peer(PlayerId(1));
    let mut from_alice = alice.bus().subscribe(Topic::Replication);

    alice.grab(&items::healing_potion(&catalog)).unwrap();
    let position = TilePosition { x: 12, y: 7 };
    let (_, dropped) = alice.put_held(position).unwrap();

    let Event::Replicated(replicated) = from_alice.recv().await.unwrap() else {
        panic!("expected a replication event");
    };
    let ground = bob.apply_remote(&replicated).unwrap().unwrap();
    assert_eq!(ground.id, dropped.id);
    assert_eq!(ground.seed, dropped.seed);
}

#[tokio::test]
async fn peers_refuse_commands_for_their_own_player() {
    let catalog = fixtures();
    let mut alice = peer(PlayerId(0));
    let mut bob = peer(PlayerId(1));
    let mut from_alice = alice.bus().subscribe(Topic::Replication);

    alice.grab(&items::cap(&catalog)).unwrap();
    alice.paste(SlotId::Body(BodyLocation::Head)).unwrap();
    let Event::Replicated(mut replicated) = from_alice.recv().await.unwrap() else {
        panic!("expected a replication event");
    };
    replicated.player = PlayerId(1);

    assert!(bob.apply_remote(&replicated).is_err());
    assert!(bob.player(PlayerId(1)).unwrap().inventory.body(BodyLocation::Head).is_none());
}
