//! Body slot compatibility.
//!
//! Predicates here never mutate. The committing helpers take the item by
//! value and hand it back when it cannot be worn.

use crate::config::GameConfig;
use crate::engine::Effects;
use crate::item::{EquipClass, Item, ItemClass};
use crate::state::{BodyLocation, ClassCapabilities, PlayerState};

/// The item is wearable at all and its owner meets its requirements.
pub fn can_equip_item(item: &Item) -> bool {
    item.is_equipment() && item.stat_flag
}

/// Whether a weapon or shield fits the player's free hand.
pub fn can_wield(player: &PlayerState, item: &Item) -> bool {
    if !can_equip_item(item) || !matches!(item.location, EquipClass::OneHand | EquipClass::TwoHand)
    {
        return false;
    }

    let left = player.inventory.body(BodyLocation::HandLeft);
    let right = player.inventory.body(BodyLocation::HandRight);
    let occupied = match (left, right) {
        (None, None) => return true,
        (Some(_), Some(_)) => return false,
        (Some(occupied), None) | (None, Some(occupied)) => occupied,
    };

    if player.has(ClassCapabilities::ONE_HAND_LARGE_WEAPONS)
        && occupied.is_shield()
        && item.is_sword_or_mace()
    {
        return true;
    }

    let one_handed_sword_or_mace =
        |item: &Item| item.location == EquipClass::OneHand && item.is_sword_or_mace();
    if player.has(ClassCapabilities::DUAL_WIELD)
        && one_handed_sword_or_mace(occupied)
        && one_handed_sword_or_mace(item)
    {
        return true;
    }

    item.location == EquipClass::OneHand
        && occupied.location == EquipClass::OneHand
        && item.class != occupied.class
}

/// Whether `item` can go into the empty body slot `location` right now.
pub fn can_equip(player: &PlayerState, item: &Item, location: BodyLocation) -> bool {
    if !can_equip_item(item)
        || !player.mode.allows_inventory()
        || !player.inventory.is_body_empty(location)
    {
        return false;
    }

    match location {
        BodyLocation::HandLeft | BodyLocation::HandRight => can_wield(player, item),
        BodyLocation::Head => item.location == EquipClass::Helm,
        BodyLocation::RingLeft | BodyLocation::RingRight => item.location == EquipClass::Ring,
        BodyLocation::Amulet => item.location == EquipClass::Amulet,
        BodyLocation::Chest => item.location == EquipClass::Armor,
    }
}

/// First body slot that would accept `item`, trying slots head first.
pub fn find_equip_location(player: &PlayerState, item: &Item) -> Option<BodyLocation> {
    if !can_equip_item(item) {
        return None;
    }
    BodyLocation::ALL
        .into_iter()
        .find(|&location| can_equip(player, item, location))
}

/// Whether automatic pick up may equip this kind of item for this player.
pub fn auto_equip_enabled(config: &GameConfig, player: &PlayerState, item: &Item) -> bool {
    let options = &config.auto_equip;
    if item.is_weapon() {
        !player.has(ClassCapabilities::PREFERS_UNARMED) && options.weapons
    } else if item.is_armor() {
        options.armor
    } else if item.is_helm() {
        options.helms
    } else if item.is_shield() {
        options.shields
    } else if item.is_jewelry() {
        options.jewelry
    } else {
        true
    }
}

/// Equips `item` in a specific slot.
pub(crate) fn auto_equip_at(
    config: &GameConfig,
    player: &mut PlayerState,
    item: Item,
    location: BodyLocation,
    effects: &mut Effects,
) -> Result<BodyLocation, Item> {
    if !can_equip(player, &item, location) {
        return Err(item);
    }

    if config.auto_equip_sound {
        effects.flip(&item);
    }
    player.inventory.set_body(location, Some(item));
    effects.body_changed(player, location);
    player.recalculate();
    Ok(location)
}

/// Equips `item` in the first slot that accepts it.
pub(crate) fn auto_equip(
    config: &GameConfig,
    player: &mut PlayerState,
    item: Item,
    effects: &mut Effects,
) -> Result<BodyLocation, Item> {
    match find_equip_location(player, &item) {
        Some(location) => auto_equip_at(config, player, item, location, effects),
        None => Err(item),
    }
}

/// Moves the held weapon into a free hand without displacing anything.
pub(crate) fn weapon_auto_place(player: &mut PlayerState, effects: &mut Effects) -> Option<BodyLocation> {
    if player.has(ClassCapabilities::PREFERS_UNARMED) {
        return None;
    }
    let held = player.inventory.held()?;
    let inventory = &player.inventory;
    let left = inventory.body(BodyLocation::HandLeft);
    let right = inventory.body(BodyLocation::HandRight);

    let location = if player.grips_one_handed(held) {
        let holds_weapon = |item: Option<&Item>| item.is_some_and(|i| i.class == ItemClass::Weapon);
        if !player.has(ClassCapabilities::DUAL_WIELD) && (holds_weapon(left) || holds_weapon(right))
        {
            return None;
        }
        if left.is_none() {
            BodyLocation::HandLeft
        } else if right.is_none() && !left.is_some_and(Item::is_two_handed) {
            BodyLocation::HandRight
        } else {
            return None;
        }
    } else if left.is_none() && right.is_none() {
        BodyLocation::HandLeft
    } else {
        return None;
    };

    let item = player.inventory.take_held()?;
    player.inventory.set_body(location, Some(item));
    effects.body_changed(player, location);
    player.recalculate();
    Some(location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PlayerClass, PlayerMode};
    use crate::testing::{fixtures, items, players};

    fn usable(mut item: Item) -> Item {
        item.stat_flag = true;
        item
    }

    #[derive(Clone, Copy, Debug)]
    enum Hands {
        Empty,
        Left,
        Right,
        Both,
    }

    fn with_hands(class: PlayerClass, hands: Hands, occupant: &Item) -> PlayerState {
        let mut player = players::of_class(class, 0);
        let (left, right) = match hands {
            Hands::Empty => (false, false),
            Hands::Left => (true, false),
            Hands::Right => (false, true),
            Hands::Both => (true, true),
        };
        if left {
            player
                .inventory
                .set_body(BodyLocation::HandLeft, Some(occupant.clone()));
        }
        if right {
            player
                .inventory
                .set_body(BodyLocation::HandRight, Some(occupant.clone()));
        }
        player
    }

    #[test]
    fn can_wield_truth_table() {
        let catalog = fixtures();
        let sword = usable(items::short_sword(&catalog));
        let great_sword = usable(items::great_sword(&catalog));
        let shield = usable(items::buckler(&catalog));
        let mace = usable(items::mace(&catalog));

        use Hands::*;
        // (class, hands, occupant, candidate, expected)
        let cases = [
            // ordinary one-hander next to a shield
            (PlayerClass::Warrior, Empty, &shield, &sword, true),
            (PlayerClass::Warrior, Left, &shield, &sword, true),
            (PlayerClass::Warrior, Right, &shield, &sword, true),
            (PlayerClass::Warrior, Both, &shield, &sword, false),
            // ordinary two-hander
            (PlayerClass::Warrior, Empty, &shield, &great_sword, true),
            (PlayerClass::Warrior, Left, &shield, &great_sword, false),
            (PlayerClass::Warrior, Right, &shield, &great_sword, false),
            (PlayerClass::Warrior, Both, &shield, &great_sword, false),
            // barbarian large weapon with a shield
            (PlayerClass::Barbarian, Empty, &shield, &great_sword, true),
            (PlayerClass::Barbarian, Left, &shield, &great_sword, true),
            (PlayerClass::Barbarian, Right, &shield, &great_sword, true),
            (PlayerClass::Barbarian, Both, &shield, &great_sword, false),
            (PlayerClass::Barbarian, Right, &sword, &great_sword, false),
            // bard dual wield
            (PlayerClass::Bard, Empty, &sword, &mace, true),
            (PlayerClass::Bard, Left, &sword, &mace, true),
            (PlayerClass::Bard, Right, &sword, &mace, true),
            (PlayerClass::Bard, Both, &sword, &mace, false),
            // same class weapons without the capability
            (PlayerClass::Warrior, Left, &sword, &mace, false),
            (PlayerClass::Warrior, Right, &sword, &mace, false),
        ];

        for (class, hands, occupant, candidate, expected) in cases {
            let player = with_hands(class, hands, occupant);
            assert_eq!(
                can_wield(&player, candidate),
                expected,
                "{class:?} {hands:?} holding {:?} wielding {:?}",
                occupant.item_type,
                candidate.item_type
            );
        }
    }

    #[test]
    fn can_wield_rejects_unmet_requirements() {
        let catalog = fixtures();
        let player = players::warrior(0);
        let sword = items::short_sword(&catalog);
        assert!(!sword.stat_flag);
        assert!(!can_wield(&player, &sword));
    }

    #[test]
    fn can_equip_matches_slot_class() {
        let catalog = fixtures();
        let player = players::warrior(0);
        let cap = usable(items::cap(&catalog));
        let ring = usable(items::ring(&catalog));
        let amulet = usable(items::amulet(&catalog));
        let armor = usable(items::quilted_armor(&catalog));

        assert!(can_equip(&player, &cap, BodyLocation::Head));
        assert!(!can_equip(&player, &cap, BodyLocation::Chest));
        assert!(can_equip(&player, &ring, BodyLocation::RingLeft));
        assert!(can_equip(&player, &ring, BodyLocation::RingRight));
        assert!(!can_equip(&player, &ring, BodyLocation::Amulet));
        assert!(can_equip(&player, &amulet, BodyLocation::Amulet));
        assert!(can_equip(&player, &armor, BodyLocation::Chest));
        assert!(!can_equip(&player, &armor, BodyLocation::HandLeft));
    }

    #[test]
    fn can_equip_requires_idle_player_and_empty_slot() {
        let catalog = fixtures();
        let cap = usable(items::cap(&catalog));

        let mut player = players::warrior(0);
        player.mode = PlayerMode::Attack;
        assert!(!can_equip(&player, &cap, BodyLocation::Head));

        let mut player = players::warrior(0);
        player.inventory.set_body(BodyLocation::Head, Some(cap.clone()));
        assert!(!can_equip(&player, &cap, BodyLocation::Head));
    }

    #[test]
    fn find_equip_location_prefers_first_ring_slot() {
        let catalog = fixtures();
        let mut player = players::warrior(0);
        let ring = usable(items::ring(&catalog));
        assert_eq!(find_equip_location(&player, &ring), Some(BodyLocation::RingLeft));

        player.inventory.set_body(BodyLocation::RingLeft, Some(ring.clone()));
        assert_eq!(find_equip_location(&player, &ring), Some(BodyLocation::RingRight));

        player.inventory.set_body(BodyLocation::RingRight, Some(ring.clone()));
        assert_eq!(find_equip_location(&player, &ring), None);
    }

    #[test]
    fn auto_equip_commits_and_announces() {
        let catalog = fixtures();
        let config = GameConfig::default();
        let mut player = players::warrior(0);
        let mut effects = Effects::new(&player, true);
        let cap = usable(items::cap(&catalog));

        let result = auto_equip(&config, &mut player, cap, &mut effects);
        assert_eq!(result, Ok(BodyLocation::Head));

        let outcome = effects.finish(&player);
        assert_eq!(outcome.commands.len(), 1);
        assert!(outcome.sounds.is_empty());
        assert!(player.inventory.body(BodyLocation::Head).unwrap().stat_flag);
    }

    #[test]
    fn auto_equip_returns_item_when_nothing_fits() {
        let catalog = fixtures();
        let config = GameConfig::default();
        let mut player = players::warrior(0);
        let mut effects = Effects::new(&player, true);
        let potion = usable(items::healing_potion(&catalog));

        assert_eq!(
            auto_equip(&config, &mut player, potion.clone(), &mut effects),
            Err(potion)
        );
        assert!(effects.finish(&player).commands.is_empty());
    }

    #[test]
    fn auto_equip_toggles_by_category() {
        let catalog = fixtures();
        let mut config = GameConfig::default();
        let warrior = players::warrior(0);
        let monk = players::of_class(PlayerClass::Monk, 0);
        let sword = items::short_sword(&catalog);
        let armor = items::quilted_armor(&catalog);
        let potion = items::healing_potion(&catalog);

        assert!(auto_equip_enabled(&config, &warrior, &sword));
        assert!(!auto_equip_enabled(&config, &monk, &sword));
        assert!(!auto_equip_enabled(&config, &warrior, &armor));
        assert!(auto_equip_enabled(&config, &warrior, &potion));

        config.auto_equip.armor = true;
        config.auto_equip.weapons = false;
        assert!(auto_equip_enabled(&config, &warrior, &armor));
        assert!(!auto_equip_enabled(&config, &warrior, &sword));
    }

    #[test]
    fn weapon_auto_place_fills_free_hand() {
        let catalog = fixtures();
        let mut player = players::warrior(0);
        player
            .inventory
            .set_body(BodyLocation::HandLeft, Some(usable(items::buckler(&catalog))));
        player.inventory.set_held(Some(usable(items::short_sword(&catalog))));
        let mut effects = Effects::new(&player, true);

        assert_eq!(
            weapon_auto_place(&mut player, &mut effects),
            Some(BodyLocation::HandRight)
        );
        assert!(!player.inventory.is_holding());
    }

    #[test]
    fn weapon_auto_place_refuses_second_weapon() {
        let catalog = fixtures();
        let mut player = players::warrior(0);
        player
            .inventory
            .set_body(BodyLocation::HandLeft, Some(usable(items::short_sword(&catalog))));
        player.inventory.set_held(Some(usable(items::mace(&catalog))));
        let mut effects = Effects::new(&player, true);

        assert_eq!(weapon_auto_place(&mut player, &mut effects), None);
        assert!(player.inventory.is_holding());

        let mut bard = players::of_class(PlayerClass::Bard, 0);
        bard.inventory
            .set_body(BodyLocation::HandLeft, Some(usable(items::short_sword(&catalog))));
        bard.inventory.set_held(Some(usable(items::mace(&catalog))));
        let mut effects = Effects::new(&bard, true);
        assert_eq!(
            weapon_auto_place(&mut bard, &mut effects),
            Some(BodyLocation::HandRight)
        );
    }
}
