//! Deterministic item regeneration.
//!
//! Replication and save files carry only the creation parameters of an item.
//! Every peer regenerates the rest here, so this must stay a pure function of
//! its arguments.

use super::{BuffFlags, CreateInfo, Item, ItemBonuses, Meter, Quality};
use crate::env::{ItemDefinition, PcgRng, RngOracle, Roll, compute_seed};

/// Rebuilds an item from its definition and creation parameters.
///
/// `value` is only meaningful for gold, where it is the stack size. Other
/// items take their value from the definition.
pub fn recreate_item(
    definition: &ItemDefinition,
    create_info: CreateInfo,
    seed: u32,
    value: u32,
    buff: BuffFlags,
) -> Item {
    let rng = PcgRng;
    let id = definition.id;

    let mut item = Item {
        id,
        seed,
        create_info,
        buff,
        item_type: definition.item_type,
        class: definition.class,
        location: definition.location,
        quality: Quality::Normal,
        misc: definition.misc,
        spell: definition.spell,
        graphic: definition.graphic,
        footprint: definition.footprint,
        sound: definition.sound,
        usable: definition.usable,
        identified: false,
        requirements: definition.requirements,
        durability: Meter::full(definition.durability),
        charges: Meter::full(definition.charges),
        value: definition.value,
        bonuses: ItemBonuses {
            max_damage: definition.max_damage,
            ..ItemBonuses::default()
        },
        stat_flag: false,
    };

    if item.is_gold() {
        item.value = value;
        item.refresh_gold_graphic();
        return item;
    }

    let range = definition.armor_class;
    if range.max > 0 {
        let roll_seed = compute_seed(seed, id.0, Roll::ArmorClass);
        item.bonuses.armor_class =
            rng.range(roll_seed, i32::from(range.min), i32::from(range.max)) as i16;
    }

    if !item.is_equipment() {
        return item;
    }

    let level = u32::from(create_info.level());
    item.quality = if create_info.contains(CreateInfo::UNIQUE) {
        Quality::Unique
    } else if create_info.intersects(CreateInfo::ONLY_GOOD | CreateInfo::UPPER15) {
        Quality::Magic
    } else if rng.roll_d100(compute_seed(seed, id.0, Roll::Quality)) <= 10 + level {
        Quality::Magic
    } else {
        Quality::Normal
    };

    if item.quality != Quality::Normal {
        let roll_seed = compute_seed(seed, id.0, Roll::ToHit);
        item.bonuses.to_hit = rng.range(roll_seed, 1, 5 + level as i32 / 2) as i16;
    }

    item
}

/// Seed given to a gold stack split off an existing one.
pub fn split_seed(seed: u32) -> u32 {
    PcgRng.next_u32(compute_seed(seed, 0, Roll::SplitStack))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{BonusRange, ItemOracle};
    use crate::item::{EquipClass, Footprint, ItemClass, ItemId, ItemType};
    use crate::testing::{fixtures, ids};

    fn plate() -> ItemDefinition {
        let mut def = ItemDefinition::new(
            ItemId(900),
            "Test Plate",
            ItemType::HeavyArmor,
            ItemClass::Armor,
            EquipClass::Armor,
            Footprint::new(2, 3),
        );
        def.armor_class = BonusRange::new(40, 60);
        def.durability = 75;
        def
    }

    #[test]
    fn same_inputs_give_identical_items() {
        let def = plate();
        let info = CreateInfo::default().with_level(12);
        let a = recreate_item(&def, info, 0xdead_beef, 0, BuffFlags::empty());
        let b = recreate_item(&def, info, 0xdead_beef, 0, BuffFlags::empty());
        assert_eq!(a, b);
        assert!((40..=60).contains(&a.bonuses.armor_class));
        assert_eq!(a.durability, Meter::full(75));
    }

    #[test]
    fn unique_flag_forces_unique_quality() {
        let def = plate();
        let item = recreate_item(&def, CreateInfo::UNIQUE, 7, 0, BuffFlags::empty());
        assert_eq!(item.quality, Quality::Unique);
        assert!(item.bonuses.to_hit >= 1);
    }

    #[test]
    fn gold_keeps_requested_value_and_graphic() {
        let catalog = fixtures();
        let def = catalog.definition(ids::GOLD).expect("gold fixture");
        let item = recreate_item(def, CreateInfo::default(), 1, 2400, BuffFlags::HELLFIRE);
        assert_eq!(item.value, 2400);
        assert_eq!(item.graphic, Item::GOLD_MEDIUM_GRAPHIC);
        assert_eq!(item.buff, BuffFlags::HELLFIRE);
        assert_eq!(item.quality, Quality::Normal);
    }

    #[test]
    fn split_seed_is_stable_and_fresh() {
        assert_eq!(split_seed(55), split_seed(55));
        assert_ne!(split_seed(55), 55);
    }
}
