//! Fixture catalog and player builders shared by unit and integration tests.

use crate::env::{BonusRange, ItemCatalog, ItemDefinition, ItemOracle};
use crate::item::{
    BuffFlags, CreateInfo, EquipClass, Footprint, InvSound, Item, ItemClass, ItemId, ItemType,
    MiscKind, Requirements, SpellId, recreate_item,
};

pub mod ids {
    use crate::item::ItemId;

    pub const GOLD: ItemId = ItemId(0);
    pub const HEALING_POTION: ItemId = ItemId(1);
    pub const DAGGER: ItemId = ItemId(2);
    pub const SHORT_SWORD: ItemId = ItemId(3);
    pub const LONG_BOW: ItemId = ItemId(4);
    pub const BUCKLER: ItemId = ItemId(5);
    pub const QUILTED_ARMOR: ItemId = ItemId(6);
    pub const GREAT_SWORD: ItemId = ItemId(7);
    pub const MACE: ItemId = ItemId(8);
    pub const CAP: ItemId = ItemId(9);
    pub const RING: ItemId = ItemId(10);
    pub const AMULET: ItemId = ItemId(11);
    pub const SCROLL_OF_HEALING: ItemId = ItemId(12);
    pub const CHARGED_STAFF: ItemId = ItemId(13);
    pub const NOTE: ItemId = ItemId(14);
}

pub const HEALING_SPELL: SpellId = SpellId(2);
pub const LIGHTNING_SPELL: SpellId = SpellId(3);

fn definition(
    id: ItemId,
    name: &str,
    kind: (ItemType, ItemClass, EquipClass),
    size: (u8, u8),
    graphic: u16,
    sound: InvSound,
) -> ItemDefinition {
    let (item_type, class, location) = kind;
    let mut def = ItemDefinition::new(
        id,
        name,
        item_type,
        class,
        location,
        Footprint::new(size.0, size.1),
    );
    def.graphic = graphic;
    def.sound = sound;
    def
}

fn consumable(id: ItemId, name: &str, misc: MiscKind, graphic: u16, sound: InvSound) -> ItemDefinition {
    let mut def = definition(
        id,
        name,
        (ItemType::Misc, ItemClass::Misc, EquipClass::Unequipable),
        (1, 1),
        graphic,
        sound,
    );
    def.misc = misc;
    def.usable = true;
    def
}

/// A small catalog covering every footprint and slot class.
pub fn fixtures() -> ItemCatalog {
    use EquipClass::*;

    let mut gold = definition(
        ids::GOLD,
        "Gold",
        (ItemType::Gold, ItemClass::Gold, Unequipable),
        (1, 1),
        Item::GOLD_SMALL_GRAPHIC,
        InvSound::Gold,
    );
    gold.usable = true;

    let mut potion = consumable(ids::HEALING_POTION, "Potion of Healing", MiscKind::Potion, 32, InvSound::Potion);
    potion.value = 50;

    let mut dagger = definition(
        ids::DAGGER,
        "Dagger",
        (ItemType::Sword, ItemClass::Weapon, OneHand),
        (1, 2),
        51,
        InvSound::Sword,
    );
    dagger.max_damage = 4;
    dagger.durability = 16;

    let mut short_sword = definition(
        ids::SHORT_SWORD,
        "Short Sword",
        (ItemType::Sword, ItemClass::Weapon, OneHand),
        (1, 3),
        64,
        InvSound::Sword,
    );
    short_sword.requirements = Requirements::new(18, 0, 0);
    short_sword.max_damage = 6;
    short_sword.durability = 24;

    let mut long_bow = definition(
        ids::LONG_BOW,
        "Long Bow",
        (ItemType::Bow, ItemClass::Weapon, TwoHand),
        (2, 3),
        118,
        InvSound::Bow,
    );
    long_bow.requirements = Requirements::new(25, 0, 30);
    long_bow.max_damage = 5;
    long_bow.durability = 35;

    let mut buckler = definition(
        ids::BUCKLER,
        "Buckler",
        (ItemType::Shield, ItemClass::Armor, OneHand),
        (2, 2),
        83,
        InvSound::Shield,
    );
    buckler.armor_class = BonusRange::new(1, 5);
    buckler.durability = 16;

    let mut quilted = definition(
        ids::QUILTED_ARMOR,
        "Quilted Armor",
        (ItemType::LightArmor, ItemClass::Armor, Armor),
        (2, 3),
        129,
        InvSound::LightArmor,
    );
    quilted.armor_class = BonusRange::new(7, 10);
    quilted.durability = 30;

    let mut great_sword = definition(
        ids::GREAT_SWORD,
        "Great Sword",
        (ItemType::Sword, ItemClass::Weapon, TwoHand),
        (2, 3),
        90,
        InvSound::Sword,
    );
    great_sword.requirements = Requirements::new(75, 0, 0);
    great_sword.max_damage = 20;
    great_sword.durability = 60;

    let mut mace = definition(
        ids::MACE,
        "Mace",
        (ItemType::Mace, ItemClass::Weapon, OneHand),
        (2, 3),
        59,
        InvSound::Axe,
    );
    mace.requirements = Requirements::new(16, 0, 0);
    mace.max_damage = 8;
    mace.durability = 32;

    let mut cap = definition(
        ids::CAP,
        "Cap",
        (ItemType::Helm, ItemClass::Armor, Helm),
        (2, 2),
        25,
        InvSound::Cap,
    );
    cap.armor_class = BonusRange::new(1, 3);
    cap.durability = 15;

    let ring = definition(
        ids::RING,
        "Ring",
        (ItemType::Ring, ItemClass::Misc, Ring),
        (1, 1),
        12,
        InvSound::Ring,
    );
    let amulet = definition(
        ids::AMULET,
        "Amulet",
        (ItemType::Amulet, ItemClass::Misc, Amulet),
        (1, 1),
        45,
        InvSound::Ring,
    );

    let mut scroll = consumable(ids::SCROLL_OF_HEALING, "Scroll of Healing", MiscKind::Scroll, 1, InvSound::Scroll);
    scroll.spell = Some(HEALING_SPELL);

    let mut staff = definition(
        ids::CHARGED_STAFF,
        "Staff of Lightning",
        (ItemType::Staff, ItemClass::Weapon, TwoHand),
        (1, 3),
        109,
        InvSound::Staff,
    );
    staff.misc = MiscKind::Staff;
    staff.spell = Some(LIGHTNING_SPELL);
    staff.charges = 20;
    staff.requirements = Requirements::new(0, 20, 0);

    let mut note = consumable(ids::NOTE, "Torn Note", MiscKind::Note, 9, InvSound::Scroll);
    note.class = ItemClass::Quest;

    ItemCatalog::from_definitions([
        gold,
        potion,
        dagger,
        short_sword,
        long_bow,
        buckler,
        quilted,
        great_sword,
        mace,
        cap,
        ring,
        amulet,
        scroll,
        staff,
        note,
    ])
}

/// Item instances built from [`fixtures`]. Stat flags are left unset until
/// the owner recalculates.
pub mod items {
    use super::*;

    fn make(catalog: &ItemCatalog, id: ItemId) -> Item {
        let def = catalog.definition(id).expect("fixture definition");
        recreate_item(
            def,
            CreateInfo::default(),
            u32::from(id.0).wrapping_mul(7919),
            0,
            BuffFlags::empty(),
        )
    }

    pub fn healing_potion(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::HEALING_POTION)
    }

    pub fn dagger(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::DAGGER)
    }

    pub fn short_sword(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::SHORT_SWORD)
    }

    pub fn long_bow(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::LONG_BOW)
    }

    pub fn buckler(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::BUCKLER)
    }

    pub fn quilted_armor(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::QUILTED_ARMOR)
    }

    pub fn great_sword(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::GREAT_SWORD)
    }

    pub fn mace(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::MACE)
    }

    pub fn cap(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::CAP)
    }

    pub fn ring(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::RING)
    }

    pub fn amulet(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::AMULET)
    }

    pub fn scroll_of_healing(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::SCROLL_OF_HEALING)
    }

    pub fn charged_staff(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::CHARGED_STAFF)
    }

    pub fn note(catalog: &ItemCatalog) -> Item {
        make(catalog, ids::NOTE)
    }

    pub fn gold(catalog: &ItemCatalog, value: u32) -> Item {
        let def = catalog.definition(ids::GOLD).expect("gold fixture");
        recreate_item(def, CreateInfo::default(), value, value, BuffFlags::empty())
    }
}

pub mod players {
    use crate::state::{Attributes, PlayerClass, PlayerId, PlayerState};

    /// A player of `class` strong enough for every fixture item.
    pub fn of_class(class: PlayerClass, id: u8) -> PlayerState {
        PlayerState::new(PlayerId(id), class, Attributes::new(100, 100, 100))
    }

    pub fn warrior(id: u8) -> PlayerState {
        of_class(PlayerClass::Warrior, id)
    }

    /// A warrior who cannot use anything with requirements.
    pub fn weakling(id: u8) -> PlayerState {
        PlayerState::new(PlayerId(id), PlayerClass::Warrior, Attributes::new(10, 10, 10))
    }
}
