//! Item instances and the queries the inventory rules ask of them.
//!
//! An [`Item`] is a plain value: it has no identity beyond its fields and the
//! slot that currently owns it. Moving an item between slots is a move of the
//! value, never a shared reference.

mod recreate;

pub use recreate::{recreate_item, split_seed};

use bitflags::bitflags;

use crate::config::GameConfig;
use crate::state::Attributes;

/// Index of an item definition in the item catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u16);

/// Spell identifier carried by scrolls, books and charged staves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellId(pub u8);

/// Weapon, armor or miscellaneous subtype of an item.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemType {
    Misc,
    Sword,
    Axe,
    Bow,
    Mace,
    Shield,
    LightArmor,
    Helm,
    MediumArmor,
    HeavyArmor,
    Staff,
    Gold,
    Ring,
    Amulet,
}

/// Broad item class. Two one-handed items of the same class may not share the hands.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemClass {
    None,
    Weapon,
    Armor,
    Misc,
    Gold,
    Quest,
}

/// Where on the body an item may be worn.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EquipClass {
    None,
    OneHand,
    TwoHand,
    Armor,
    Helm,
    Ring,
    Amulet,
    Unequipable,
    Belt,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Quality {
    #[default]
    Normal,
    Magic,
    Unique,
}

/// Use behaviour of miscellaneous items.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MiscKind {
    #[default]
    None,
    Potion,
    Elixir,
    Scroll,
    ScrollTargeted,
    Staff,
    Book,
    Rune,
    Note,
    MapOfDoom,
    Unique,
}

impl MiscKind {
    pub const fn is_scroll(&self) -> bool {
        matches!(self, Self::Scroll | Self::ScrollTargeted)
    }
}

/// Sound family played when the item is moved in the inventory.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InvSound {
    HeavyArmor,
    LightArmor,
    Axe,
    Bow,
    Book,
    Cap,
    Gold,
    #[default]
    Potion,
    Ring,
    Rock,
    Scroll,
    Shield,
    Staff,
    Sword,
    Body,
}

bitflags! {
    /// Creation parameters recorded when an item is generated.
    ///
    /// The low six bits hold the item level; the rest say which source
    /// produced the item. Together with the seed they are enough to
    /// regenerate the item on another peer.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CreateInfo: u16 {
        const LEVEL         = 0x003F;
        const ONLY_GOOD     = 0x0040;
        const UPPER15       = 0x0080;
        const UPPER1        = 0x0100;
        const UNIQUE        = 0x0200;
        const SMITH         = 0x0400;
        const SMITH_PREMIUM = 0x0800;
        const BOY           = 0x1000;
        const WITCH         = 0x2000;
        const HEALER        = 0x4000;
        /// Item was placed by level generation and never picked up.
        const PREGEN        = 0x8000;
    }
}

impl CreateInfo {
    pub const fn level(&self) -> u8 {
        (self.bits() & Self::LEVEL.bits()) as u8
    }

    #[must_use]
    pub fn with_level(self, level: u8) -> Self {
        let bits = (self.bits() & !Self::LEVEL.bits()) | (u16::from(level) & Self::LEVEL.bits());
        Self::from_bits_retain(bits)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BuffFlags: u32 {
        /// Item was generated with the expansion tables.
        const HELLFIRE = 0x0001;
    }
}

/// Size of an item in inventory cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub width: u8,
    pub height: u8,
}

impl Footprint {
    pub const SINGLE: Self = Self::new(1, 1);

    pub const fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }

    pub const fn is_single_cell(&self) -> bool {
        self.width == 1 && self.height == 1
    }

    /// Pixel size of the cursor frame drawn for this footprint.
    pub const fn pixels(&self) -> (i32, i32) {
        (
            self.width as i32 * GameConfig::INV_SLOT_SIZE_PX,
            self.height as i32 * GameConfig::INV_SLOT_SIZE_PX,
        )
    }
}

/// Minimum attributes needed to use an item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Requirements {
    pub strength: u16,
    pub magic: u16,
    pub dexterity: u16,
}

impl Requirements {
    pub const fn new(strength: u16, magic: u16, dexterity: u16) -> Self {
        Self {
            strength,
            magic,
            dexterity,
        }
    }

    /// All three attributes must meet or exceed their minimum.
    pub const fn met_by(&self, attributes: &Attributes) -> bool {
        attributes.strength >= self.strength as i32
            && attributes.magic >= self.magic as i32
            && attributes.dexterity >= self.dexterity as i32
    }
}

/// A current/maximum pair used for durability and charges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    pub current: u16,
    pub max: u16,
}

impl Meter {
    pub const fn full(max: u16) -> Self {
        Self { current: max, max }
    }
}

/// Modifiers an item contributes while equipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemBonuses {
    pub to_hit: i16,
    pub max_damage: i16,
    pub armor_class: i16,
    pub strength: i16,
    pub magic: i16,
    pub dexterity: i16,
}

/// A single item instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub seed: u32,
    pub create_info: CreateInfo,
    pub buff: BuffFlags,

    pub item_type: ItemType,
    pub class: ItemClass,
    pub location: EquipClass,
    pub quality: Quality,
    pub misc: MiscKind,
    pub spell: Option<SpellId>,

    /// Cursor frame used to draw the item.
    pub graphic: u16,
    pub footprint: Footprint,
    pub sound: InvSound,
    pub usable: bool,
    pub identified: bool,

    pub requirements: Requirements,
    pub durability: Meter,
    pub charges: Meter,
    /// Stack size for gold, sell value otherwise.
    pub value: u32,
    pub bonuses: ItemBonuses,

    /// Cached result of the last requirement check against the owner.
    pub stat_flag: bool,
}

impl Item {
    pub const GOLD_SMALL_GRAPHIC: u16 = 4;
    pub const GOLD_MEDIUM_GRAPHIC: u16 = 5;
    pub const GOLD_LARGE_GRAPHIC: u16 = 6;

    /// Weapons, armor, helms, shields and jewelry all qualify.
    pub const fn is_equipment(&self) -> bool {
        matches!(
            self.location,
            EquipClass::OneHand
                | EquipClass::TwoHand
                | EquipClass::Armor
                | EquipClass::Helm
                | EquipClass::Ring
                | EquipClass::Amulet
        )
    }

    pub const fn is_weapon(&self) -> bool {
        matches!(
            self.item_type,
            ItemType::Sword | ItemType::Axe | ItemType::Bow | ItemType::Mace | ItemType::Staff
        )
    }

    pub const fn is_armor(&self) -> bool {
        matches!(
            self.item_type,
            ItemType::LightArmor | ItemType::MediumArmor | ItemType::HeavyArmor
        )
    }

    pub const fn is_helm(&self) -> bool {
        matches!(self.item_type, ItemType::Helm)
    }

    pub const fn is_shield(&self) -> bool {
        matches!(self.item_type, ItemType::Shield)
    }

    pub const fn is_jewelry(&self) -> bool {
        matches!(self.item_type, ItemType::Ring | ItemType::Amulet)
    }

    pub const fn is_gold(&self) -> bool {
        matches!(self.item_type, ItemType::Gold)
    }

    pub const fn is_two_handed(&self) -> bool {
        matches!(self.location, EquipClass::TwoHand)
    }

    /// Swords and maces get special treatment from barbarians and bards.
    pub const fn is_sword_or_mace(&self) -> bool {
        matches!(self.item_type, ItemType::Sword | ItemType::Mace)
    }

    /// Cell footprint of the item in the backpack grid.
    pub const fn inventory_size(&self) -> Footprint {
        self.footprint
    }

    /// Re-evaluates `stat_flag` against the owner's attributes.
    pub fn check_stats(&mut self, attributes: &Attributes) {
        self.stat_flag = self.requirements.met_by(attributes);
    }

    /// Picks the small, medium or large gold frame for the current stack value.
    pub fn refresh_gold_graphic(&mut self) {
        self.graphic = gold_graphic(self.value);
    }
}

/// Cursor frame for a gold stack of the given size.
pub const fn gold_graphic(value: u32) -> u16 {
    if value <= GameConfig::GOLD_SMALL_LIMIT {
        Item::GOLD_SMALL_GRAPHIC
    } else if value <= GameConfig::GOLD_MEDIUM_LIMIT {
        Item::GOLD_MEDIUM_GRAPHIC
    } else {
        Item::GOLD_LARGE_GRAPHIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, items};

    #[test]
    fn create_info_level_round_trips_without_touching_flags() {
        let info = (CreateInfo::PREGEN | CreateInfo::ONLY_GOOD).with_level(23);
        assert_eq!(info.level(), 23);
        assert!(info.contains(CreateInfo::PREGEN));
        assert!(info.contains(CreateInfo::ONLY_GOOD));

        let cleared = info.difference(CreateInfo::PREGEN);
        assert_eq!(cleared.level(), 23);
        assert!(!cleared.contains(CreateInfo::PREGEN));
    }

    #[test]
    fn gold_graphic_thresholds() {
        assert_eq!(gold_graphic(1), Item::GOLD_SMALL_GRAPHIC);
        assert_eq!(gold_graphic(1000), Item::GOLD_SMALL_GRAPHIC);
        assert_eq!(gold_graphic(1001), Item::GOLD_MEDIUM_GRAPHIC);
        assert_eq!(gold_graphic(2500), Item::GOLD_MEDIUM_GRAPHIC);
        assert_eq!(gold_graphic(2501), Item::GOLD_LARGE_GRAPHIC);
    }

    #[test]
    fn capability_queries_follow_type_and_location() {
        let catalog = fixtures();
        let sword = items::short_sword(&catalog);
        assert!(sword.is_equipment());
        assert!(sword.is_weapon());
        assert!(sword.is_sword_or_mace());
        assert!(!sword.is_two_handed());

        let shield = items::buckler(&catalog);
        assert!(shield.is_shield());
        assert!(!shield.is_weapon());

        let potion = items::healing_potion(&catalog);
        assert!(!potion.is_equipment());
        assert!(potion.inventory_size().is_single_cell());

        let ring = items::ring(&catalog);
        assert!(ring.is_jewelry());
    }

    #[test]
    fn stat_check_requires_all_three_attributes() {
        let catalog = fixtures();
        let mut bow = items::long_bow(&catalog);
        bow.requirements = Requirements::new(25, 0, 30);

        bow.check_stats(&Attributes::new(25, 0, 29));
        assert!(!bow.stat_flag);

        bow.check_stats(&Attributes::new(25, 0, 30));
        assert!(bow.stat_flag);
    }
}
