//! Player records the inventory rules read from and write to.

use bitflags::bitflags;

use super::body::BodyLocation;
use super::inventory::{PlayerInventory, SpellSet};
use super::registry::PlayerId;
use crate::audio::VoiceSet;
use crate::item::{Item, ItemType, SpellId};

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
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlayerClass {
    Warrior,
    Rogue,
    Sorcerer,
    Monk,
    Bard,
    Barbarian,
}

bitflags! {
    /// Class-specific exceptions to the equip rules.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ClassCapabilities: u8 {
        /// Two-handed swords and maces may be held in one hand next to a shield.
        const ONE_HAND_LARGE_WEAPONS = 0b0001;
        /// Two one-handed swords or maces may be held at once.
        const DUAL_WIELD             = 0b0010;
        /// Weapons are never equipped automatically.
        const PREFERS_UNARMED        = 0b0100;
    }
}

impl PlayerClass {
    pub const fn capabilities(self) -> ClassCapabilities {
        match self {
            Self::Barbarian => ClassCapabilities::ONE_HAND_LARGE_WEAPONS,
            Self::Bard => ClassCapabilities::DUAL_WIELD,
            Self::Monk => ClassCapabilities::PREFERS_UNARMED,
            Self::Warrior | Self::Rogue | Self::Sorcerer => ClassCapabilities::empty(),
        }
    }

    pub const fn has(self, capability: ClassCapabilities) -> bool {
        self.capabilities().contains(capability)
    }

    /// Voice set used for the class's speech cues.
    pub const fn voice(self) -> VoiceSet {
        match self {
            Self::Warrior | Self::Barbarian => VoiceSet::Warrior,
            Self::Rogue | Self::Bard => VoiceSet::Rogue,
            Self::Sorcerer => VoiceSet::Sorcerer,
            Self::Monk => VoiceSet::Monk,
        }
    }
}

/// Animation state of a player, ordered from idle to busy.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlayerMode {
    #[default]
    Stand,
    Walk,
    Walk2,
    Walk3,
    Attack,
    RangedAttack,
    Block,
    GotHit,
    Death,
    Spell,
    NewLevel,
    Quit,
}

impl PlayerMode {
    /// Items can only be moved while standing or walking.
    pub fn allows_inventory(self) -> bool {
        self <= Self::Walk3
    }
}

/// Strength, magic and dexterity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: i32,
    pub magic: i32,
    pub dexterity: i32,
}

impl Attributes {
    pub const fn new(strength: i32, magic: i32, dexterity: i32) -> Self {
        Self {
            strength,
            magic,
            dexterity,
        }
    }
}

/// Dungeon tile coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePosition {
    pub x: i32,
    pub y: i32,
}

impl TilePosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellSource {
    Skill,
    Scroll,
    /// Charges of the staff in the left hand.
    Charges,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadiedSpell {
    pub spell: SpellId,
    pub source: SpellSource,
}

/// Values derived from base attributes and usable equipment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub attributes: Attributes,
    pub armor_class: i32,
    pub to_hit: i32,
    pub max_damage: i32,
}

/// Everything the inventory rules know about one player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    pub id: PlayerId,
    pub class: PlayerClass,
    pub mode: PlayerMode,
    /// Attributes before equipment bonuses.
    pub base: Attributes,
    pub position: TilePosition,
    pub inventory: PlayerInventory,
    pub readied_spell: Option<ReadiedSpell>,
    staff_spells: SpellSet,
    derived: DerivedStats,
}

impl PlayerState {
    pub fn new(id: PlayerId, class: PlayerClass, base: Attributes) -> Self {
        let mut player = Self {
            id,
            class,
            mode: PlayerMode::Stand,
            base,
            position: TilePosition::default(),
            inventory: PlayerInventory::new(),
            readied_spell: None,
            staff_spells: SpellSet::empty(),
            derived: DerivedStats {
                attributes: base,
                ..DerivedStats::default()
            },
        };
        player.recalculate();
        player
    }

    /// Attributes including bonuses of usable equipment.
    pub fn attributes(&self) -> Attributes {
        self.derived.attributes
    }

    pub fn derived(&self) -> &DerivedStats {
        &self.derived
    }

    /// Spells castable from the charges of the equipped staff.
    pub fn staff_spells(&self) -> SpellSet {
        self.staff_spells
    }

    pub fn has(&self, capability: ClassCapabilities) -> bool {
        self.class.has(capability)
    }

    /// Whether `item` occupies a single hand for this player. Barbarians hold
    /// two-handed swords and maces in one hand.
    pub fn grips_one_handed(&self, item: &Item) -> bool {
        !item.is_two_handed()
            || (self.has(ClassCapabilities::ONE_HAND_LARGE_WEAPONS) && item.is_sword_or_mace())
    }

    /// Refreshes every derived value after the inventory changed.
    ///
    /// Equipment only counts while its requirements are met, and equipment
    /// bonuses can satisfy the requirements of other equipment, so the usable
    /// set is narrowed until it is stable.
    pub fn recalculate(&mut self) {
        let base = self.base;
        for location in BodyLocation::ALL {
            if let Some(item) = self.inventory.body_mut(location) {
                item.stat_flag = true;
            }
        }

        let effective = loop {
            let effective = self.equipped_attributes(base);
            let mut changed = false;
            for location in BodyLocation::ALL {
                if let Some(item) = self.inventory.body_mut(location)
                    && item.stat_flag
                    && !item.requirements.met_by(&effective)
                {
                    item.stat_flag = false;
                    changed = true;
                }
            }
            if !changed {
                break effective;
            }
        };

        let mut derived = DerivedStats {
            attributes: effective,
            ..DerivedStats::default()
        };
        for (_, item) in self.inventory.body_items() {
            if item.stat_flag {
                derived.armor_class += i32::from(item.bonuses.armor_class);
                derived.to_hit += i32::from(item.bonuses.to_hit);
                derived.max_damage += i32::from(item.bonuses.max_damage);
            }
        }
        self.derived = derived;

        // Attributes only shrank while narrowing, so this agrees with the
        // flags computed above for body items.
        self.inventory
            .for_each_item_mut(|item| item.check_stats(&effective));

        self.inventory.refresh_gold();
        self.inventory.refresh_scroll_cache();
        self.refresh_staff_spells();
        self.validate_readied_spell();
    }

    fn equipped_attributes(&self, base: Attributes) -> Attributes {
        let mut attributes = base;
        for (_, item) in self.inventory.body_items() {
            if item.stat_flag {
                attributes.strength += i32::from(item.bonuses.strength);
                attributes.magic += i32::from(item.bonuses.magic);
                attributes.dexterity += i32::from(item.bonuses.dexterity);
            }
        }
        attributes
    }

    fn refresh_staff_spells(&mut self) {
        let mut spells = SpellSet::empty();
        if let Some(staff) = self.inventory.body(BodyLocation::HandLeft)
            && staff.stat_flag
            && staff.charges.current > 0
            && let Some(spell) = staff.spell
        {
            spells.insert(spell);
        }
        self.staff_spells = spells;
    }

    fn validate_readied_spell(&mut self) {
        let Some(readied) = self.readied_spell else {
            return;
        };
        let available = match readied.source {
            SpellSource::Skill => true,
            SpellSource::Scroll => self.inventory.scroll_spells().contains(readied.spell),
            SpellSource::Charges => self.staff_spells.contains(readied.spell),
        };
        if !available {
            self.readied_spell = None;
        }
    }

    /// Readies the spell of a charged staff in the left hand.
    pub(crate) fn ready_staff_spell(&mut self) {
        if let Some(staff) = self.inventory.body(BodyLocation::HandLeft)
            && staff.item_type == ItemType::Staff
            && staff.charges.current > 0
            && let Some(spell) = staff.spell
        {
            self.readied_spell = Some(ReadiedSpell {
                spell,
                source: SpellSource::Charges,
            });
        }
    }
}
