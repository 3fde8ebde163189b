use std::collections::BTreeMap;

use crate::item::{
    EquipClass, Footprint, InvSound, ItemClass, ItemId, ItemType, MiscKind, Requirements, SpellId,
};

pub trait ItemOracle: Send + Sync {
    fn definition(&self, id: ItemId) -> Option<&ItemDefinition>;

    /// Returns all item definitions available in this oracle.
    fn all_definitions(&self) -> Vec<ItemDefinition>;
}

/// Static description of an item kind.
///
/// Instances are regenerated from a definition plus creation parameters, so
/// everything that does not vary per drop lives here. The footprint is stored
/// directly and is the only thing the placement rules read about item size.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub item_type: ItemType,
    pub class: ItemClass,
    pub location: EquipClass,
    #[cfg_attr(feature = "serde", serde(default))]
    pub misc: MiscKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spell: Option<SpellId>,
    pub graphic: u16,
    pub footprint: Footprint,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sound: InvSound,
    #[cfg_attr(feature = "serde", serde(default))]
    pub usable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: Requirements,
    #[cfg_attr(feature = "serde", serde(default))]
    pub durability: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub charges: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor_class: BonusRange,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_damage: i16,
}

impl ItemDefinition {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        item_type: ItemType,
        class: ItemClass,
        location: EquipClass,
        footprint: Footprint,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            item_type,
            class,
            location,
            misc: MiscKind::None,
            spell: None,
            graphic: 0,
            footprint,
            sound: InvSound::default(),
            usable: false,
            requirements: Requirements::default(),
            durability: 0,
            charges: 0,
            value: 0,
            armor_class: BonusRange::default(),
            max_damage: 0,
        }
    }
}

/// Inclusive roll range for a generated stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusRange {
    pub min: i16,
    pub max: i16,
}

impl BonusRange {
    pub const fn new(min: i16, max: i16) -> Self {
        Self { min, max }
    }
}

/// Item oracle backed by an ordered map.
///
/// Used by the runtime after loading a catalog and by tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemCatalog {
    definitions: BTreeMap<ItemId, ItemDefinition>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = ItemDefinition>) -> Self {
        Self {
            definitions: definitions.into_iter().map(|def| (def.id, def)).collect(),
        }
    }

    /// Adds or replaces a definition, returning the previous one.
    pub fn insert(&mut self, definition: ItemDefinition) -> Option<ItemDefinition> {
        self.definitions.insert(definition.id, definition)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ItemOracle for ItemCatalog {
    fn definition(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.definitions.get(&id)
    }

    fn all_definitions(&self) -> Vec<ItemDefinition> {
        self.definitions.values().cloned().collect()
    }
}
