use crate::item::EquipClass;

/// Body slots a player can wear items in.
#[derive(
    Clone,
    Copy,
    Debug,
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
#[repr(u8)]
pub enum BodyLocation {
    Head = 0,
    RingLeft = 1,
    RingRight = 2,
    Amulet = 3,
    HandLeft = 4,
    HandRight = 5,
    Chest = 6,
}

impl BodyLocation {
    /// Every slot, in the order automatic equipping tries them.
    pub const ALL: [Self; 7] = [
        Self::Head,
        Self::RingLeft,
        Self::RingRight,
        Self::Amulet,
        Self::HandLeft,
        Self::HandRight,
        Self::Chest,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Head),
            1 => Some(Self::RingLeft),
            2 => Some(Self::RingRight),
            3 => Some(Self::Amulet),
            4 => Some(Self::HandLeft),
            5 => Some(Self::HandRight),
            6 => Some(Self::Chest),
            _ => None,
        }
    }

    pub const fn is_hand(self) -> bool {
        matches!(self, Self::HandLeft | Self::HandRight)
    }

    /// The other hand, for hand slots.
    pub const fn opposite_hand(self) -> Option<Self> {
        match self {
            Self::HandLeft => Some(Self::HandRight),
            Self::HandRight => Some(Self::HandLeft),
            _ => None,
        }
    }

    /// Equip class a slot accepts when the pointer rests over it.
    ///
    /// Hand slots report one-handed; two-handed items are resolved separately.
    pub const fn equip_class(self) -> EquipClass {
        match self {
            Self::Head => EquipClass::Helm,
            Self::RingLeft | Self::RingRight => EquipClass::Ring,
            Self::Amulet => EquipClass::Amulet,
            Self::HandLeft | Self::HandRight => EquipClass::OneHand,
            Self::Chest => EquipClass::Armor,
        }
    }
}
