//! Sound cues selected by inventory operations.
//!
//! The rules only pick which cue to play; mixing and playback belong to the
//! client. Cues are produced for the local player only.

use crate::item::{InvSound, Item};
use crate::state::PlayerClass;

/// Voice actor set used for a class's speech.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceSet {
    Warrior,
    Rogue,
    Sorcerer,
    Monk,
}

/// Speech lines spoken when an inventory action fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeechCue {
    /// "I can't use this yet."
    RequirementsNotMet,
    /// "I have no room."
    InventoryFull,
    /// "Where would I put this?"
    NowhereToPut,
    /// "I can't do that."
    CannotEquip,
}

impl SpeechCue {
    /// Line number within a voice set.
    pub const fn id(self) -> u8 {
        match self {
            Self::RequirementsNotMet => 13,
            Self::InventoryFull => 14,
            Self::NowhereToPut => 15,
            Self::CannotEquip => 37,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundEffect {
    /// Item-specific sound played when an item lands in or leaves a slot.
    ItemFlip(InvSound),
    /// Generic sound of lifting an item onto the cursor.
    Grab,
    Speech { voice: VoiceSet, cue: SpeechCue },
}

impl SoundEffect {
    pub fn flip(item: &Item) -> Self {
        Self::ItemFlip(item.sound)
    }

    pub fn speech(class: PlayerClass, cue: SpeechCue) -> Self {
        Self::Speech {
            voice: class.voice(),
            cue,
        }
    }
}
