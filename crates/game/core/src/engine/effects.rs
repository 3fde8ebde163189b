//! Side effects collected while an operation runs.

use crate::audio::{SoundEffect, SpeechCue};
use crate::item::Item;
use crate::net::NetCommand;
use crate::state::{BodyLocation, PlayerClass, PlayerState};

/// What the cursor shows after an operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CursorState {
    #[default]
    Idle,
    /// Holding an item drawn with this cursor frame.
    Holding { graphic: u16 },
}

impl CursorState {
    pub fn of(player: &PlayerState) -> Self {
        match player.inventory.held() {
            None => Self::Idle,
            Some(item) => Self::Holding {
                graphic: item.graphic,
            },
        }
    }
}

/// Result of a committed operation.
///
/// `commands` must be broadcast in order; `sounds` are for the local client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub commands: Vec<NetCommand>,
    pub sounds: Vec<SoundEffect>,
    pub cursor: CursorState,
}

/// Collector handed to the rule functions.
///
/// Sounds are dropped for players other than the local one. Commands are
/// kept until the operation returns, so nothing leaves before the commit.
#[derive(Debug)]
pub(crate) struct Effects {
    local: bool,
    class: PlayerClass,
    commands: Vec<NetCommand>,
    sounds: Vec<SoundEffect>,
}

impl Effects {
    pub(crate) fn new(player: &PlayerState, local: bool) -> Self {
        Self {
            local,
            class: player.class,
            commands: Vec::new(),
            sounds: Vec::new(),
        }
    }

    pub(crate) fn sound(&mut self, sound: SoundEffect) {
        if self.local {
            self.sounds.push(sound);
        }
    }

    pub(crate) fn flip(&mut self, item: &Item) {
        self.sound(SoundEffect::flip(item));
    }

    pub(crate) fn speech(&mut self, cue: SpeechCue) {
        self.sound(SoundEffect::speech(self.class, cue));
    }

    pub(crate) fn send(&mut self, command: NetCommand) {
        self.commands.push(command);
    }

    /// Announces the item now in `location`, or its removal if it is empty.
    pub(crate) fn body_changed(&mut self, player: &PlayerState, location: BodyLocation) {
        let command = match player.inventory.body(location) {
            Some(item) => NetCommand::change_item(location, item),
            None => NetCommand::DeleteItem { location },
        };
        self.send(command);
    }

    pub(crate) fn finish(self, player: &PlayerState) -> Outcome {
        Outcome {
            commands: self.commands,
            sounds: self.sounds,
            cursor: CursorState::of(player),
        }
    }
}
