use super::error::RegistryError;
use super::player::PlayerState;
use crate::config::GameConfig;

/// Index of a player in the session. Network messages carry it verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fixed table of player records owned by one peer.
///
/// Every peer holds a record for each connected player; exactly one of them
/// is the local player whose actions produce sounds and replication events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerRegistry {
    players: [Option<PlayerState>; GameConfig::MAX_PLAYERS],
    local: PlayerId,
}

impl PlayerRegistry {
    pub fn new(local: PlayerId) -> Self {
        Self {
            players: Default::default(),
            local,
        }
    }

    pub fn local(&self) -> PlayerId {
        self.local
    }

    pub fn is_local(&self, id: PlayerId) -> bool {
        self.local == id
    }

    /// Stores a player under its own id, returning the record it replaced.
    pub fn insert(&mut self, player: PlayerState) -> Result<Option<PlayerState>, RegistryError> {
        let id = player.id;
        let slot = self
            .players
            .get_mut(id.index())
            .ok_or(RegistryError::OutOfRange(id))?;
        Ok(slot.replace(player))
    }

    pub fn remove(&mut self, id: PlayerId) -> Option<PlayerState> {
        self.players.get_mut(id.index())?.take()
    }

    pub fn get(&self, id: PlayerId) -> Result<&PlayerState, RegistryError> {
        match self.players.get(id.index()) {
            None => Err(RegistryError::OutOfRange(id)),
            Some(slot) => slot.as_ref().ok_or(RegistryError::UnknownPlayer(id)),
        }
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Result<&mut PlayerState, RegistryError> {
        match self.players.get_mut(id.index()) {
            None => Err(RegistryError::OutOfRange(id)),
            Some(slot) => slot.as_mut().ok_or(RegistryError::UnknownPlayer(id)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Attributes, PlayerClass};

    #[test]
    fn lookup_distinguishes_empty_and_out_of_range() {
        let mut registry = PlayerRegistry::new(PlayerId(1));
        let player = PlayerState::new(PlayerId(1), PlayerClass::Rogue, Attributes::new(20, 15, 30));
        assert_eq!(registry.insert(player).unwrap(), None);

        assert!(registry.get(PlayerId(1)).is_ok());
        assert!(registry.is_local(PlayerId(1)));
        assert_eq!(
            registry.get(PlayerId(0)).unwrap_err(),
            RegistryError::UnknownPlayer(PlayerId(0))
        );
        assert_eq!(
            registry.get(PlayerId(9)).unwrap_err(),
            RegistryError::OutOfRange(PlayerId(9))
        );
        assert_eq!(registry.iter().count(), 1);
    }
}
