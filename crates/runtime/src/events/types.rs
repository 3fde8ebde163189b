use inventory_core::PlayerId;
use serde::{Deserialize, Serialize};

/// Session lifecycle notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    PlayerJoined { player: PlayerId },
    PlayerLeft { player: PlayerId },
    HeroSaved { player: PlayerId, name: String },
    HeroLoaded { player: PlayerId, name: String },
}
