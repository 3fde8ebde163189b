//! Deterministic inventory and equipment rules shared by every peer.
//!
//! `inventory-core` owns the item model, the per-player containers (body
//! slots, the 10x4 backpack grid, the belt and the cursor) and the rules that
//! move items between them. It performs no I/O: sounds and replication
//! commands are returned to the caller in an [`engine::Outcome`], and all
//! state mutation flows through [`engine::InventoryEngine`].
pub mod audio;
pub mod config;
pub mod consume;
pub mod cursor;
pub mod engine;
pub mod env;
pub mod equip;
pub mod error;
pub mod gold;
pub mod item;
pub mod net;
pub mod persist;
pub mod placement;
pub mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use audio::{SoundEffect, SpeechCue, VoiceSet};
pub use config::{AutoEquipOptions, GameConfig, ScreenLayout};
pub use consume::{UseError, UsedItem};
pub use cursor::{PickupResult, SlotId, TransferError};
pub use engine::{CursorState, InventoryEngine, Outcome};
pub use env::{
    BonusRange, InventoryEnv, ItemCatalog, ItemDefinition, ItemOracle, NoQuestHooks, OracleError,
    QuestHooks,
};
pub use error::{ErrorSeverity, GameError};
pub use item::{
    BuffFlags, CreateInfo, EquipClass, Footprint, InvSound, Item, ItemBonuses, ItemClass, ItemId,
    ItemType, Meter, MiscKind, Quality, Requirements, SpellId,
};
pub use net::{ItemSync, NetCommand, RemoteError, Replicated};
pub use persist::{DigestError, PackedInventory, PackedItem, PackedPlayer, UnpackError};
pub use placement::PlaceMode;
pub use state::{
    Attributes, BodyLocation, GridCell, GridSlot, InvariantViolation, PlayerClass, PlayerId,
    PlayerInventory, PlayerMode, PlayerRegistry, PlayerState, RegistryError, TilePosition,
};
