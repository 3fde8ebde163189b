use crate::item::Item;
use crate::state::PlayerId;

/// Observer for quest progress driven by inventory activity.
///
/// Hooks may update quest state owned by the caller but never touch the
/// inventory; anything they want to move goes through the normal operations.
pub trait QuestHooks {
    /// Called when an item from the ground lands on the cursor or in the inventory.
    fn item_acquired(&mut self, _player: PlayerId, _item: &Item) {}

    /// Called after an item is committed to a body slot.
    fn item_equipped(&mut self, _player: PlayerId, _item: &Item) {}
}

/// Hook set that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoQuestHooks;

impl QuestHooks for NoQuestHooks {}
