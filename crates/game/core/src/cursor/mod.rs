//! Cursor transfers between the ground, the body, the backpack and the belt.
//!
//! The cursor holds at most one item. [`paste`] drops it into a slot, [`cut`]
//! lifts an item out of one, and the pickup helpers bring ground items in.
//! Every operation validates first and only then writes, so a returned error
//! means nothing changed.
mod cut;
mod error;
mod layout;
mod paste;
mod pickup;

pub use error::TransferError;
pub use layout::{SlotId, paste_origin, slot_at_cut, slot_at_paste};
pub use pickup::PickupResult;

pub(crate) use cut::cut;
pub(crate) use paste::paste;
pub(crate) use pickup::{auto_pick_up, grab_ground_item, put_held_item, request_pick_up};
