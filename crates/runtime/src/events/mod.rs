//! Topic-based event bus for runtime events.
//!
//! Replication commands are published on [`Topic::Replication`] once the
//! operation that produced them has committed. Session lifecycle notices go
//! to [`Topic::Session`].

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::SessionEvent;
