//! Topic-based event bus implementation.

use inventory_core::Replicated;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::SessionEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Inventory commands other peers must apply
    Replication,
    /// Players joining, leaving, saving
    Session,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Replicated(Replicated),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Replicated(_) => Topic::Replication,
            Event::Session(_) => Topic::Session,
        }
    }
}

/// Topic-based event bus
///
/// Consumers subscribe to the topics they care about. Publishing never
/// blocks; events sent while nobody listens are dropped.
#[derive(Clone)]
pub struct EventBus {
    replication: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            replication: broadcast::channel(capacity).0,
            session: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Replication => &self.replication,
            Topic::Session => &self.session,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::{BodyLocation, NetCommand, PlayerId};

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut replication = bus.subscribe(Topic::Replication);
        let mut session = bus.subscribe(Topic::Session);

        let command = Event::Replicated(Replicated {
            player: PlayerId(0),
            command: NetCommand::DeleteItem {
                location: BodyLocation::Head,
            },
        });
        bus.publish(command.clone());
        bus.publish(Event::Session(SessionEvent::PlayerLeft {
            player: PlayerId(2),
        }));

        assert_eq!(replication.recv().await.unwrap(), command);
        assert!(replication.try_recv().is_err());
        assert_eq!(session.recv().await.unwrap().topic(), Topic::Session);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(Event::Session(SessionEvent::PlayerJoined {
            player: PlayerId(1),
        }));
    }
}
