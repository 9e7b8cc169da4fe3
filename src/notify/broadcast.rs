// ============================================================================
// Broadcast Sink
// tokio broadcast channel for async consumers
// ============================================================================

use crate::interfaces::{NotificationSink, VenueEvent};
use tokio::sync::broadcast;

/// Sink backed by a `tokio::sync::broadcast` channel.
///
/// Slow receivers lag and skip the oldest events rather than slowing the
/// venue down. Publishing with no receivers is not an error.
#[derive(Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<VenueEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<VenueEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl NotificationSink for BroadcastSink {
    fn publish(&self, event: &VenueEvent) {
        if self.sender.send(event.clone()).is_err() {
            tracing::trace!("no receivers for {:?}", event);
        }
    }
}
