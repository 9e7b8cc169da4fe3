// ============================================================================
// Subscriber Registry
// Thread-safe fan-out of venue events over bounded crossbeam channels
// ============================================================================

use crate::domain::VenueConfig;
use crate::interfaces::{NotificationSink, VenueEvent};
use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Handle identifying one subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscriber-{}", self.0)
    }
}

/// Receiving end handed to a subscriber.
///
/// Dropping it disconnects the subscriber; the registry notices on the next
/// broadcast and removes it.
#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub receiver: Receiver<VenueEvent>,
}

/// Registry of live-update subscribers.
///
/// Each subscriber owns a bounded buffer of `capacity` events. Broadcasting
/// never blocks: a full buffer loses that one event for that subscriber, and
/// a disconnected subscriber is removed.
pub struct SubscriberRegistry {
    subscribers: RwLock<HashMap<SubscriberId, Sender<VenueEvent>>>,
    next_id: AtomicU64,
    capacity: usize,
}

impl SubscriberRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            capacity: capacity.max(1),
        }
    }

    /// Registry buffering `config.subscriber_capacity` events per subscriber
    pub fn from_config(config: &VenueConfig) -> Self {
        Self::new(config.subscriber_capacity)
    }

    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = channel::bounded(self.capacity);
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().insert(id, sender);
        tracing::debug!(%id, "subscriber added");
        Subscription { id, receiver }
    }

    /// Returns false if the subscriber was already gone
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.subscribers.write().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Deliver `event` to every subscriber; returns how many accepted it
    pub fn broadcast(&self, event: &VenueEvent) -> usize {
        let mut delivered = 0;
        let mut disconnected = Vec::new();

        {
            let subscribers = self.subscribers.read();
            for (id, sender) in subscribers.iter() {
                match sender.try_send(event.clone()) {
                    Ok(()) => delivered += 1,
                    Err(TrySendError::Full(_)) => {
                        tracing::warn!(%id, "subscriber buffer full, event dropped");
                    },
                    Err(TrySendError::Disconnected(_)) => disconnected.push(*id),
                }
            }
        }

        if !disconnected.is_empty() {
            let mut subscribers = self.subscribers.write();
            for id in disconnected {
                subscribers.remove(&id);
                tracing::warn!(%id, "subscriber disconnected, removed");
            }
        }

        delivered
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::from_config(&VenueConfig::default())
    }
}

impl NotificationSink for SubscriberRegistry {
    fn publish(&self, event: &VenueEvent) {
        self.broadcast(event);
    }
}
