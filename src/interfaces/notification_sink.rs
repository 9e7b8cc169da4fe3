// ============================================================================
// Notification Sink Interface
// Defines the contract for publishing venue events to subscribers
// ============================================================================

use crate::domain::{InstrumentId, OrderId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events published by the venue after a submission settles
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
#[non_exhaustive]
pub enum VenueEvent {
    /// An order was accepted and the instrument's book has settled
    OrderUpdate {
        instrument_id: InstrumentId,
        order_id: OrderId,
    },
}

impl VenueEvent {
    pub fn order_update(instrument_id: InstrumentId, order_id: OrderId) -> Self {
        VenueEvent::OrderUpdate {
            instrument_id,
            order_id,
        }
    }

    pub fn instrument_id(&self) -> &InstrumentId {
        match self {
            VenueEvent::OrderUpdate { instrument_id, .. } => instrument_id,
        }
    }

    /// Render as JSON, e.g. `{"type":"order_update","instrument_id":"X","order_id":"..."}`
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Publishing seam between the matching core and live-update transport.
///
/// `publish` is called once per accepted order, after the instrument lock is
/// released. Implementations must not block the caller and must swallow their
/// own delivery failures.
pub trait NotificationSink: Send + Sync {
    fn publish(&self, event: &VenueEvent);
}

/// No-op sink for testing
pub struct NoOpSink;

impl NotificationSink for NoOpSink {
    fn publish(&self, _event: &VenueEvent) {}
}

/// Logging sink
pub struct LoggingSink;

impl NotificationSink for LoggingSink {
    fn publish(&self, event: &VenueEvent) {
        tracing::debug!("Venue event: {:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink() {
        NoOpSink.publish(&VenueEvent::order_update(
            InstrumentId::new("X"),
            OrderId::new(),
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_event_json_shape() {
        let order_id = OrderId::new();
        let event = VenueEvent::order_update(InstrumentId::new("INE123A01011"), order_id);
        let json: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();

        assert_eq!(json["type"], "order_update");
        assert_eq!(json["instrument_id"], "INE123A01011");
        assert_eq!(json["order_id"], order_id.to_string());
    }
}
