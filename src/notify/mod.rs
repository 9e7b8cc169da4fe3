// ============================================================================
// Notify Module
// Live-update fan-out behind the NotificationSink seam
// ============================================================================

#[cfg(feature = "async")]
mod broadcast;
mod registry;

#[cfg(feature = "async")]
pub use broadcast::BroadcastSink;
pub use registry::{SubscriberId, SubscriberRegistry, Subscription};
