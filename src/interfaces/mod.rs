// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod matching_algorithm;
mod notification_sink;
mod repository;

pub use matching_algorithm::{MatchTrades, MatchingAlgorithm};
pub use notification_sink::{LoggingSink, NoOpSink, NotificationSink, VenueEvent};
pub use repository::{Repository, StorageError, Transaction};
