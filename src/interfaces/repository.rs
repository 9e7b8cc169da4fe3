// ============================================================================
// Repository Interface
// Storage collaborator for instruments, orders, trades and quotes
// ============================================================================

use crate::domain::{Instrument, InstrumentId, Order, OrderStatus, Quote, Trade};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("record already exists: {0}")]
    Duplicate(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("commit failed: {0}")]
    CommitFailed(String),
}

/// Writes staged for one logical venue operation.
///
/// Nothing is visible to readers until [`Transaction::commit`] succeeds.
/// Dropping a transaction without committing discards every staged write,
/// which is how error paths roll back.
pub trait Transaction: Send {
    fn put_instrument(&mut self, instrument: Instrument);

    /// Insert or replace an order keyed by its id
    fn put_order(&mut self, order: Order);

    fn put_trade(&mut self, trade: Trade);

    fn put_quote(&mut self, quote: Quote);

    /// Apply every staged write atomically
    fn commit(self: Box<Self>) -> Result<(), StorageError>;
}

/// Persistent store for venue records with indexed reads by instrument and
/// order status.
pub trait Repository: Send + Sync {
    /// Open a transaction scoped to one venue operation
    fn begin(&self) -> Box<dyn Transaction>;

    /// All instruments in listing order
    fn instruments(&self) -> Result<Vec<Instrument>, StorageError>;

    /// Orders of one instrument whose status is in `statuses`, in arrival order
    fn orders(
        &self,
        instrument: &InstrumentId,
        statuses: &[OrderStatus],
    ) -> Result<Vec<Order>, StorageError>;

    /// Most recent trades of one instrument, newest first
    fn trades(&self, instrument: &InstrumentId, limit: usize) -> Result<Vec<Trade>, StorageError>;

    /// Quote history of one instrument, oldest first
    fn quotes(&self, instrument: &InstrumentId) -> Result<Vec<Quote>, StorageError>;
}
