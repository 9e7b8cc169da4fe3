// ============================================================================
// In-Memory Repository
// Reference storage collaborator with staged, all-or-nothing transactions
// ============================================================================

use crate::domain::{Instrument, InstrumentId, Order, OrderId, OrderStatus, Quote, Trade};
use crate::interfaces::{Repository, StorageError, Transaction};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Store {
    instruments: Vec<Instrument>,
    orders: HashMap<OrderId, Order>,
    /// Arrival-ordered order ids per instrument
    order_index: HashMap<InstrumentId, Vec<OrderId>>,
    trades: HashMap<InstrumentId, Vec<Trade>>,
    quotes: HashMap<InstrumentId, Vec<Quote>>,
}

impl Store {
    fn apply(&mut self, write: StagedWrite) {
        match write {
            StagedWrite::Instrument(instrument) => self.instruments.push(instrument),
            StagedWrite::Order(order) => {
                if !self.orders.contains_key(&order.id) {
                    self.order_index
                        .entry(order.instrument.clone())
                        .or_default()
                        .push(order.id);
                }
                self.orders.insert(order.id, order);
            },
            StagedWrite::Trade(trade) => {
                self.trades
                    .entry(trade.instrument.clone())
                    .or_default()
                    .push(trade);
            },
            StagedWrite::Quote(quote) => {
                self.quotes
                    .entry(quote.instrument.clone())
                    .or_default()
                    .push(quote);
            },
        }
    }

    fn has_instrument(&self, id: &InstrumentId) -> bool {
        self.instruments.iter().any(|instrument| &instrument.id == id)
    }
}

#[derive(Debug)]
enum StagedWrite {
    Instrument(Instrument),
    Order(Order),
    Trade(Trade),
    Quote(Quote),
}

/// Repository backed by process memory.
///
/// Cloning yields another handle onto the same store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted orders across all instruments
    pub fn order_count(&self) -> usize {
        self.store.read().orders.len()
    }

    pub fn order(&self, order_id: &OrderId) -> Option<Order> {
        self.store.read().orders.get(order_id).cloned()
    }
}

impl Repository for InMemoryRepository {
    fn begin(&self) -> Box<dyn Transaction> {
        Box::new(MemoryTransaction {
            store: Arc::clone(&self.store),
            staged: Vec::new(),
        })
    }

    fn instruments(&self) -> Result<Vec<Instrument>, StorageError> {
        Ok(self.store.read().instruments.clone())
    }

    fn orders(
        &self,
        instrument: &InstrumentId,
        statuses: &[OrderStatus],
    ) -> Result<Vec<Order>, StorageError> {
        let store = self.store.read();
        let ids = match store.order_index.get(instrument) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };

        Ok(ids
            .iter()
            .filter_map(|id| store.orders.get(id))
            .filter(|order| statuses.contains(&order.status()))
            .cloned()
            .collect())
    }

    fn trades(&self, instrument: &InstrumentId, limit: usize) -> Result<Vec<Trade>, StorageError> {
        Ok(self
            .store
            .read()
            .trades
            .get(instrument)
            .map(|trades| trades.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    fn quotes(&self, instrument: &InstrumentId) -> Result<Vec<Quote>, StorageError> {
        Ok(self
            .store
            .read()
            .quotes
            .get(instrument)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// Transaction
// ============================================================================

struct MemoryTransaction {
    store: Arc<RwLock<Store>>,
    staged: Vec<StagedWrite>,
}

impl Transaction for MemoryTransaction {
    fn put_instrument(&mut self, instrument: Instrument) {
        self.staged.push(StagedWrite::Instrument(instrument));
    }

    fn put_order(&mut self, order: Order) {
        self.staged.push(StagedWrite::Order(order));
    }

    fn put_trade(&mut self, trade: Trade) {
        self.staged.push(StagedWrite::Trade(trade));
    }

    fn put_quote(&mut self, quote: Quote) {
        self.staged.push(StagedWrite::Quote(quote));
    }

    fn commit(mut self: Box<Self>) -> Result<(), StorageError> {
        let mut store = self.store.write();

        // Validate everything before applying anything
        for write in &self.staged {
            if let StagedWrite::Instrument(instrument) = write {
                if store.has_instrument(&instrument.id) {
                    return Err(StorageError::Duplicate(instrument.id.to_string()));
                }
            }
        }

        for write in self.staged.drain(..) {
            store.apply(write);
        }
        Ok(())
    }
}

impl Drop for MemoryTransaction {
    fn drop(&mut self) {
        if !self.staged.is_empty() {
            tracing::debug!("rolling back {} staged writes", self.staged.len());
        }
    }
}
