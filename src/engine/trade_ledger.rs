// ============================================================================
// Trade Ledger
// Append-only record of executions for one instrument
// ============================================================================

use crate::domain::{OrderId, Trade};
use crate::numeric::Quantity;

/// Append-only, execution-ordered trade record.
///
/// Committed entries are never updated or removed; only an uncommitted
/// tail can be discarded through [`TradeLedger::truncate`].
#[derive(Debug, Default, Clone)]
pub struct TradeLedger {
    trades: Vec<Trade>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from trades in execution order (oldest first)
    pub fn from_trades(trades: Vec<Trade>) -> Self {
        Self { trades }
    }

    pub fn append(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    /// Keep only the first `len` trades
    pub fn truncate(&mut self, len: usize) {
        self.trades.truncate(len);
    }

    /// Most recent `limit` trades, newest first
    pub fn recent(&self, limit: usize) -> Vec<Trade> {
        self.trades.iter().rev().take(limit).cloned().collect()
    }

    /// Total quantity executed against one order
    pub fn executed_quantity(&self, order_id: OrderId) -> Quantity {
        self.trades
            .iter()
            .filter(|trade| trade.involves(order_id))
            .fold(Quantity::ZERO, |acc, trade| {
                acc.checked_add(trade.quantity).unwrap_or(Quantity::MAX)
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trade> + '_ {
        self.trades.iter()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}
