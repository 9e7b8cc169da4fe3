// ============================================================================
// Matching Engine
// Per-instrument market state: book, ledger, quotes and crossing algorithm
// ============================================================================

use crate::domain::{
    Instrument, InstrumentId, Order, OrderBook, OrderBookError, OrderBookSnapshot, OrderId, Quote,
    QuoteHistory, Trade,
};
use crate::engine::{QuoteCalculator, TradeLedger};
use crate::interfaces::{MatchTrades, MatchingAlgorithm};

/// Everything one accepted order changed
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub order_id: OrderId,
    /// Trades in execution order
    pub trades: MatchTrades,
    /// Post-pass state of every order touched, the incoming order first
    pub touched_orders: Vec<Order>,
    /// Quote appended after the pass
    pub quote: Quote,
}

/// State of an engine before a submission, used to undo a pass whose
/// persistence failed
#[derive(Debug, Clone)]
pub struct EngineCheckpoint {
    book: OrderBook,
    trade_count: usize,
    quote_count: usize,
}

/// Matching engine for a single instrument.
///
/// Not internally synchronized: the venue holds one behind a mutex so that
/// insertion, crossing, ledger and quote updates form one atomic unit.
pub struct MatchingEngine {
    instrument: Instrument,

    book: OrderBook,

    ledger: TradeLedger,

    quotes: QuoteHistory,

    /// Pluggable matching algorithm
    algorithm: Box<dyn MatchingAlgorithm>,
}

impl MatchingEngine {
    /// Create a new matching engine with an empty book
    pub fn new(instrument: Instrument, algorithm: Box<dyn MatchingAlgorithm>) -> Self {
        Self {
            book: OrderBook::new(instrument.id.clone()),
            instrument,
            ledger: TradeLedger::new(),
            quotes: QuoteHistory::new(),
            algorithm,
        }
    }

    /// Rebuild an engine from persisted records.
    ///
    /// `orders` may include inactive orders; they are re-inserted in arrival
    /// order so resting orders regain their time priority. `trades` and
    /// `quotes` are oldest first.
    pub fn restore(
        instrument: Instrument,
        algorithm: Box<dyn MatchingAlgorithm>,
        mut orders: Vec<Order>,
        trades: Vec<Trade>,
        quotes: Vec<Quote>,
    ) -> Result<Self, OrderBookError> {
        let mut engine = Self::new(instrument, algorithm);

        orders.sort_by_key(Order::sequence_number);
        for order in orders {
            engine.book.insert(order)?;
        }
        engine.ledger = TradeLedger::from_trades(trades);
        engine.quotes = QuoteHistory::from_quotes(quotes);

        Ok(engine)
    }

    /// Capture the current state so a later pass can be undone
    pub fn checkpoint(&self) -> EngineCheckpoint {
        EngineCheckpoint {
            book: self.book.clone(),
            trade_count: self.ledger.len(),
            quote_count: self.quotes.len(),
        }
    }

    /// Return to `checkpoint`, discarding every order, fill, trade and quote
    /// recorded since it was taken
    pub fn rollback(&mut self, checkpoint: EngineCheckpoint) {
        self.book = checkpoint.book;
        self.ledger.truncate(checkpoint.trade_count);
        self.quotes.truncate(checkpoint.quote_count);
    }

    /// Insert an order, cross to quiescence and append a fresh quote.
    ///
    /// On error the engine is left exactly as it was before the call.
    pub fn submit_order(&mut self, order: Order) -> Result<MatchOutcome, OrderBookError> {
        let checkpoint = self.checkpoint();
        match self.apply_order(order) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.rollback(checkpoint);
                Err(err)
            },
        }
    }

    fn apply_order(&mut self, order: Order) -> Result<MatchOutcome, OrderBookError> {
        let order_id = order.id;
        self.book.insert(order)?;

        let trades = self.algorithm.cross(&mut self.book)?;
        for trade in &trades {
            self.ledger.append(trade.clone());
        }

        let quote = QuoteCalculator::compute(&self.book);
        tracing::debug!(
            instrument = %self.instrument.id,
            bid = ?quote.bid,
            ask = ?quote.ask,
            trades = trades.len(),
            "book settled"
        );
        self.quotes.push(quote.clone());

        let mut touched = vec![order_id];
        for trade in &trades {
            for id in [trade.buy_order_id, trade.sell_order_id] {
                if !touched.contains(&id) {
                    touched.push(id);
                }
            }
        }
        let touched_orders = touched
            .iter()
            .filter_map(|id| self.book.get(id).cloned())
            .collect();

        Ok(MatchOutcome {
            order_id,
            trades,
            touched_orders,
            quote,
        })
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn instrument_id(&self) -> &InstrumentId {
        &self.instrument.id
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }

    /// Latest quote, or an empty one stamped with the listing time
    pub fn latest_quote(&self) -> Quote {
        self.quotes
            .latest()
            .cloned()
            .unwrap_or_else(|| Quote::empty(self.instrument.id.clone(), self.instrument.listed_at))
    }

    /// Most recent quotes, newest first
    pub fn quote_history(&self, limit: usize) -> Vec<Quote> {
        self.quotes.recent(limit)
    }

    /// Most recent trades, newest first
    pub fn recent_trades(&self, limit: usize) -> Vec<Trade> {
        self.ledger.recent(limit)
    }

    /// Get order book snapshot
    pub fn get_snapshot(&self, depth: usize) -> OrderBookSnapshot {
        self.book.snapshot(depth)
    }

    pub fn algorithm_name(&self) -> &str {
        self.algorithm.name()
    }
}
