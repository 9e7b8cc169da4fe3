// ============================================================================
// Order Book Domain Model
// ============================================================================

use std::collections::{BTreeMap, HashMap, VecDeque};
use thiserror::Error;

use super::order::state::OrderStatus;
use super::{InstrumentId, Order, OrderId, Side};
use crate::numeric::{Price, Quantity};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order book consistency failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderBookError {
    #[error("order {0} is already in the book")]
    DuplicateOrder(OrderId),

    #[error("order for {order} cannot rest in the {book} book")]
    InstrumentMismatch {
        order: InstrumentId,
        book: InstrumentId,
    },

    #[error("order {0} is not in the book")]
    UnknownOrder(OrderId),

    #[error("fill of {quantity} exceeds what order {order_id} has left")]
    Overfill { order_id: OrderId, quantity: Quantity },
}

// ============================================================================
// Order Book Level
// ============================================================================

/// Orders resting at one price, oldest first
#[derive(Debug, Clone)]
pub struct OrderBookLevel {
    pub price: Price,
    /// FIFO queue of resting order ids
    orders: VecDeque<OrderId>,
    /// Remaining quantity across the level
    total_quantity: Quantity,
}

impl OrderBookLevel {
    pub fn new(price: Price) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            total_quantity: Quantity::ZERO,
        }
    }

    pub fn add_order(&mut self, order: &Order) {
        self.total_quantity = self
            .total_quantity
            .checked_add(order.remaining_quantity())
            .unwrap_or(Quantity::MAX);
        self.orders.push_back(order.id);
    }

    /// Oldest order at this price
    pub fn front(&self) -> Option<OrderId> {
        self.orders.front().copied()
    }

    pub fn remove_order(&mut self, order_id: OrderId) -> bool {
        match self.orders.iter().position(|id| *id == order_id) {
            Some(pos) => {
                self.orders.remove(pos);
                true
            },
            None => false,
        }
    }

    pub fn subtract_quantity(&mut self, quantity: Quantity) {
        self.total_quantity = self.total_quantity.saturating_sub_to_zero(quantity);
    }

    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    pub fn order_ids(&self) -> impl Iterator<Item = &OrderId> + '_ {
        self.orders.iter()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

// ============================================================================
// Order Book Side
// ============================================================================

/// One side of the ladder (bids or asks), price levels kept sorted
#[derive(Debug, Clone)]
pub struct OrderBookSide {
    levels: BTreeMap<Price, OrderBookLevel>,
    pub side: Side,
}

impl OrderBookSide {
    pub fn new(side: Side) -> Self {
        Self {
            levels: BTreeMap::new(),
            side,
        }
    }

    pub fn add_order(&mut self, order: &Order) {
        self.levels
            .entry(order.price)
            .or_insert_with(|| OrderBookLevel::new(order.price))
            .add_order(order);
    }

    /// Get the best (top-of-book) price
    pub fn best_price(&self) -> Option<Price> {
        self.best_level().map(|level| level.price)
    }

    /// Highest level for bids, lowest for asks
    pub fn best_level(&self) -> Option<&OrderBookLevel> {
        match self.side {
            Side::Buy => self.levels.values().next_back(),
            Side::Sell => self.levels.values().next(),
        }
    }

    /// Levels in priority order, best first
    pub fn levels(&self) -> Box<dyn Iterator<Item = &OrderBookLevel> + '_> {
        match self.side {
            Side::Buy => Box::new(self.levels.values().rev()),
            Side::Sell => Box::new(self.levels.values()),
        }
    }

    /// Reduce the resting quantity at `price`; drop the order from the queue
    /// when it no longer rests.
    fn record_fill(&mut self, price: Price, order_id: OrderId, quantity: Quantity, done: bool) {
        if let Some(level) = self.levels.get_mut(&price) {
            level.subtract_quantity(quantity);
            if done {
                level.remove_order(order_id);
            }
            if level.is_empty() {
                self.levels.remove(&price);
            }
        }
    }

    /// Get depth at N levels as (price, remaining quantity)
    pub fn get_depth(&self, num_levels: usize) -> Vec<(Price, Quantity)> {
        self.levels()
            .take(num_levels)
            .map(|level| (level.price, level.total_quantity()))
            .collect()
    }

    pub fn order_count(&self) -> usize {
        self.levels.values().map(OrderBookLevel::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

// ============================================================================
// Order Book
// ============================================================================

/// Ladder of active orders for one instrument.
///
/// Every order ever inserted stays addressable by id; only open and partial
/// orders sit on the ladder. Fill state changes are visible to the very next
/// `best_*` query.
#[derive(Debug, Clone)]
pub struct OrderBook {
    instrument: InstrumentId,
    bids: OrderBookSide,
    asks: OrderBookSide,
    orders: HashMap<OrderId, Order>,
}

impl OrderBook {
    pub fn new(instrument: InstrumentId) -> Self {
        Self {
            instrument,
            bids: OrderBookSide::new(Side::Buy),
            asks: OrderBookSide::new(Side::Sell),
            orders: HashMap::new(),
        }
    }

    pub fn instrument(&self) -> &InstrumentId {
        &self.instrument
    }

    /// Add an order. Active orders join the back of their price level.
    pub fn insert(&mut self, order: Order) -> Result<(), OrderBookError> {
        if order.instrument != self.instrument {
            return Err(OrderBookError::InstrumentMismatch {
                order: order.instrument.clone(),
                book: self.instrument.clone(),
            });
        }
        if self.orders.contains_key(&order.id) {
            return Err(OrderBookError::DuplicateOrder(order.id));
        }

        if order.is_active() {
            self.side_mut(order.side).add_order(&order);
        }
        self.orders.insert(order.id, order);
        Ok(())
    }

    /// Apply a fill to a resting order and return its new status
    pub fn fill(
        &mut self,
        order_id: OrderId,
        quantity: Quantity,
    ) -> Result<OrderStatus, OrderBookError> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or(OrderBookError::UnknownOrder(order_id))?;

        if !order.try_fill(quantity) {
            return Err(OrderBookError::Overfill { order_id, quantity });
        }

        let (side, price, status) = (order.side, order.price, order.status());
        self.side_mut(side)
            .record_fill(price, order_id, quantity, !status.is_active());

        Ok(status)
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Highest bid, oldest first within the price
    pub fn best_buy(&self) -> Option<&Order> {
        self.head(&self.bids)
    }

    /// Lowest ask, oldest first within the price
    pub fn best_sell(&self) -> Option<&Order> {
        self.head(&self.asks)
    }

    /// Buy orders by price descending, then arrival ascending
    pub fn active_buys(&self) -> Vec<&Order> {
        self.active(&self.bids)
    }

    /// Sell orders by price ascending, then arrival ascending
    pub fn active_sells(&self) -> Vec<&Order> {
        self.active(&self.asks)
    }

    /// True if the best bid meets or exceeds the best ask
    pub fn is_crossed(&self) -> bool {
        match (self.bids.best_price(), self.asks.best_price()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    pub fn snapshot(&self, depth: usize) -> OrderBookSnapshot {
        OrderBookSnapshot::with_depth(
            self.instrument.clone(),
            self.bids.get_depth(depth),
            self.asks.get_depth(depth),
        )
    }

    pub fn bids(&self) -> &OrderBookSide {
        &self.bids
    }

    pub fn asks(&self) -> &OrderBookSide {
        &self.asks
    }

    /// Every order ever inserted, active or not, in no particular order
    pub fn orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.values()
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn side_mut(&mut self, side: Side) -> &mut OrderBookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    fn head(&self, side: &OrderBookSide) -> Option<&Order> {
        side.best_level()
            .and_then(OrderBookLevel::front)
            .and_then(|id| self.orders.get(&id))
    }

    fn active<'a>(&'a self, side: &'a OrderBookSide) -> Vec<&'a Order> {
        side.levels()
            .flat_map(|level| level.order_ids())
            .filter_map(|id| self.orders.get(id))
            .collect()
    }
}

// ============================================================================
// Order Book Snapshot
// ============================================================================

/// Immutable aggregated view of the order book
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderBookSnapshot {
    pub instrument: InstrumentId,
    /// Bid levels (price, remaining quantity), best first
    pub bids: Vec<(Price, Quantity)>,
    /// Ask levels (price, remaining quantity), best first
    pub asks: Vec<(Price, Quantity)>,
    /// Current spread (ask - bid)
    pub spread: Option<Price>,
}

impl OrderBookSnapshot {
    pub fn with_depth(
        instrument: InstrumentId,
        bids: Vec<(Price, Quantity)>,
        asks: Vec<(Price, Quantity)>,
    ) -> Self {
        let spread = match (bids.first(), asks.first()) {
            (Some((bid, _)), Some((ask, _))) => ask.checked_sub(*bid).ok(),
            _ => None,
        };

        Self {
            instrument,
            bids,
            asks,
            spread,
        }
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.bids.first().map(|(price, _)| *price)
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.first().map(|(price, _)| *price)
    }
}
