// ============================================================================
// Venue API Shapes
// Transport-agnostic request and response types
// ============================================================================
//
// Requests carry `rust_decimal::Decimal` and plain strings as a caller would
// send them; responses render prices and quantities back as `Decimal`.

use crate::domain::{Instrument, InstrumentId, Order, OrderId, OrderStatus, Quote, Side, Trade};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InstrumentRequest {
    #[cfg_attr(feature = "serde", serde(alias = "isin"))]
    pub id: String,
    pub name: String,
    pub coupon: Decimal,
    pub maturity: String,
    /// Defaults to [`Instrument::DEFAULT_FACE_VALUE`]
    #[cfg_attr(feature = "serde", serde(default))]
    pub face_value: Option<Decimal>,
}

impl InstrumentRequest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coupon: Decimal,
        maturity: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coupon,
            maturity: maturity.into(),
            face_value: None,
        }
    }

    pub fn with_face_value(mut self, face_value: Decimal) -> Self {
        self.face_value = Some(face_value);
        self
    }
}

/// A limit order as submitted by a caller.
///
/// `side` stays a string here; it is parsed (case-insensitively) during
/// validation so that bad labels surface as `InvalidArgument`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderRequest {
    #[cfg_attr(feature = "serde", serde(alias = "isin"))]
    pub instrument_id: String,
    pub side: String,
    pub price: Decimal,
    pub quantity: Decimal,
    #[cfg_attr(feature = "serde", serde(default))]
    pub owner: Option<String>,
}

impl OrderRequest {
    pub fn new(
        instrument_id: impl Into<String>,
        side: impl Into<String>,
        price: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            side: side.into(),
            price,
            quantity,
            owner: None,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Accepted order id plus every trade the submission produced
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderAck {
    pub order_id: OrderId,
    pub trades: Vec<TradeView>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TradeView {
    pub id: Uuid,
    pub instrument_id: InstrumentId,
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub price: Decimal,
    pub quantity: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl From<&Trade> for TradeView {
    fn from(trade: &Trade) -> Self {
        Self {
            id: trade.id,
            instrument_id: trade.instrument.clone(),
            buy_order_id: trade.buy_order_id,
            sell_order_id: trade.sell_order_id,
            price: trade.price.to_decimal(),
            quantity: trade.quantity.to_decimal(),
            timestamp: trade.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderView {
    pub id: OrderId,
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
    pub filled: Decimal,
    pub status: OrderStatus,
    pub owner: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            side: order.side,
            price: order.price.to_decimal(),
            quantity: order.quantity.to_decimal(),
            filled: order.filled_quantity().to_decimal(),
            status: order.status(),
            owner: order.owner.clone(),
            timestamp: order.timestamp,
        }
    }
}

/// Active orders of one instrument, each side in priority order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderBookView {
    pub instrument_id: InstrumentId,
    pub bids: Vec<OrderView>,
    pub asks: Vec<OrderView>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuoteView {
    pub instrument_id: InstrumentId,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
}

impl From<&Quote> for QuoteView {
    fn from(quote: &Quote) -> Self {
        Self {
            instrument_id: quote.instrument.clone(),
            bid: quote.bid.map(|p| p.to_decimal()),
            ask: quote.ask.map(|p| p.to_decimal()),
            timestamp: quote.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InstrumentView {
    pub id: InstrumentId,
    pub name: String,
    pub coupon: Decimal,
    pub maturity: String,
    pub face_value: Decimal,
}

impl From<&Instrument> for InstrumentView {
    fn from(instrument: &Instrument) -> Self {
        Self {
            id: instrument.id.clone(),
            name: instrument.name.clone(),
            coupon: instrument.coupon,
            maturity: instrument.maturity.clone(),
            face_value: instrument.face_value,
        }
    }
}
