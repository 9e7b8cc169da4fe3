// ============================================================================
// Trade Domain Model
// ============================================================================

use crate::numeric::{NumericResult, Price, Quantity};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{InstrumentId, OrderId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An execution between one buy order and one sell order.
///
/// Immutable once created; trades are only ever appended.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trade {
    /// Unique trade identifier
    pub id: Uuid,

    pub instrument: InstrumentId,

    pub buy_order_id: OrderId,

    pub sell_order_id: OrderId,

    /// Execution price (always the sell order's limit price)
    pub price: Price,

    /// Executed face-value quantity
    pub quantity: Quantity,

    pub timestamp: DateTime<Utc>,
}

impl Trade {
    pub fn new(
        instrument: InstrumentId,
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            instrument,
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            timestamp: Utc::now(),
        }
    }

    /// Whether the given order took part in this trade
    pub fn involves(&self, order_id: OrderId) -> bool {
        self.buy_order_id == order_id || self.sell_order_id == order_id
    }

    /// Calculate the notional value of the trade (price * quantity)
    ///
    /// Returns a Result because multiplication can overflow.
    pub fn notional_value(&self) -> NumericResult<Price> {
        self.price.checked_mul(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_creation() {
        let buy = OrderId::new();
        let sell = OrderId::new();
        let trade = Trade::new(
            InstrumentId::new("X"),
            buy,
            sell,
            "10.40".parse().unwrap(),
            Quantity::from_integer(50).unwrap(),
        );

        assert_eq!(trade.instrument.as_str(), "X");
        assert!(trade.involves(buy));
        assert!(trade.involves(sell));
        assert!(!trade.involves(OrderId::new()));
        assert_eq!(
            trade.notional_value().unwrap(),
            Price::from_integer(520).unwrap()
        );
    }
}
