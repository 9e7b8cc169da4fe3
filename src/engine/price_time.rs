// ============================================================================
// Price/Time Priority Crossing Algorithm
// ============================================================================

use crate::domain::{OrderBook, OrderBookError, Trade};
use crate::interfaces::{MatchTrades, MatchingAlgorithm};

/// Price/Time Priority crossing
///
/// Repeatedly trades the best bid against the best ask until one side is
/// empty or the spread no longer crosses. Within a price, the oldest order
/// trades first.
///
/// Every execution is priced at the sell order's limit, whichever side
/// arrived last. This is the venue's convention, not a maker/taker rule.
///
/// # Example
/// ```text
/// Book:  Buy 10 @ 9.00 (t=1)
///        Buy 10 @ 9.50 (t=2)
///
/// Incoming: Sell 15 @ 9.00
/// Result: 10 @ 9.00 against the 9.50 buy, then 5 @ 9.00 against the 9.00 buy
/// ```
#[derive(Debug, Default)]
pub struct PriceTimePriority;

impl PriceTimePriority {
    pub fn new() -> Self {
        Self
    }
}

impl MatchingAlgorithm for PriceTimePriority {
    fn cross(&self, book: &mut OrderBook) -> Result<MatchTrades, OrderBookError> {
        let mut trades = MatchTrades::new();

        loop {
            let (buy_id, bid, buy_remaining) = match book.best_buy() {
                Some(order) => (order.id, order.price, order.remaining_quantity()),
                None => break,
            };
            let (sell_id, ask, sell_remaining) = match book.best_sell() {
                Some(order) => (order.id, order.price, order.remaining_quantity()),
                None => break,
            };

            if !self.prices_cross(bid, ask) {
                break;
            }

            let trade_quantity = buy_remaining.min(sell_remaining);
            if !trade_quantity.is_positive() {
                // Only reachable if a fully filled order were still resting
                break;
            }

            book.fill(buy_id, trade_quantity)?;
            book.fill(sell_id, trade_quantity)?;

            let trade = Trade::new(
                book.instrument().clone(),
                buy_id,
                sell_id,
                ask,
                trade_quantity,
            );
            tracing::debug!(
                instrument = %trade.instrument,
                price = %trade.price,
                quantity = %trade.quantity,
                "crossed {} against {}",
                buy_id,
                sell_id
            );
            trades.push(trade);
        }

        Ok(trades)
    }

    fn name(&self) -> &str {
        "PriceTime"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InstrumentId, Order, OrderStatus, Side};
    use crate::numeric::{Price, Quantity};

    fn px(s: &str) -> Price {
        s.parse().unwrap()
    }

    fn qty(v: i64) -> Quantity {
        Quantity::from_integer(v).unwrap()
    }

    fn rest(book: &mut OrderBook, side: Side, price: &str, quantity: i64, seq: u64) -> Order {
        let mut order = Order::new(
            InstrumentId::new("X"),
            side,
            px(price),
            qty(quantity),
            "demo",
        );
        order.set_sequence_number(seq);
        book.insert(order.clone()).unwrap();
        order
    }

    #[test]
    fn test_no_cross_leaves_book_untouched() {
        let algo = PriceTimePriority::new();
        let mut book = OrderBook::new(InstrumentId::new("X"));
        rest(&mut book, Side::Buy, "9.00", 10, 1);
        rest(&mut book, Side::Sell, "9.50", 10, 2);

        let trades = algo.cross(&mut book).unwrap();

        assert!(trades.is_empty());
        assert_eq!(book.active_buys().len(), 1);
        assert_eq!(book.active_sells().len(), 1);
    }

    #[test]
    fn test_one_sided_book_is_quiescent() {
        let algo = PriceTimePriority::new();
        let mut book = OrderBook::new(InstrumentId::new("X"));
        rest(&mut book, Side::Buy, "9.00", 10, 1);

        assert!(algo.cross(&mut book).unwrap().is_empty());
    }

    #[test]
    fn test_priced_at_ask_when_buy_arrives() {
        let algo = PriceTimePriority::new();
        let mut book = OrderBook::new(InstrumentId::new("X"));
        let sell = rest(&mut book, Side::Sell, "10.40", 50, 1);
        let buy = rest(&mut book, Side::Buy, "10.50", 100, 2);

        let trades = algo.cross(&mut book).unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].price, px("10.40"));
        assert_eq!(trades[0].quantity, qty(50));
        assert_eq!(trades[0].buy_order_id, buy.id);
        assert_eq!(trades[0].sell_order_id, sell.id);
        assert_eq!(book.get(&buy.id).unwrap().status(), OrderStatus::Partial);
        assert_eq!(book.get(&sell.id).unwrap().status(), OrderStatus::Filled);
    }

    #[test]
    fn test_price_priority_then_fifo() {
        let algo = PriceTimePriority::new();
        let mut book = OrderBook::new(InstrumentId::new("X"));
        let early = rest(&mut book, Side::Buy, "9.00", 10, 1);
        let better = rest(&mut book, Side::Buy, "9.50", 10, 2);
        let late = rest(&mut book, Side::Buy, "9.00", 10, 3);
        let sell = rest(&mut book, Side::Sell, "9.00", 15, 4);

        let trades = algo.cross(&mut book).unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].buy_order_id, better.id);
        assert_eq!(trades[0].quantity, qty(10));
        assert_eq!(trades[1].buy_order_id, early.id);
        assert_eq!(trades[1].quantity, qty(5));
        assert!(trades.iter().all(|t| t.price == px("9.00")));
        assert!(trades.iter().all(|t| t.sell_order_id == sell.id));

        assert_eq!(book.get(&late.id).unwrap().status(), OrderStatus::Open);
        assert_eq!(book.get(&early.id).unwrap().filled_quantity(), qty(5));
        assert!(!book.is_crossed());
    }

    #[test]
    fn test_sweeps_multiple_ask_levels_at_each_ask() {
        let algo = PriceTimePriority::new();
        let mut book = OrderBook::new(InstrumentId::new("X"));
        rest(&mut book, Side::Sell, "99.10", 5, 1);
        rest(&mut book, Side::Sell, "99.20", 5, 2);
        rest(&mut book, Side::Sell, "99.30", 5, 3);
        rest(&mut book, Side::Buy, "99.25", 12, 4);

        let trades = algo.cross(&mut book).unwrap();

        let prices: Vec<Price> = trades.iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![px("99.10"), px("99.20")]);
        assert_eq!(book.best_buy().unwrap().remaining_quantity(), qty(2));
        assert_eq!(book.best_sell().unwrap().price, px("99.30"));
    }
}
