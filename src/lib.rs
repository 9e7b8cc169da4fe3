// ============================================================================
// Bond Venue Library
// Price/time priority matching core for a fixed-income trading venue
// ============================================================================

//! # Bond Venue
//!
//! The matching core of a fixed-income trading venue: per-instrument order
//! books, price/time priority crossing, an append-only trade ledger and a
//! best-bid/best-ask quote series.
//!
//! ## Features
//!
//! - **Per-instrument serialization**: one mutex per instrument, unrelated
//!   instruments match in parallel
//! - **Fixed-point prices and quantities** with a 1e-9 fill tolerance
//! - **Transactional persistence** through an injected [`Repository`](interfaces::Repository)
//! - **Best-effort live updates** through a [`NotificationSink`](interfaces::NotificationSink)
//!
//! ## Example
//!
//! ```rust
//! use bond_venue::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let venue = VenueBuilder::new().build().unwrap();
//! venue
//!     .register_instrument(InstrumentRequest::new(
//!         "INE123A01011",
//!         "ABC Corp 9.1% 2028",
//!         Decimal::new(91, 1),
//!         "2028-06-30",
//!     ))
//!     .unwrap();
//!
//! venue
//!     .submit_order(OrderRequest::new("INE123A01011", "buy", Decimal::new(1050, 2), Decimal::from(100)))
//!     .unwrap();
//! let ack = venue
//!     .submit_order(OrderRequest::new("INE123A01011", "sell", Decimal::new(1040, 2), Decimal::from(50)))
//!     .unwrap();
//!
//! // Executions are always priced at the ask
//! assert_eq!(ack.trades.len(), 1);
//! assert_eq!(ack.trades[0].price, Decimal::new(1040, 2));
//!
//! let quote = venue.latest_quote("INE123A01011").unwrap();
//! assert_eq!(quote.bid, Some(Decimal::new(105, 1)));
//! assert_eq!(quote.ask, None);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod notify;
pub mod numeric;
pub mod storage;
pub mod utils;
pub mod venue;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::order::state::OrderStatus;
    pub use crate::domain::{
        Instrument, InstrumentId, MatchingAlgorithmType, Order, OrderBookSnapshot, OrderId, Quote,
        Side, Trade, VenueConfig,
    };
    pub use crate::engine::{MatchOutcome, MatchingEngine, PriceTimePriority};
    pub use crate::interfaces::{
        LoggingSink, MatchingAlgorithm, NoOpSink, NotificationSink, Repository, StorageError,
        Transaction, VenueEvent,
    };
    #[cfg(feature = "async")]
    pub use crate::notify::BroadcastSink;
    pub use crate::notify::{SubscriberRegistry, Subscription};
    pub use crate::storage::InMemoryRepository;
    pub use crate::venue::api::{
        InstrumentRequest, InstrumentView, OrderAck, OrderBookView, OrderRequest, OrderView,
        QuoteView, TradeView,
    };
    pub use crate::venue::{Venue, VenueBuilder, VenueError, VenueResult};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn venue_with(repo: InMemoryRepository, sink: Arc<dyn NotificationSink>) -> Venue {
        let venue = VenueBuilder::new()
            .with_repository(Arc::new(repo))
            .with_sink(sink)
            .build()
            .unwrap();
        venue
            .register_instrument(InstrumentRequest::new("X", "X Corp 7% 2032", dec("7"), "2032-03-31"))
            .unwrap();
        venue
    }

    fn venue() -> Venue {
        venue_with(InMemoryRepository::new(), Arc::new(NoOpSink))
    }

    fn submit(venue: &Venue, side: &str, price: &str, quantity: &str) -> OrderAck {
        venue
            .submit_order(OrderRequest::new("X", side, dec(price), dec(quantity)))
            .unwrap()
    }

    fn order(venue: &Venue, id: &OrderId) -> OrderView {
        venue.order("X", id).unwrap().unwrap()
    }

    #[test]
    fn test_partial_fill_priced_at_ask() {
        let venue = venue();

        let buy = submit(&venue, "buy", "10.50", "100");
        assert!(buy.trades.is_empty());

        let sell = submit(&venue, "sell", "10.40", "50");
        assert_eq!(sell.trades.len(), 1);
        assert_eq!(sell.trades[0].quantity, dec("50"));
        assert_eq!(sell.trades[0].price, dec("10.40"));
        assert_eq!(sell.trades[0].buy_order_id, buy.order_id);
        assert_eq!(sell.trades[0].sell_order_id, sell.order_id);

        let buy_view = order(&venue, &buy.order_id);
        assert_eq!(buy_view.status, OrderStatus::Partial);
        assert_eq!(buy_view.filled, dec("50"));

        let sell_view = order(&venue, &sell.order_id);
        assert_eq!(sell_view.status, OrderStatus::Filled);
        assert_eq!(sell_view.filled, dec("50"));

        let quote = venue.latest_quote("X").unwrap();
        assert_eq!(quote.bid, Some(dec("10.50")));
        assert_eq!(quote.ask, None);
    }

    #[test]
    fn test_price_priority_across_levels() {
        let venue = venue();

        let low = submit(&venue, "buy", "9.00", "10");
        let high = submit(&venue, "buy", "9.50", "10");
        let sell = submit(&venue, "sell", "9.00", "15");

        assert_eq!(sell.trades.len(), 2);
        assert_eq!(sell.trades[0].quantity, dec("10"));
        assert_eq!(sell.trades[0].price, dec("9.00"));
        assert_eq!(sell.trades[0].buy_order_id, high.order_id);
        assert_eq!(sell.trades[1].quantity, dec("5"));
        assert_eq!(sell.trades[1].price, dec("9.00"));
        assert_eq!(sell.trades[1].buy_order_id, low.order_id);

        assert_eq!(order(&venue, &high.order_id).status, OrderStatus::Filled);
        let low_view = order(&venue, &low.order_id);
        assert_eq!(low_view.status, OrderStatus::Partial);
        assert_eq!(low_view.filled, dec("5"));
        assert_eq!(order(&venue, &sell.order_id).status, OrderStatus::Filled);

        let quote = venue.latest_quote("X").unwrap();
        assert_eq!(quote.bid, Some(dec("9.00")));
        assert_eq!(quote.ask, None);

        // newest first
        let trades = venue.trades("X", None).unwrap();
        assert_eq!(trades[0].quantity, dec("5"));
        assert_eq!(trades[1].quantity, dec("10"));
    }

    #[test]
    fn test_unknown_instrument_changes_nothing() {
        let repo = InMemoryRepository::new();
        let registry = Arc::new(SubscriberRegistry::new(8));
        let subscription = registry.subscribe();
        let venue = venue_with(repo.clone(), registry.clone());
        let quotes_before = venue.quote_history("X", 100).unwrap();

        let result = venue.submit_order(OrderRequest::new("UNLISTED", "sell", dec("10"), dec("5")));

        assert!(matches!(result, Err(VenueError::NotFound(_))));
        assert_eq!(repo.order_count(), 0);
        assert!(venue.trades("X", None).unwrap().is_empty());
        assert_eq!(venue.quote_history("X", 100).unwrap(), quotes_before);
        assert!(subscription.receiver.try_recv().is_err());
    }

    #[test]
    fn test_invalid_side_changes_nothing() {
        let repo = InMemoryRepository::new();
        let venue = venue_with(repo.clone(), Arc::new(NoOpSink));
        submit(&venue, "sell", "10", "5");
        let book_before = venue.order_book("X").unwrap();
        let quote_before = venue.latest_quote("X").unwrap();

        let result = venue.submit_order(OrderRequest::new("X", "hold", dec("10"), dec("5")));

        assert!(matches!(result, Err(VenueError::InvalidArgument(_))));
        assert_eq!(repo.order_count(), 1);
        assert_eq!(venue.order_book("X").unwrap(), book_before);
        assert_eq!(venue.latest_quote("X").unwrap(), quote_before);
    }

    #[test]
    fn test_one_event_per_submission() {
        let registry = Arc::new(SubscriberRegistry::new(64));
        let subscription = registry.subscribe();
        let venue = venue_with(InMemoryRepository::new(), registry.clone());

        submit(&venue, "buy", "9.00", "10");
        submit(&venue, "buy", "9.50", "10");
        let sweep = submit(&venue, "sell", "9.00", "15");
        assert_eq!(sweep.trades.len(), 2);

        let events: Vec<VenueEvent> = subscription.receiver.try_iter().collect();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[2],
            VenueEvent::order_update(InstrumentId::new("X"), sweep.order_id)
        );
    }

    #[test]
    fn test_dropped_subscriber_does_not_fail_submission() {
        let registry = Arc::new(SubscriberRegistry::new(1));
        let slow = registry.subscribe();
        let gone = registry.subscribe();
        drop(gone);
        let venue = venue_with(InMemoryRepository::new(), registry.clone());

        submit(&venue, "buy", "9.00", "10");
        submit(&venue, "buy", "9.10", "10");

        assert_eq!(registry.len(), 1);
        assert_eq!(slow.receiver.try_iter().count(), 1);
    }

    #[test]
    fn test_reads_are_pure() {
        let venue = venue();
        let untouched_first = venue.latest_quote("X").unwrap();
        assert_eq!(venue.latest_quote("X").unwrap(), untouched_first);

        submit(&venue, "buy", "9.00", "10");
        submit(&venue, "sell", "9.20", "10");

        let book = venue.order_book("X").unwrap();
        let quote = venue.latest_quote("X").unwrap();
        for _ in 0..3 {
            assert_eq!(venue.order_book("X").unwrap(), book);
            assert_eq!(venue.latest_quote("X").unwrap(), quote);
        }
    }

    #[test]
    fn test_depth_aggregates_levels() {
        let venue = venue();
        submit(&venue, "buy", "9.00", "10");
        submit(&venue, "buy", "9.00", "5");
        submit(&venue, "buy", "8.90", "7");
        submit(&venue, "sell", "9.20", "3");

        let depth = venue.depth("X", 5).unwrap();
        assert_eq!(depth.bids.len(), 2);
        assert_eq!(depth.bids[0].1.to_decimal(), dec("15"));
        assert_eq!(depth.best_ask().map(|p| p.to_decimal()), Some(dec("9.2")));
        assert_eq!(depth.spread.map(|p| p.to_decimal()), Some(dec("0.2")));
    }

    #[test]
    fn test_concurrent_submissions_keep_invariants() {
        let repo = InMemoryRepository::new();
        let venue = Arc::new(
            VenueBuilder::new()
                .with_config(VenueConfig::new().with_trade_limits(100, 10_000))
                .with_repository(Arc::new(repo.clone()))
                .build()
                .unwrap(),
        );
        for id in ["A", "B"] {
            venue
                .register_instrument(InstrumentRequest::new(id, "Bond", dec("6"), "2035-01-01"))
                .unwrap();
        }

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let venue = Arc::clone(&venue);
                thread::spawn(move || {
                    for i in 0..100u32 {
                        let instrument = if (i + t) % 2 == 0 { "A" } else { "B" };
                        let side = if (i * 7 + t) % 3 == 0 { "sell" } else { "buy" };
                        let price = Decimal::new(9900 + i64::from((i * 13 + t) % 40), 2);
                        let quantity = Decimal::from(1 + (i * 5 + t) % 17);
                        venue
                            .submit_order(OrderRequest::new(instrument, side, price, quantity))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(repo.order_count(), 400);
        for id in ["A", "B"] {
            let book = venue.order_book(id).unwrap();
            if let (Some(bid), Some(ask)) = (book.bids.first(), book.asks.first()) {
                assert!(bid.price < ask.price);
            }

            let mut executed: HashMap<OrderId, Decimal> = HashMap::new();
            for trade in venue.trades(id, Some(10_000)).unwrap() {
                *executed.entry(trade.buy_order_id).or_default() += trade.quantity;
                *executed.entry(trade.sell_order_id).or_default() += trade.quantity;
            }
            for (order_id, total) in executed {
                let view = venue.order(id, &order_id).unwrap().unwrap();
                assert_eq!(view.filled, total);
                assert!(total <= view.quantity);
            }
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn rank(status: OrderStatus) -> u8 {
            status as u8
        }

        proptest! {
            #[test]
            fn prop_book_invariants_hold_after_every_submission(
                orders in prop::collection::vec((any::<bool>(), 95u32..106, 1u32..40), 1..60)
            ) {
                let venue = VenueBuilder::new()
                    .with_config(VenueConfig::new().with_trade_limits(100, 10_000))
                    .build()
                    .unwrap();
                venue
                    .register_instrument(InstrumentRequest::new("X", "X Corp", Decimal::from(5), "2030"))
                    .unwrap();

                let mut seen: HashMap<OrderId, u8> = HashMap::new();
                for (is_buy, price, quantity) in orders {
                    let side = if is_buy { "buy" } else { "sell" };
                    let ack = venue
                        .submit_order(OrderRequest::new(
                            "X",
                            side,
                            Decimal::new(i64::from(price) * 10, 1),
                            Decimal::from(quantity),
                        ))
                        .unwrap();
                    seen.insert(ack.order_id, 0);

                    // no residual cross
                    let book = venue.order_book("X").unwrap();
                    if let (Some(bid), Some(ask)) = (book.bids.first(), book.asks.first()) {
                        prop_assert!(bid.price < ask.price);
                    }
                    prop_assert_eq!(venue.order_book("X").unwrap(), book);

                    // fill bounds and monotonic status
                    for (id, last) in seen.iter_mut() {
                        let view = venue.order("X", id).unwrap().unwrap();
                        prop_assert!(view.filled >= Decimal::ZERO);
                        prop_assert!(view.filled <= view.quantity);
                        prop_assert!(rank(view.status) >= *last);
                        *last = rank(view.status);
                    }
                }

                // executed quantity per order never exceeds the order
                let mut executed: HashMap<OrderId, Decimal> = HashMap::new();
                for trade in venue.trades("X", Some(10_000)).unwrap() {
                    prop_assert!(trade.price > Decimal::ZERO);
                    *executed.entry(trade.buy_order_id).or_default() += trade.quantity;
                    *executed.entry(trade.sell_order_id).or_default() += trade.quantity;
                }
                for (id, total) in executed {
                    let view = venue.order("X", &id).unwrap().unwrap();
                    prop_assert!(total <= view.quantity);
                }

                let quote = venue.latest_quote("X").unwrap();
                prop_assert_eq!(venue.latest_quote("X").unwrap(), quote);
            }
        }
    }
}
