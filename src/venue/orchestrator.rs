// ============================================================================
// Venue
// Per-instrument serialized matching with transactional persistence
// ============================================================================

use crate::domain::{
    Instrument, InstrumentId, Order, OrderBookSnapshot, OrderId, OrderStatus, Side, VenueConfig,
};
use crate::engine::{create_matching_algorithm, create_matching_engine, MatchingEngine};
use crate::interfaces::{NotificationSink, Repository, StorageError, VenueEvent};
use crate::numeric::{Price, Quantity};
use crate::venue::api::{
    InstrumentRequest, InstrumentView, OrderAck, OrderBookView, OrderRequest, OrderView, QuoteView,
    TradeView,
};
use crate::venue::{VenueError, VenueResult};
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type Market = Arc<Mutex<MatchingEngine>>;

/// The venue orchestrator.
///
/// Each instrument's engine sits behind its own mutex: insertion, crossing,
/// ledger and quote updates plus the repository commit for one submission
/// happen while it is held, so submissions on one instrument are strictly
/// serialized and unrelated instruments proceed in parallel. Events are
/// published after the mutex is released.
pub struct Venue {
    config: VenueConfig,
    markets: RwLock<HashMap<InstrumentId, Market>>,
    repository: Arc<dyn Repository>,
    sink: Arc<dyn NotificationSink>,
    tick: Option<Price>,
    lot: Option<Quantity>,
    /// Venue-wide arrival counter; drives time priority within a price level
    sequence: AtomicU64,
}

impl Venue {
    /// Create an empty venue. Fails if `config` does not validate.
    pub fn new(
        config: VenueConfig,
        repository: Arc<dyn Repository>,
        sink: Arc<dyn NotificationSink>,
    ) -> VenueResult<Self> {
        config.validate().map_err(VenueError::InvalidArgument)?;
        let tick = config.tick_size.map(Price::from_decimal).transpose()?;
        let lot = config.lot_size.map(Quantity::from_decimal).transpose()?;

        Ok(Self {
            config,
            tick,
            lot,
            markets: RwLock::new(HashMap::new()),
            repository,
            sink,
            sequence: AtomicU64::new(1),
        })
    }

    /// Rebuild a venue from everything `repository` holds.
    ///
    /// Orders are replayed in arrival order so resting orders keep their
    /// time priority; new submissions continue the persisted sequence.
    pub fn restore(
        config: VenueConfig,
        repository: Arc<dyn Repository>,
        sink: Arc<dyn NotificationSink>,
    ) -> VenueResult<Self> {
        let venue = Self::new(config, repository, sink)?;
        let mut next_sequence: u64 = 1;
        let mut order_count = 0;

        {
            let mut markets = venue.markets.write();
            for instrument in venue.repository.instruments()? {
                let id = instrument.id.clone();
                let orders = venue.repository.orders(&id, &OrderStatus::ALL)?;
                let mut trades = venue.repository.trades(&id, usize::MAX)?;
                trades.reverse();
                let quotes = venue.repository.quotes(&id)?;

                if let Some(max) = orders.iter().map(Order::sequence_number).max() {
                    next_sequence = next_sequence.max(max + 1);
                }
                order_count += orders.len();

                let engine = MatchingEngine::restore(
                    instrument,
                    create_matching_algorithm(&venue.config.matching_algorithm),
                    orders,
                    trades,
                    quotes,
                )?;
                markets.insert(id, Arc::new(Mutex::new(engine)));
            }

            tracing::info!(
                instruments = markets.len(),
                orders = order_count,
                next_sequence,
                "venue restored"
            );
        }

        venue.sequence.store(next_sequence, Ordering::SeqCst);
        Ok(venue)
    }

    pub fn config(&self) -> &VenueConfig {
        &self.config
    }

    // ========================================================================
    // Instruments
    // ========================================================================

    /// List a new instrument. Fails with `Conflict` if the id is taken.
    pub fn register_instrument(&self, request: InstrumentRequest) -> VenueResult<InstrumentView> {
        let id = request.id.trim();
        if id.is_empty() {
            return Err(VenueError::invalid("instrument id must not be empty"));
        }
        if request.name.trim().is_empty() {
            return Err(VenueError::invalid("instrument name must not be empty"));
        }
        if request.coupon.is_sign_negative() {
            return Err(VenueError::invalid("coupon must not be negative"));
        }
        let face_value = request.face_value.unwrap_or(Instrument::DEFAULT_FACE_VALUE);
        if face_value <= Decimal::ZERO {
            return Err(VenueError::invalid("face value must be positive"));
        }

        let instrument = Instrument::new(
            id,
            request.name.trim(),
            request.coupon,
            request.maturity,
            face_value,
        );

        let mut markets = self.markets.write();
        if markets.contains_key(&instrument.id) {
            return Err(VenueError::Conflict(format!(
                "instrument {} already exists",
                instrument.id
            )));
        }

        let mut tx = self.repository.begin();
        tx.put_instrument(instrument.clone());
        tx.commit().map_err(|err| match err {
            StorageError::Duplicate(id) => {
                VenueError::Conflict(format!("instrument {} already exists", id))
            },
            other => other.into(),
        })?;

        let view = InstrumentView::from(&instrument);
        tracing::info!(instrument = %instrument.id, name = %instrument.name, "instrument listed");
        markets.insert(
            instrument.id.clone(),
            Arc::new(Mutex::new(create_matching_engine(instrument, &self.config))),
        );

        Ok(view)
    }

    /// Registered instruments, oldest listing first
    pub fn instruments(&self) -> Vec<InstrumentView> {
        let markets: Vec<Market> = self.markets.read().values().cloned().collect();
        let mut instruments: Vec<Instrument> = markets
            .iter()
            .map(|market| market.lock().instrument().clone())
            .collect();
        instruments.sort_by(|a, b| a.listed_at.cmp(&b.listed_at).then_with(|| a.id.cmp(&b.id)));
        instruments.iter().map(InstrumentView::from).collect()
    }

    /// List the two demo bonds if the venue has no instruments yet.
    ///
    /// Returns how many instruments were registered.
    pub fn seed_demo_instruments(&self) -> VenueResult<usize> {
        if !self.markets.read().is_empty() {
            return Ok(0);
        }

        let demo = [
            InstrumentRequest::new(
                "INE123A01011",
                "ABC Corp 9.1% 2028",
                Decimal::new(91, 1),
                "2028-06-30",
            )
            .with_face_value(Decimal::from(1000)),
            InstrumentRequest::new(
                "INE456B02022",
                "XYZ Infra 8.2% 2030",
                Decimal::new(82, 1),
                "2030-12-31",
            )
            .with_face_value(Decimal::from(1000)),
        ];

        let mut registered = 0;
        for request in demo {
            match self.register_instrument(request) {
                Ok(_) => registered += 1,
                // lost a race with a concurrent seed
                Err(VenueError::Conflict(_)) => {},
                Err(err) => return Err(err),
            }
        }
        Ok(registered)
    }

    // ========================================================================
    // Order Submission
    // ========================================================================

    /// Accept a limit order, cross the book to quiescence and quote.
    ///
    /// The request is fully validated before anything is touched. On success
    /// exactly one `order_update` event is published.
    ///
    /// # Errors
    /// - `InvalidArgument` for a bad side, price or quantity
    /// - `NotFound` for an unknown instrument
    /// - `Storage` if the commit failed; the book, ledger and quote history
    ///   are put back as they were, so nothing of the order remains
    pub fn submit_order(&self, request: OrderRequest) -> VenueResult<OrderAck> {
        let side: Side = request.side.parse()?;
        let price = self.validate_price(request.price)?;
        let quantity = self.validate_quantity(request.quantity)?;
        let owner = request
            .owner
            .filter(|owner| !owner.trim().is_empty())
            .unwrap_or_else(|| Order::DEFAULT_OWNER.to_string());

        let instrument_id = InstrumentId::new(request.instrument_id.trim());
        let market = self.market(&instrument_id)?;

        let outcome = {
            let mut engine = market.lock();
            let mut tx = self.repository.begin();

            let mut order = Order::new(instrument_id.clone(), side, price, quantity, owner);
            order.set_sequence_number(self.sequence.fetch_add(1, Ordering::SeqCst));

            let checkpoint = engine.checkpoint();
            let outcome = engine.submit_order(order)?;

            for order in &outcome.touched_orders {
                tx.put_order(order.clone());
            }
            for trade in &outcome.trades {
                tx.put_trade(trade.clone());
            }
            tx.put_quote(outcome.quote.clone());

            if let Err(err) = tx.commit() {
                engine.rollback(checkpoint);
                tracing::error!(
                    instrument = %instrument_id,
                    order_id = %outcome.order_id,
                    trades = outcome.trades.len(),
                    "commit failed, matching rolled back: {}",
                    err
                );
                return Err(err.into());
            }
            outcome
        };

        tracing::info!(
            instrument = %instrument_id,
            order_id = %outcome.order_id,
            %side,
            %price,
            %quantity,
            trades = outcome.trades.len(),
            "order accepted"
        );

        self.sink
            .publish(&VenueEvent::order_update(instrument_id, outcome.order_id));

        Ok(OrderAck {
            order_id: outcome.order_id,
            trades: outcome.trades.iter().map(TradeView::from).collect(),
        })
    }

    fn validate_price(&self, price: Decimal) -> VenueResult<Price> {
        if price <= Decimal::ZERO {
            return Err(VenueError::invalid("price must be positive"));
        }
        let price = Price::from_decimal(price)?;
        if let Some(tick) = self.tick {
            if !price.is_multiple_of(tick) {
                return Err(VenueError::invalid(format!(
                    "price {} is not a multiple of tick size {}",
                    price, tick
                )));
            }
        }
        Ok(price)
    }

    fn validate_quantity(&self, quantity: Decimal) -> VenueResult<Quantity> {
        if quantity <= Decimal::ZERO {
            return Err(VenueError::invalid("quantity must be positive"));
        }
        let quantity = Quantity::from_decimal(quantity)?;
        if let Some(lot) = self.lot {
            if !quantity.is_multiple_of(lot) {
                return Err(VenueError::invalid(format!(
                    "quantity {} is not a multiple of lot size {}",
                    quantity, lot
                )));
            }
        }
        Ok(quantity)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Active orders of one instrument, best price first, oldest first
    /// within a price
    pub fn order_book(&self, instrument_id: &str) -> VenueResult<OrderBookView> {
        let market = self.market(&InstrumentId::new(instrument_id))?;
        let engine = market.lock();
        let book = engine.book();

        Ok(OrderBookView {
            instrument_id: engine.instrument_id().clone(),
            bids: book.active_buys().into_iter().map(OrderView::from).collect(),
            asks: book.active_sells().into_iter().map(OrderView::from).collect(),
        })
    }

    /// Most recent trades, newest first. `None` uses the configured default
    /// window; larger requests are clamped to the configured maximum.
    pub fn trades(&self, instrument_id: &str, limit: Option<usize>) -> VenueResult<Vec<TradeView>> {
        let market = self.market(&InstrumentId::new(instrument_id))?;
        let window = self.config.trade_window(limit);
        let trades = market.lock().recent_trades(window);
        Ok(trades.iter().map(TradeView::from).collect())
    }

    pub fn latest_quote(&self, instrument_id: &str) -> VenueResult<QuoteView> {
        let market = self.market(&InstrumentId::new(instrument_id))?;
        let quote = market.lock().latest_quote();
        Ok(QuoteView::from(&quote))
    }

    /// Quote snapshots, newest first
    pub fn quote_history(&self, instrument_id: &str, limit: usize) -> VenueResult<Vec<QuoteView>> {
        let market = self.market(&InstrumentId::new(instrument_id))?;
        let quotes = market.lock().quote_history(limit);
        Ok(quotes.iter().map(QuoteView::from).collect())
    }

    /// Aggregated price levels per side
    pub fn depth(&self, instrument_id: &str, levels: usize) -> VenueResult<OrderBookSnapshot> {
        let market = self.market(&InstrumentId::new(instrument_id))?;
        let snapshot = market.lock().get_snapshot(levels);
        Ok(snapshot)
    }

    /// Look up any order the instrument has seen, active or not
    pub fn order(&self, instrument_id: &str, order_id: &OrderId) -> VenueResult<Option<OrderView>> {
        let market = self.market(&InstrumentId::new(instrument_id))?;
        let engine = market.lock();
        Ok(engine.book().get(order_id).map(OrderView::from))
    }

    fn market(&self, instrument_id: &InstrumentId) -> VenueResult<Market> {
        self.markets
            .read()
            .get(instrument_id)
            .cloned()
            .ok_or_else(|| VenueError::not_found(instrument_id))
    }
}
