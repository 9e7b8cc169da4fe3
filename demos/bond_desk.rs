// ============================================================================
// Bond Desk Demo
// Seeds the demo bonds, streams live updates and works a small order flow
// ============================================================================
//
// cargo run --example bond_desk --features logging

use bond_venue::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::thread;
use tracing::info;

const ABC: &str = "INE123A01011";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    bond_venue::utils::init_logging("info");

    let config = VenueConfig::bond_desk();
    let registry = Arc::new(SubscriberRegistry::from_config(&config));
    let subscription = registry.subscribe();
    let listener = thread::spawn(move || {
        let mut seen = 0;
        for event in subscription.receiver.iter() {
            info!(instrument = %event.instrument_id(), "update: {:?}", event);
            seen += 1;
        }
        seen
    });

    let venue = VenueBuilder::new()
        .with_config(config)
        .with_sink(registry.clone())
        .build()?;

    let listed = venue.seed_demo_instruments()?;
    info!("Seeded {} instruments", listed);
    for bond in venue.instruments() {
        info!(
            "{} {} coupon {}% maturing {} (face value {})",
            bond.id, bond.name, bond.coupon, bond.maturity, bond.face_value
        );
    }

    let flow = [
        ("buy", Decimal::new(10050, 2), 100, "desk-a"),
        ("buy", Decimal::new(10075, 2), 40, "desk-b"),
        ("sell", Decimal::new(10100, 2), 60, "desk-c"),
        ("sell", Decimal::new(10050, 2), 90, "desk-d"),
    ];
    for (side, price, quantity, owner) in flow {
        let ack = venue.submit_order(
            OrderRequest::new(ABC, side, price, Decimal::from(quantity)).with_owner(owner),
        )?;
        info!("{} {} {} @ {} -> order {}", owner, side, quantity, price, ack.order_id);
        for trade in &ack.trades {
            info!("  traded {} @ {}", trade.quantity, trade.price);
        }
    }

    // rejected before it touches the book
    if let Err(err) = venue.submit_order(OrderRequest::new(ABC, "hold", Decimal::ONE, Decimal::ONE)) {
        info!("Rejected: {}", err);
    }

    let book = venue.order_book(ABC)?;
    for order in book.bids.iter().chain(book.asks.iter()) {
        info!(
            "{:>4} {:>8} {}/{} {:?} ({})",
            order.side, order.price, order.filled, order.quantity, order.status, order.owner
        );
    }

    let quote = venue.latest_quote(ABC)?;
    info!("Quote: bid {:?} ask {:?}", quote.bid, quote.ask);

    drop(venue);
    drop(registry);
    let updates = listener.join().map_err(|_| "listener panicked")?;
    info!("Listener saw {} updates", updates);

    Ok(())
}
