// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod config;
pub mod instrument;
pub mod order;
pub mod order_book;
pub mod quote;
pub mod trade;

pub use config::{MatchingAlgorithmType, VenueConfig};
pub use instrument::{Instrument, InstrumentId};
pub use order::{Order, OrderId, ParseSideError, Side};
pub use order_book::{OrderBook, OrderBookError, OrderBookLevel, OrderBookSide, OrderBookSnapshot};
pub use quote::{Quote, QuoteHistory};
pub use trade::Trade;

// Re-export status vocabulary
pub use order::state::OrderStatus;
