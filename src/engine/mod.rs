// ============================================================================
// Engine Module
// Contains the core matching business logic
// ============================================================================

mod matching_engine;
mod price_time;
mod quote_calculator;
mod trade_ledger;

pub mod factory;

pub use factory::{create_matching_algorithm, create_matching_engine};
pub use matching_engine::{EngineCheckpoint, MatchOutcome, MatchingEngine};
pub use price_time::PriceTimePriority;
pub use quote_calculator::QuoteCalculator;
pub use trade_ledger::TradeLedger;
