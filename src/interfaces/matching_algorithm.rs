// ============================================================================
// Matching Algorithm Interface
// Defines the contract for pluggable crossing algorithms
// ============================================================================

use crate::domain::{OrderBook, OrderBookError, Trade};
use crate::numeric::Price;
use smallvec::SmallVec;

/// Trades produced by one crossing pass, in execution order.
///
/// Most passes produce zero or one trade, so a handful stay inline.
pub type MatchTrades = SmallVec<[Trade; 4]>;

/// Strategy pattern interface for matching algorithms
pub trait MatchingAlgorithm: Send + Sync {
    /// Cross the book until no further trade is possible
    ///
    /// # Arguments
    /// * `book` - The instrument's book, already holding the newly inserted order
    ///
    /// # Returns
    /// Trades generated during the pass, possibly none
    fn cross(&self, book: &mut OrderBook) -> Result<MatchTrades, OrderBookError>;

    /// Get the algorithm name for logging
    fn name(&self) -> &str;

    /// Check if a bid and an ask can trade
    fn prices_cross(&self, bid: Price, ask: Price) -> bool {
        bid >= ask
    }
}
