// ============================================================================
// Quote Calculator
// ============================================================================

use crate::domain::{OrderBook, Quote};

/// Derives the top-of-book quote from a settled book
pub struct QuoteCalculator;

impl QuoteCalculator {
    /// Best bid and best ask of `book`, stamped now.
    ///
    /// Either side is `None` when that side of the book is empty.
    pub fn compute(book: &OrderBook) -> Quote {
        Quote::new(
            book.instrument().clone(),
            book.best_buy().map(|order| order.price),
            book.best_sell().map(|order| order.price),
        )
    }
}
