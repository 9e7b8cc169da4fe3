// ============================================================================
// Quote Domain Model
// Point-in-time best bid / best ask snapshots
// ============================================================================

use crate::numeric::{NumericResult, Price};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::InstrumentId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Best bid and best ask of one instrument at one moment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quote {
    pub id: Uuid,
    pub instrument: InstrumentId,
    pub bid: Option<Price>,
    pub ask: Option<Price>,
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    pub fn new(instrument: InstrumentId, bid: Option<Price>, ask: Option<Price>) -> Self {
        Self {
            id: Uuid::new_v4(),
            instrument,
            bid,
            ask,
            timestamp: Utc::now(),
        }
    }

    /// Quote with neither side, reported before any order has been seen.
    ///
    /// The id is nil and the timestamp is supplied by the caller so that
    /// repeated reads of an untouched instrument return the same value.
    pub fn empty(instrument: InstrumentId, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::nil(),
            instrument,
            bid: None,
            ask: None,
            timestamp,
        }
    }

    /// Ask minus bid, when both sides exist
    pub fn spread(&self) -> Option<NumericResult<Price>> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some(ask.checked_sub(bid)),
            _ => None,
        }
    }

    /// Midpoint of bid and ask, when both sides exist
    pub fn mid_price(&self) -> Option<Price> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => {
                let sum = bid.raw_value() as i128 + ask.raw_value() as i128;
                Some(Price::from_raw((sum / 2) as i64))
            },
            _ => None,
        }
    }
}

// ============================================================================
// Quote History
// ============================================================================

/// Append-only time series of quotes for one instrument
#[derive(Debug, Default, Clone)]
pub struct QuoteHistory {
    quotes: Vec<Quote>,
}

impl QuoteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_quotes(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    pub fn push(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    /// Keep only the first `len` quotes
    pub fn truncate(&mut self, len: usize) {
        self.quotes.truncate(len);
    }

    pub fn latest(&self) -> Option<&Quote> {
        self.quotes.last()
    }

    /// Most recent `limit` quotes, newest first
    pub fn recent(&self, limit: usize) -> Vec<Quote> {
        self.quotes.iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
