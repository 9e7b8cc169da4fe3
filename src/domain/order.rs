// ============================================================================
// Order Domain Model
// ============================================================================

use super::InstrumentId;
use crate::numeric::{Price, Quantity};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Raised when a side label is neither `buy` nor `sell`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("side must be buy or sell, got {0:?}")]
pub struct ParseSideError(pub String);

impl FromStr for Side {
    type Err = ParseSideError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

// ============================================================================
// Order Status
// ============================================================================

pub mod state {
    use crate::numeric::Quantity;

    #[cfg(feature = "serde")]
    use serde::{Deserialize, Serialize};

    /// Lifecycle status of an order.
    ///
    /// Derived from fill state; `Cancelled` is part of the vocabulary but no
    /// venue operation produces it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[repr(u8)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
    pub enum OrderStatus {
        Open = 0,
        Partial = 1,
        Filled = 2,
        Cancelled = 3,
    }

    impl OrderStatus {
        pub const ALL: [OrderStatus; 4] = [
            OrderStatus::Open,
            OrderStatus::Partial,
            OrderStatus::Filled,
            OrderStatus::Cancelled,
        ];

        pub const ACTIVE: [OrderStatus; 2] = [OrderStatus::Open, OrderStatus::Partial];

        /// Derive the status from fill state.
        ///
        /// An order counts as filled once it is within one tolerance step
        /// (`Quantity::EPSILON`, 1e-9) of its quantity.
        pub fn from_fill(filled: Quantity, quantity: Quantity) -> Self {
            if filled >= quantity.saturating_sub_to_zero(Quantity::EPSILON) {
                OrderStatus::Filled
            } else if filled.is_zero() {
                OrderStatus::Open
            } else {
                OrderStatus::Partial
            }
        }

        /// Resting in the book and eligible for matching
        pub fn is_active(&self) -> bool {
            matches!(self, OrderStatus::Open | OrderStatus::Partial)
        }

        /// Fill progress never moves backwards: open → partial → filled.
        pub fn can_advance_to(&self, next: OrderStatus) -> bool {
            match (self, next) {
                (OrderStatus::Cancelled, _) => false,
                (_, OrderStatus::Cancelled) => true,
                (current, next) => (next as u8) >= (*current as u8),
            }
        }

        pub fn as_str(&self) -> &'static str {
            match self {
                OrderStatus::Open => "open",
                OrderStatus::Partial => "partial",
                OrderStatus::Filled => "filled",
                OrderStatus::Cancelled => "cancelled",
            }
        }
    }
}

use state::OrderStatus;

// ============================================================================
// Order Entity
// ============================================================================

/// A limit order for a face-value quantity of one instrument.
///
/// Fill state is private: it only moves through [`Order::try_fill`], which
/// keeps `0 <= filled <= quantity` and the derived status in step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Order {
    pub id: OrderId,
    pub instrument: InstrumentId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    /// Owner label supplied by the caller
    pub owner: String,
    pub timestamp: DateTime<Utc>,

    filled_quantity: Quantity,
    status: OrderStatus,
    /// Arrival order; breaks price ties ahead of the wall-clock timestamp
    sequence_number: u64,
}

impl Order {
    /// Owner label used when the caller supplies none
    pub const DEFAULT_OWNER: &'static str = "demo";

    pub fn new(
        instrument: InstrumentId,
        side: Side,
        price: Price,
        quantity: Quantity,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            id: OrderId::new(),
            instrument,
            side,
            price,
            quantity,
            owner: owner.into(),
            timestamp: Utc::now(),
            filled_quantity: Quantity::ZERO,
            status: OrderStatus::Open,
            sequence_number: 0,
        }
    }

    // ========================================================================
    // Getters
    // ========================================================================

    pub fn filled_quantity(&self) -> Quantity {
        self.filled_quantity
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.quantity.saturating_sub_to_zero(self.filled_quantity)
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Fill `quantity` of this order.
    ///
    /// Returns false, leaving the order untouched, if the quantity is not
    /// positive, the order is no longer active, or the fill would exceed the
    /// remaining quantity.
    pub fn try_fill(&mut self, quantity: Quantity) -> bool {
        if !quantity.is_positive() || !self.is_active() || quantity > self.remaining_quantity() {
            return false;
        }

        let filled = match self.filled_quantity.checked_add(quantity) {
            Ok(filled) => filled,
            Err(_) => return false,
        };

        let next = OrderStatus::from_fill(filled, self.quantity);
        debug_assert!(self.status.can_advance_to(next));

        self.filled_quantity = filled;
        self.status = next;
        true
    }

    /// Set the arrival sequence (assigned by the venue on acceptance)
    pub fn set_sequence_number(&mut self, seq: u64) {
        self.sequence_number = seq;
    }
}
