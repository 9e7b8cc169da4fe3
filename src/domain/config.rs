// ============================================================================
// Venue Configuration
// Matching behaviour and read-side limits for a venue
// ============================================================================

use crate::numeric::{Price, Quantity};
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Matching Algorithm Type
// ============================================================================

/// Defines the matching algorithm used to cross the book
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MatchingAlgorithmType {
    /// Price/Time Priority: best price first, oldest first within a price.
    /// Every execution is priced at the resting ask.
    PriceTime,
}

// ============================================================================
// Venue Configuration
// ============================================================================

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VenueConfig {
    /// Matching algorithm for every listed instrument
    pub matching_algorithm: MatchingAlgorithmType,

    /// Trades returned by a trade query that names no limit
    pub default_trade_limit: usize,

    /// Upper bound on any trade query window; larger requests are clamped
    pub max_trade_limit: usize,

    /// Per-subscriber event buffer for the subscriber registry
    pub subscriber_capacity: usize,

    /// Optional: Price tick size (minimum price increment)
    /// None means no tick size enforcement
    pub tick_size: Option<Decimal>,

    /// Optional: Lot size (minimum face-value increment)
    /// None means no lot size enforcement
    pub lot_size: Option<Decimal>,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            matching_algorithm: MatchingAlgorithmType::PriceTime,
            default_trade_limit: 100,
            max_trade_limit: 100,
            subscriber_capacity: 1024,
            tick_size: None,
            lot_size: None,
        }
    }
}

impl VenueConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set the trade query window (default and maximum)
    pub fn with_trade_limits(mut self, default_limit: usize, max_limit: usize) -> Self {
        self.default_trade_limit = default_limit;
        self.max_trade_limit = max_limit;
        self
    }

    /// Builder method: Set per-subscriber buffer size
    pub fn with_subscriber_capacity(mut self, capacity: usize) -> Self {
        self.subscriber_capacity = capacity;
        self
    }

    /// Builder method: Set price tick size
    pub fn with_tick_size(mut self, tick: Decimal) -> Self {
        self.tick_size = Some(tick);
        self
    }

    /// Builder method: Set lot size
    pub fn with_lot_size(mut self, lot: Decimal) -> Self {
        self.lot_size = Some(lot);
        self
    }

    /// Clamp a requested trade window to the configured bounds
    pub fn trade_window(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_trade_limit)
            .min(self.max_trade_limit)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_trade_limit == 0 {
            return Err("Maximum trade limit must be positive".to_string());
        }

        if self.default_trade_limit > self.max_trade_limit {
            return Err("Default trade limit cannot exceed the maximum".to_string());
        }

        if self.subscriber_capacity == 0 {
            return Err("Subscriber capacity must be positive".to_string());
        }

        if let Some(tick) = self.tick_size {
            if tick <= Decimal::ZERO {
                return Err("Tick size must be positive".to_string());
            }
            if Price::from_decimal(tick).is_err() {
                return Err(format!("Tick size {} is finer than the price precision", tick));
            }
        }

        if let Some(lot) = self.lot_size {
            if lot <= Decimal::ZERO {
                return Err("Lot size must be positive".to_string());
            }
            if Quantity::from_decimal(lot).is_err() {
                return Err(format!("Lot size {} is finer than the quantity precision", lot));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl VenueConfig {
    /// Bond desk configuration
    /// - Price/Time priority
    /// - Prices in 0.01 steps
    /// - Face value in whole units
    pub fn bond_desk() -> Self {
        Self::default()
            .with_tick_size(Decimal::new(1, 2))
            .with_lot_size(Decimal::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VenueConfig::default();

        assert_eq!(config.matching_algorithm, MatchingAlgorithmType::PriceTime);
        assert_eq!(config.default_trade_limit, 100);
        assert!(config.tick_size.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_trade_window() {
        let config = VenueConfig::new().with_trade_limits(20, 50);

        assert_eq!(config.trade_window(None), 20);
        assert_eq!(config.trade_window(Some(5)), 5);
        assert_eq!(config.trade_window(Some(500)), 50);
    }

    #[test]
    fn test_validation() {
        assert!(VenueConfig::new().with_trade_limits(10, 0).validate().is_err());
        assert!(VenueConfig::new().with_trade_limits(200, 100).validate().is_err());
        assert!(VenueConfig::new().with_subscriber_capacity(0).validate().is_err());
        assert!(VenueConfig::new()
            .with_tick_size(Decimal::ZERO)
            .validate()
            .is_err());
        assert!(VenueConfig::new()
            .with_lot_size(Decimal::new(-1, 0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_steps_must_fit_precision() {
        assert!(VenueConfig::new()
            .with_tick_size(Decimal::new(1, 10))
            .validate()
            .is_err());
        assert!(VenueConfig::new()
            .with_lot_size(Decimal::new(5, 12))
            .validate()
            .is_err());
        assert!(VenueConfig::new()
            .with_tick_size(Decimal::new(1, 9))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_bond_desk_preset() {
        let config = VenueConfig::bond_desk();
        assert_eq!(config.tick_size, Some(Decimal::new(1, 2)));
        assert_eq!(config.lot_size, Some(Decimal::ONE));
        assert!(config.validate().is_ok());
    }
}
