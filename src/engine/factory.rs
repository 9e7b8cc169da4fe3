// ============================================================================
// Matching Engine Factory
// Creates per-instrument matching engines from venue configuration
// ============================================================================

use crate::domain::{Instrument, MatchingAlgorithmType, VenueConfig};
use crate::engine::{MatchingEngine, PriceTimePriority};
use crate::interfaces::MatchingAlgorithm;

/// Creates a matching engine for one instrument from configuration
///
/// # Example
/// ```
/// use bond_venue::prelude::*;
/// use bond_venue::engine::factory::create_matching_engine;
/// use rust_decimal::Decimal;
///
/// let bond = Instrument::new("INE123A01011", "ABC Corp 9.1% 2028", Decimal::new(91, 1), "2028-06-30", Decimal::from(1000));
/// let engine = create_matching_engine(bond, &VenueConfig::default());
/// assert_eq!(engine.algorithm_name(), "PriceTime");
/// ```
pub fn create_matching_engine(instrument: Instrument, config: &VenueConfig) -> MatchingEngine {
    MatchingEngine::new(
        instrument,
        create_matching_algorithm(&config.matching_algorithm),
    )
}

/// Creates the appropriate matching algorithm from configuration
pub fn create_matching_algorithm(algo_type: &MatchingAlgorithmType) -> Box<dyn MatchingAlgorithm> {
    match algo_type {
        MatchingAlgorithmType::PriceTime => Box::new(PriceTimePriority::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_create_price_time_engine() {
        let bond = Instrument::new(
            "INE456B02022",
            "XYZ Infra 8.2% 2030",
            Decimal::new(82, 1),
            "2030-12-31",
            Decimal::from(1000),
        );
        let engine = create_matching_engine(bond, &VenueConfig::bond_desk());

        assert_eq!(engine.instrument_id().as_str(), "INE456B02022");
        assert_eq!(engine.algorithm_name(), "PriceTime");
    }
}
