// ============================================================================
// Instrument Reference Data
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique instrument identifier, typically an ISIN such as `INE123A01011`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct InstrumentId(String);

impl InstrumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstrumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for InstrumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A listed fixed-income instrument.
///
/// Created once at registration and never mutated by the matching core.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instrument {
    pub id: InstrumentId,
    /// Display name, e.g. "ABC Corp 9.1% 2028"
    pub name: String,
    /// Annual coupon rate in percent
    pub coupon: Decimal,
    /// Maturity date as supplied at registration (e.g. "2028-06-30")
    pub maturity: String,
    /// Nominal value of one unit
    pub face_value: Decimal,
    /// When the venue accepted the listing
    pub listed_at: DateTime<Utc>,
}

impl Instrument {
    /// Face value used when the registration omits one
    pub const DEFAULT_FACE_VALUE: Decimal = Decimal::ONE_HUNDRED;

    pub fn new(
        id: impl Into<InstrumentId>,
        name: impl Into<String>,
        coupon: Decimal,
        maturity: impl Into<String>,
        face_value: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coupon,
            maturity: maturity.into(),
            face_value,
            listed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_creation() {
        let bond = Instrument::new(
            "INE123A01011",
            "ABC Corp 9.1% 2028",
            Decimal::new(91, 1),
            "2028-06-30",
            Decimal::from(1000),
        );

        assert_eq!(bond.id.as_str(), "INE123A01011");
        assert_eq!(bond.id.to_string(), "INE123A01011");
        assert_eq!(bond.coupon, Decimal::new(91, 1));
        assert_eq!(Instrument::DEFAULT_FACE_VALUE, Decimal::from(100));
    }

    #[test]
    fn test_instrument_id_conversions() {
        let a = InstrumentId::from("X");
        let b = InstrumentId::from("X".to_string());
        assert_eq!(a, b);
        assert!(InstrumentId::new("A") < InstrumentId::new("B"));
    }
}
