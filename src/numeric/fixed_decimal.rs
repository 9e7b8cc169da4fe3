// ============================================================================
// Fixed-Point Decimal
// Exact fixed-point arithmetic for prices and face-value quantities
// ============================================================================

use super::errors::{NumericError, NumericResult};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Neg;

/// Fixed-point decimal number with compile-time precision.
///
/// Internally stores `value × 10^DECIMALS` as an i64.
///
/// # Type Parameter
/// - `DECIMALS`: Number of decimal places (0-18). Default is 9.
///
/// # Value Range
/// With DECIMALS=9 (default):
/// - Minimum: -9,223,372,036.854775808
/// - Maximum: +9,223,372,036.854775807
/// - Precision: 0.000000001 (one nano-unit)
///
/// One raw unit at the default precision is exactly the fill tolerance used
/// when deciding whether an order is filled, so tolerance checks become
/// integer comparisons.
///
/// # Example
/// ```
/// use bond_venue::numeric::FixedDecimal;
///
/// let price: FixedDecimal<9> = "101.25".parse().unwrap();
/// let qty = FixedDecimal::<9>::from_integer(40).unwrap();
/// let notional = price.checked_mul(qty).unwrap();
/// assert_eq!(notional.to_string(), "4050.000000000");
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct FixedDecimal<const DECIMALS: u8 = 9>(i64);

// ============================================================================
// Scale Constants
// ============================================================================

/// Compute 10^n at compile time
const fn pow10(n: u8) -> i64 {
    let mut result: i64 = 1;
    let mut i = 0;
    while i < n {
        result *= 10;
        i += 1;
    }
    result
}

impl<const D: u8> FixedDecimal<D> {
    /// The scale factor (10^DECIMALS)
    pub const SCALE: i64 = pow10(D);

    /// Half scale for rounding (SCALE / 2)
    const HALF_SCALE: i64 = pow10(D) / 2;

    /// Zero value
    pub const ZERO: Self = Self(0);

    /// One (1.0)
    pub const ONE: Self = Self(pow10(D));

    /// Smallest positive step (10^-DECIMALS)
    pub const EPSILON: Self = Self(1);

    /// Maximum representable value
    pub const MAX: Self = Self(i64::MAX);

    /// Minimum representable value
    pub const MIN: Self = Self(i64::MIN);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from raw internal representation.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Create from an integer value.
    ///
    /// # Errors
    /// Returns `Overflow` if the value is too large to represent.
    #[inline]
    pub fn from_integer(value: i64) -> NumericResult<Self> {
        value
            .checked_mul(Self::SCALE)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Create from integer and fractional parts.
    ///
    /// `fraction` is expressed in units of 10^-DECIMALS and must be below SCALE.
    ///
    /// ```
    /// use bond_venue::numeric::Price;
    ///
    /// // 10.50
    /// let p = Price::from_parts(10, 500_000_000).unwrap();
    /// assert_eq!(p.to_string(), "10.500000000");
    /// ```
    #[inline]
    pub fn from_parts(integer: i64, fraction: u64) -> NumericResult<Self> {
        if fraction >= Self::SCALE as u64 {
            return Err(NumericError::InvalidInput);
        }

        let int_scaled = integer
            .checked_mul(Self::SCALE)
            .ok_or(NumericError::Overflow)?;

        let frac_signed = if integer < 0 {
            -(fraction as i64)
        } else {
            fraction as i64
        };

        int_scaled
            .checked_add(frac_signed)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw internal value (scaled).
    #[inline]
    pub const fn raw_value(self) -> i64 {
        self.0
    }

    /// Get the integer part (truncated toward zero).
    #[inline]
    pub const fn integer_part(self) -> i64 {
        self.0 / Self::SCALE
    }

    /// Get the fractional part as a positive value.
    #[inline]
    pub const fn fractional_part(self) -> u64 {
        (self.0 % Self::SCALE).unsigned_abs()
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns true if `self` is a whole multiple of `step`.
    ///
    /// A non-positive step never constrains anything.
    #[inline]
    pub const fn is_multiple_of(self, step: Self) -> bool {
        step.0 <= 0 || self.0 % step.0 == 0
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_add(rhs.0).map(Self).ok_or_else(|| {
            if rhs.0 > 0 {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        })
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_sub(rhs.0).map(Self).ok_or_else(|| {
            if rhs.0 < 0 {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        })
    }

    /// Subtraction clamped at zero.
    ///
    /// Used for remaining-quantity arithmetic where a negative result means
    /// "nothing left".
    #[inline]
    pub fn saturating_sub_to_zero(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0).max(0))
    }

    /// Checked multiplication with round half-up.
    ///
    /// Uses an i128 intermediate, then rounds and scales back to i64.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        let scale = Self::SCALE as i128;
        let half_scale = Self::HALF_SCALE as i128;
        let product = (self.0 as i128) * (rhs.0 as i128);

        let rounded = if product >= 0 {
            product + half_scale
        } else {
            product - half_scale
        };

        let result = rounded / scale;

        if result > i64::MAX as i128 {
            Err(NumericError::Overflow)
        } else if result < i64::MIN as i128 {
            Err(NumericError::Underflow)
        } else {
            Ok(Self(result as i64))
        }
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<const D: u8> Default for FixedDecimal<D> {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const D: u8> PartialEq for FixedDecimal<D> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<const D: u8> Eq for FixedDecimal<D> {}

impl<const D: u8> PartialOrd for FixedDecimal<D> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const D: u8> Ord for FixedDecimal<D> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<const D: u8> Hash for FixedDecimal<D> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<const D: u8> Neg for FixedDecimal<D> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl<const D: u8> fmt::Debug for FixedDecimal<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedDecimal<{}>({}, raw={})", D, self, self.0)
    }
}

impl<const D: u8> fmt::Display for FixedDecimal<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int_part = self.integer_part();
        let frac_part = self.fractional_part();

        if D == 0 {
            write!(f, "{}", int_part)
        } else if self.0 < 0 && int_part == 0 {
            // -0.xxx has no sign on the integer part
            write!(f, "-0.{:0>width$}", frac_part, width = D as usize)
        } else {
            write!(f, "{}.{:0>width$}", int_part, frac_part, width = D as usize)
        }
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl<const D: u8> FixedDecimal<D> {
    /// Convert from rust_decimal::Decimal.
    ///
    /// Request payloads carry `Decimal`; this is where they enter the core.
    ///
    /// # Errors
    /// - `PrecisionLoss` if significant digits would be lost
    /// - `Overflow` if the value is too large
    pub fn from_decimal(d: rust_decimal::Decimal) -> NumericResult<Self> {
        use rust_decimal::prelude::ToPrimitive;

        let decimal_scale = d.scale();
        let target_scale = D as u32;

        let multiplier = rust_decimal::Decimal::from(Self::SCALE);
        let scaled = d.checked_mul(multiplier).ok_or(NumericError::Overflow)?;

        let raw = scaled.trunc().to_i64().ok_or(NumericError::Overflow)?;

        if decimal_scale > target_scale {
            let reconstructed = rust_decimal::Decimal::from(raw)
                / rust_decimal::Decimal::from(Self::SCALE);
            if reconstructed != d.normalize() {
                return Err(NumericError::PrecisionLoss);
            }
        }

        Ok(Self(raw))
    }

    /// Convert to rust_decimal::Decimal with trailing zeros removed.
    pub fn to_decimal(self) -> rust_decimal::Decimal {
        rust_decimal::Decimal::new(self.0, D as u32).normalize()
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl<const D: u8> std::str::FromStr for FixedDecimal<D> {
    type Err = NumericError;

    /// Parse from a decimal string.
    ///
    /// # Examples
    /// - "99" -> 99.000000000
    /// - "10.40" -> 10.400000000
    /// - "-0.001" -> -0.001000000
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumericError::InvalidInput);
        }

        let (is_negative, s) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else {
            (false, s)
        };

        let (int_str, frac_str) = if let Some(pos) = s.find('.') {
            (&s[..pos], Some(&s[pos + 1..]))
        } else {
            (s, None)
        };

        if !int_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NumericError::InvalidInput);
        }

        let int_val: i64 = if int_str.is_empty() {
            0
        } else {
            int_str.parse().map_err(|_| NumericError::InvalidInput)?
        };

        let frac_val: u64 = match frac_str {
            None | Some("") => 0,
            Some(frac) if !frac.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(NumericError::InvalidInput);
            },
            Some(frac) if frac.len() > D as usize => return Err(NumericError::PrecisionLoss),
            Some(frac) => {
                let padded = format!("{:0<width$}", frac, width = D as usize);
                padded.parse().map_err(|_| NumericError::InvalidInput)?
            },
        };

        let mut result = Self::from_parts(int_val, frac_val)?;
        if is_negative {
            result = -result;
        }

        Ok(result)
    }
}

// ============================================================================
// Serde (string form, so JSON never rounds through f64)
// ============================================================================

#[cfg(feature = "serde")]
impl<const D: u8> serde::Serialize for FixedDecimal<D> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.to_decimal())
    }
}

#[cfg(feature = "serde")]
impl<'de, const D: u8> serde::Deserialize<'de> for FixedDecimal<D> {
    fn deserialize<De: serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Type Aliases
// ============================================================================

/// Limit or execution price with 9 decimal places
pub type Price = FixedDecimal<9>;

/// Face-value quantity with 9 decimal places
pub type Quantity = FixedDecimal<9>;

// ============================================================================
// Tests
// ============================================================================
