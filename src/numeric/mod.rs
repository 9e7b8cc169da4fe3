// ============================================================================
// Numeric Module
// Fixed-point arithmetic for prices and face-value quantities
// ============================================================================
//
// - FixedDecimal<D>: fixed-point decimal with compile-time precision
// - NumericError: error types for arithmetic and parsing
// - Price/Quantity aliases at 9 decimals, where one raw unit is the 1e-9
//   fill tolerance
//
// No floating-point operations; all fallible arithmetic returns Result.

mod errors;
mod fixed_decimal;

pub use errors::{NumericError, NumericResult};
pub use fixed_decimal::{FixedDecimal, Price, Quantity};
