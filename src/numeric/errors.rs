// ============================================================================
// Numeric Errors
// Error types for fixed-point arithmetic and parsing
// ============================================================================

use thiserror::Error;

/// Errors that can occur during fixed-point arithmetic or parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum NumericError {
    /// Result exceeded i64::MAX
    #[error("arithmetic overflow: result exceeded maximum value")]
    Overflow,
    /// Result below i64::MIN
    #[error("arithmetic underflow: result below minimum value")]
    Underflow,
    /// Conversion would lose significant digits
    #[error("precision loss: at most 9 decimal places are supported")]
    PrecisionLoss,
    /// Input string or value is invalid
    #[error("invalid input: could not parse value")]
    InvalidInput,
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::PrecisionLoss.to_string(),
            "precision loss: at most 9 decimal places are supported"
        );
        assert_eq!(
            NumericError::InvalidInput.to_string(),
            "invalid input: could not parse value"
        );
    }
}
