// ============================================================================
// Venue Errors
// ============================================================================

use crate::domain::{OrderBookError, ParseSideError};
use crate::interfaces::StorageError;
use crate::numeric::NumericError;
use thiserror::Error;

/// Errors returned by venue operations.
///
/// Every variant is recoverable by the caller; none leaves the venue unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VenueError {
    #[error("instrument not found: {0}")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// The outcome of the operation is unknown; re-query before retrying
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("order book error: {0}")]
    Book(#[from] OrderBookError),
}

impl VenueError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        VenueError::NotFound(id.to_string())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        VenueError::InvalidArgument(msg.into())
    }
}

impl From<NumericError> for VenueError {
    fn from(err: NumericError) -> Self {
        VenueError::InvalidArgument(err.to_string())
    }
}

impl From<ParseSideError> for VenueError {
    fn from(err: ParseSideError) -> Self {
        VenueError::InvalidArgument(err.to_string())
    }
}

pub type VenueResult<T> = Result<T, VenueError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Side;

    #[test]
    fn test_conversions_map_to_invalid_argument() {
        let side_err = "hold".parse::<Side>().unwrap_err();
        assert_eq!(
            VenueError::from(side_err),
            VenueError::InvalidArgument("side must be buy or sell, got \"hold\"".to_string())
        );
        assert!(matches!(
            VenueError::from(NumericError::PrecisionLoss),
            VenueError::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            VenueError::not_found("X").to_string(),
            "instrument not found: X"
        );
        assert_eq!(
            VenueError::from(StorageError::Unavailable("down".into())).to_string(),
            "storage error: storage unavailable: down"
        );
    }
}
