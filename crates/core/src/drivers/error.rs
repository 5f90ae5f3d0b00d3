//! Driver table error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Driver table construction errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    /// A driver has an empty category key.
    #[error("Driver key cannot be empty")]
    EmptyKey,

    /// Two drivers share the same category key.
    #[error("Duplicate driver key: {0}")]
    DuplicateKey(String),

    /// Factor must be strictly positive.
    #[error("Driver factor for {item} must be positive, got {factor}")]
    NonPositiveFactor {
        /// Category key.
        item: String,
        /// Rejected factor.
        factor: Decimal,
    },

    /// Factor above the accepted ceiling.
    #[error("Driver factor for {item} must not exceed 100, got {factor}")]
    FactorTooLarge {
        /// Category key.
        item: String,
        /// Rejected factor.
        factor: Decimal,
    },
}
