//! Analysis error types.

use thiserror::Error;

/// Analysis request errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// Custom analysis requested without parameters.
    #[error("Custom analysis requires configuration parameters")]
    MissingParams,

    /// A period count is below one.
    #[error("{field} must be at least 1")]
    InvalidPeriods {
        /// Offending parameter name.
        field: &'static str,
    },

    /// A category key is blank.
    #[error("Category name cannot be empty")]
    EmptyCategory,

    /// Two records share a category key.
    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),

    /// Base amount is negative.
    #[error("Amount for {0} cannot be negative")]
    NegativeAmount(String),

    /// Base amount above the per-category ceiling.
    #[error("Amount for {0} exceeds the maximum of {max}", max = crate::forecast::MAX_BASE_AMOUNT)]
    AmountOutOfRange(String),

    /// Amounts add up past the forecast total ceiling.
    #[error("Forecast total exceeds the maximum of {max}", max = crate::forecast::MAX_FORECAST_TOTAL)]
    TotalOutOfRange,
}
