//! Error types for analytics operations.
//!
//! Numerical degeneracy (zero variance, zero volatility) is never an error here:
//! those cases surface as `NaN` results. These variants cover structural misuse only.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors that can occur when building tables or looking up series.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Symbol not present in the table
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// No dates in common across the input series
    #[error("Price table is empty: {0}")]
    EmptyTable(String),

    /// Date index is not strictly increasing
    #[error("Dates must be strictly increasing: {current} follows {previous} at index {index}")]
    UnsortedDates {
        /// Position of the offending date
        index: usize,
        /// Date preceding the offending one
        previous: NaiveDate,
        /// The offending date
        current: NaiveDate,
    },

    /// Column length differs from the date index
    #[error("Column {symbol} has {actual} values but the index has {expected} dates")]
    LengthMismatch {
        /// Symbol of the ragged column
        symbol: String,
        /// Length of the date index
        expected: usize,
        /// Length of the column
        actual: usize,
    },

    /// Invalid configuration value
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidConfig {
        /// Configuration key
        key: String,
        /// Raw value that failed to parse
        value: String,
        /// Why it was rejected
        reason: String,
    },
}
