//! Error type for the end-to-end summary pipeline.

use capm_analytics::AnalyticsError;
use capm_data::DataError;
use capm_output::ExportError;
use thiserror::Error;

/// Result type for the summary pipeline.
pub type Result<T> = std::result::Result<T, CapmError>;

/// Any failure while fetching prices, computing metrics or exporting results.
#[derive(Debug, Error)]
pub enum CapmError {
    /// Prices could not be fetched or loaded
    #[error(transparent)]
    Data(#[from] DataError),

    /// Metrics could not be computed from the fetched prices
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// Results could not be written
    #[error(transparent)]
    Export(#[from] ExportError),

    /// The provider returned a table with no usable period
    #[error("No prices for {security} against {market}")]
    NoPrices {
        /// Security symbol
        security: String,
        /// Market proxy symbol
        market: String,
    },
}
