#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod csv_file;
pub mod error;
pub mod provider;
pub mod yahoo;

pub use csv_file::{CsvPriceProvider, read_price_csv};
pub use error::{DataError, Result};
pub use provider::{DateRange, PriceProvider};
pub use yahoo::YahooPriceProvider;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
