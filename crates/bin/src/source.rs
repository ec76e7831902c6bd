//! Price source selected on the command line.

use capm_analytics::PriceTable;
use capm_data::{CsvPriceProvider, DateRange, PriceProvider, Result, YahooPriceProvider};
use std::path::PathBuf;

/// Yahoo Finance unless a CSV file was given.
#[derive(Debug)]
pub(crate) enum PriceSource {
    Csv(CsvPriceProvider),
    Yahoo(YahooPriceProvider),
}

impl PriceSource {
    pub(crate) fn new(csv: Option<PathBuf>) -> Result<Self> {
        csv.map_or_else(
            || YahooPriceProvider::new().map(Self::Yahoo),
            |path| Ok(Self::Csv(CsvPriceProvider::new(path))),
        )
    }
}

impl PriceProvider for PriceSource {
    async fn fetch_prices(&self, symbols: &[String], range: &DateRange) -> Result<PriceTable> {
        match self {
            Self::Csv(provider) => provider.fetch_prices(symbols, range).await,
            Self::Yahoo(provider) => provider.fetch_prices(symbols, range).await,
        }
    }
}
