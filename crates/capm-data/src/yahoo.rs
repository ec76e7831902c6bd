//! Adjusted closing prices from Yahoo Finance.

use crate::error::{DataError, Result};
use crate::provider::{DateRange, PriceProvider};
use capm_analytics::PriceTable;
use chrono::{DateTime, Days, NaiveDate};
use std::time::Duration;
use tokio::time::sleep;
use yahoo_finance_api as yahoo;

/// Yahoo Finance price provider with rate limiting.
pub struct YahooPriceProvider {
    provider: yahoo::YahooConnector,
    rate_limit_delay: Duration,
}

impl std::fmt::Debug for YahooPriceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooPriceProvider")
            .field("rate_limit_delay", &self.rate_limit_delay)
            .finish_non_exhaustive()
    }
}

impl YahooPriceProvider {
    /// Create a provider with default rate limiting (1 req/sec).
    ///
    /// # Errors
    ///
    /// Returns [`DataError::YahooApi`] if the HTTP connector cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(Duration::from_millis(1000))
    }

    /// Create a provider with a custom delay between requests.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::YahooApi`] if the HTTP connector cannot be built.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()?,
            rate_limit_delay,
        })
    }

    /// Fetch `(date, adjusted close)` observations for one symbol.
    ///
    /// # Arguments
    /// * `symbol` - The ticker symbol (e.g., "AAPL")
    /// * `range` - Inclusive range of trading dates
    pub async fn fetch_adjusted_closes(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<Vec<(NaiveDate, f64)>> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let start_time = to_offset_datetime(range.start())?;
        // Yahoo treats the end bound as exclusive.
        let end_time = to_offset_datetime(range.end() + Days::new(1))?;

        tracing::info!(symbol, range = %range, "fetching adjusted closes");
        let response = self
            .provider
            .get_quote_history(symbol, start_time, end_time)
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        if quotes.is_empty() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "No data returned from Yahoo Finance".to_string(),
            });
        }

        let mut points = Vec::with_capacity(quotes.len());
        for quote in &quotes {
            let timestamp = quote.timestamp;
            let date = DateTime::from_timestamp(timestamp, 0)
                .ok_or_else(|| {
                    DataError::TimeConversion(format!("timestamp {timestamp} out of range"))
                })?
                .date_naive();
            if range.contains(date) {
                points.push((date, quote.adjclose));
            }
        }
        tracing::debug!(symbol, observations = points.len(), "received quotes");

        // Apply rate limiting
        sleep(self.rate_limit_delay).await;

        Ok(points)
    }
}

impl PriceProvider for YahooPriceProvider {
    async fn fetch_prices(&self, symbols: &[String], range: &DateRange) -> Result<PriceTable> {
        let mut series = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let points = self.fetch_adjusted_closes(symbol, range).await?;
            series.push((symbol.clone(), points));
        }
        Ok(PriceTable::from_series(series)?)
    }
}

fn to_offset_datetime(date: NaiveDate) -> Result<time::OffsetDateTime> {
    let timestamp = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| DataError::TimeConversion(format!("invalid midnight for {date}")))?
        .and_utc()
        .timestamp();
    time::OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| DataError::TimeConversion(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midnight_conversion() {
        let date = NaiveDate::from_ymd_opt(2010, 1, 4).unwrap();
        let converted = to_offset_datetime(date).unwrap();
        assert_eq!(converted.unix_timestamp(), 1_262_563_200);
    }

    #[tokio::test]
    async fn test_invalid_symbol() {
        let provider = YahooPriceProvider::with_rate_limit(Duration::ZERO).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let range = DateRange::new(start, start + Days::new(30)).unwrap();

        let result = provider.fetch_adjusted_closes("", &range).await;
        assert!(matches!(result, Err(DataError::InvalidSymbol(_))));
    }

    #[tokio::test]
    #[ignore = "requires network access to Yahoo Finance"]
    async fn test_fetch_prices() {
        let provider = YahooPriceProvider::new().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let range = DateRange::new(start, start + Days::new(30)).unwrap();
        let symbols = vec!["AAPL".to_string(), "SPY".to_string()];

        let table = provider.fetch_prices(&symbols, &range).await.unwrap();
        assert!(table.len() > 10);
        assert!(table.contains("AAPL"));
        assert!(table.contains("SPY"));
    }
}
