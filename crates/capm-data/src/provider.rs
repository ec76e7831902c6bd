//! The price provider seam and the date range it is queried with.

use crate::error::{DataError, Result};
use capm_analytics::PriceTable;
use chrono::{NaiveDate, Utc};
use std::fmt;
use std::future::Future;

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range from `start` to `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidDateRange`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Range from `start` up to today (UTC).
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidDateRange`] if `start` is in the future.
    pub fn since(start: NaiveDate) -> Result<Self> {
        Self::new(start, Utc::now().date_naive())
    }

    /// Range from `start` to `end`, or to today when `end` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidDateRange`] if the range is inverted.
    pub fn with_optional_end(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self> {
        end.map_or_else(|| Self::since(start), |end| Self::new(start, end))
    }

    /// First date in the range.
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date in the range.
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Source of aligned adjusted closing prices.
///
/// Implementations return one column per requested symbol on a shared,
/// strictly increasing date index restricted to `range`.
pub trait PriceProvider {
    /// Fetch prices for `symbols` over `range`.
    fn fetch_prices(
        &self,
        symbols: &[String],
        range: &DateRange,
    ) -> impl Future<Output = Result<PriceTable>>;
}

/// A table already in memory serves its own columns.
impl PriceProvider for PriceTable {
    async fn fetch_prices(&self, symbols: &[String], range: &DateRange) -> Result<PriceTable> {
        slice_table(self, symbols, range, "price table")
    }
}

/// Select `symbols` and restrict to `range`, reporting absent symbols and empty windows.
pub(crate) fn slice_table(
    table: &PriceTable,
    symbols: &[String],
    range: &DateRange,
    source: &str,
) -> Result<PriceTable> {
    for symbol in symbols {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }
        if !table.contains(symbol) {
            return Err(DataError::MissingData {
                symbol: symbol.clone(),
                reason: format!("no column in {source}"),
            });
        }
    }

    let sliced = table.select(symbols)?.between(range.start(), range.end());
    if sliced.is_empty() {
        return Err(DataError::MissingData {
            symbol: symbols.join(","),
            reason: format!("no prices between {range}"),
        });
    }
    Ok(sliced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_invalid_date_range() {
        let result = DateRange::new(date(10), date(1));
        assert!(matches!(result, Err(DataError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date(5), date(5)).unwrap();
        assert!(range.contains(date(5)));
        assert!(!range.contains(date(6)));
        assert_eq!(range.to_string(), "2024-03-05 to 2024-03-05");
    }

    #[test]
    fn test_open_ended_range_ends_today() {
        let range = DateRange::with_optional_end(date(1), None).unwrap();
        assert_eq!(range.end(), Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_table_as_provider() {
        let table = PriceTable::from_series(vec![
            (
                "AAPL".to_string(),
                vec![(date(1), 10.0), (date(4), 11.0), (date(5), 12.0)],
            ),
            (
                "SPY".to_string(),
                vec![(date(1), 500.0), (date(4), 505.0), (date(5), 503.0)],
            ),
        ])
        .unwrap();

        let range = DateRange::new(date(2), date(5)).unwrap();
        let symbols = vec!["SPY".to_string()];
        let fetched = table.fetch_prices(&symbols, &range).await.unwrap();
        assert_eq!(fetched.dates(), &[date(4), date(5)]);
        assert_eq!(fetched.symbols().collect::<Vec<_>>(), vec!["SPY"]);

        let missing = table
            .fetch_prices(&["QQQ".to_string()], &range)
            .await
            .unwrap_err();
        assert!(matches!(missing, DataError::MissingData { ref symbol, .. } if symbol == "QQQ"));

        let empty_window = DateRange::new(date(20), date(25)).unwrap();
        let result = table.fetch_prices(&symbols, &empty_window).await;
        assert!(matches!(result, Err(DataError::MissingData { .. })));
    }
}
