//! Aligned price and return tables.
//!
//! Both tables share a strictly increasing date index and hold one column per
//! symbol, every column exactly as long as the index. Missing observations are
//! stored as `NaN`.

use crate::error::{AnalyticsError, Result};
use chrono::NaiveDate;
use ndarray::{Array1, ArrayView1};
use std::collections::{BTreeMap, BTreeSet};

/// Adjusted closing prices for several symbols on a common date index.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    columns: BTreeMap<String, Array1<f64>>,
}

impl PriceTable {
    /// Build a table from a date index and one price column per symbol.
    ///
    /// # Errors
    ///
    /// Fails if the dates are not strictly increasing or a column length differs
    /// from the number of dates.
    pub fn new(dates: Vec<NaiveDate>, columns: BTreeMap<String, Vec<f64>>) -> Result<Self> {
        validate_dates(&dates)?;

        let mut aligned = BTreeMap::new();
        for (symbol, prices) in columns {
            if prices.len() != dates.len() {
                return Err(AnalyticsError::LengthMismatch {
                    symbol,
                    expected: dates.len(),
                    actual: prices.len(),
                });
            }
            aligned.insert(symbol, Array1::from(prices));
        }

        Ok(Self {
            dates,
            columns: aligned,
        })
    }

    /// Align per-symbol `(date, price)` observations on the dates they all share.
    ///
    /// Observations may arrive in any order; a repeated date keeps the last price.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::EmptyTable`] when no series is given or the
    /// series have no date in common.
    pub fn from_series<I>(series: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<(NaiveDate, f64)>)>,
    {
        let by_symbol: BTreeMap<String, BTreeMap<NaiveDate, f64>> = series
            .into_iter()
            .map(|(symbol, points)| (symbol, points.into_iter().collect()))
            .collect();

        let mut common: Option<BTreeSet<NaiveDate>> = None;
        for points in by_symbol.values() {
            let dates: BTreeSet<NaiveDate> = points.keys().copied().collect();
            common = Some(match common {
                Some(acc) => acc.intersection(&dates).copied().collect(),
                None => dates,
            });
        }

        let dates: Vec<NaiveDate> = common.unwrap_or_default().into_iter().collect();
        if dates.is_empty() {
            let symbols: Vec<&str> = by_symbol.keys().map(String::as_str).collect();
            return Err(AnalyticsError::EmptyTable(format!(
                "no common dates for [{}]",
                symbols.join(", ")
            )));
        }

        let columns = by_symbol
            .into_iter()
            .map(|(symbol, points)| {
                let prices = dates
                    .iter()
                    .map(|date| points.get(date).copied().unwrap_or(f64::NAN))
                    .collect::<Array1<f64>>();
                (symbol, prices)
            })
            .collect();

        Ok(Self { dates, columns })
    }

    /// Date index.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Symbols in the table, sorted.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the table has no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Whether the table has a column for `symbol`.
    pub fn contains(&self, symbol: &str) -> bool {
        self.columns.contains_key(symbol)
    }

    /// Price column for a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownSymbol`] if the symbol is not in the table.
    pub fn prices(&self, symbol: &str) -> Result<ArrayView1<'_, f64>> {
        self.columns
            .get(symbol)
            .map(|prices| prices.view())
            .ok_or_else(|| AnalyticsError::UnknownSymbol(symbol.to_string()))
    }

    /// First and last date of the index.
    pub fn period(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }

    /// Keep only the given symbols.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownSymbol`] for the first symbol not in the table.
    pub fn select(&self, symbols: &[String]) -> Result<Self> {
        let mut columns = BTreeMap::new();
        for symbol in symbols {
            let prices = self.prices(symbol)?;
            columns.insert(symbol.clone(), prices.to_owned());
        }
        Ok(Self {
            dates: self.dates.clone(),
            columns,
        })
    }

    /// Keep only the rows dated within `[start, end]`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Self {
        let keep: Vec<usize> = self
            .dates
            .iter()
            .enumerate()
            .filter(|(_, date)| **date >= start && **date <= end)
            .map(|(i, _)| i)
            .collect();

        let dates = keep.iter().map(|&i| self.dates[i]).collect();
        let columns = self
            .columns
            .iter()
            .map(|(symbol, prices)| {
                let rows = keep.iter().map(|&i| prices[i]).collect::<Array1<f64>>();
                (symbol.clone(), rows)
            })
            .collect();

        Self { dates, columns }
    }

    pub(crate) fn columns(&self) -> impl Iterator<Item = (&String, ArrayView1<'_, f64>)> {
        self.columns.iter().map(|(symbol, prices)| (symbol, prices.view()))
    }
}

/// Log returns derived from a [`PriceTable`].
///
/// Same index and symbols as the source table. Row 0 of every column is `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnTable {
    dates: Vec<NaiveDate>,
    columns: BTreeMap<String, Array1<f64>>,
}

impl ReturnTable {
    pub(crate) const fn from_parts(
        dates: Vec<NaiveDate>,
        columns: BTreeMap<String, Array1<f64>>,
    ) -> Self {
        Self { dates, columns }
    }

    /// Date index.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Symbols in the table, sorted.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of dates, including the undefined first row.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the table has no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Return column for a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownSymbol`] if the symbol is not in the table.
    pub fn returns(&self, symbol: &str) -> Result<ArrayView1<'_, f64>> {
        self.columns
            .get(symbol)
            .map(|column| column.view())
            .ok_or_else(|| AnalyticsError::UnknownSymbol(symbol.to_string()))
    }
}

fn validate_dates(dates: &[NaiveDate]) -> Result<()> {
    for (index, pair) in dates.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(AnalyticsError::UnsortedDates {
                index: index + 1,
                previous: pair[0],
                current: pair[1],
            });
        }
    }
    Ok(())
}
