//! Prices from a wide CSV file.
//!
//! Layout: a header row `date,SYM1,SYM2,...` followed by one row per trading day.
//! Dates are `YYYY-MM-DD`; an empty cell is a missing price. Rows may appear in
//! any order.

use crate::error::{DataError, Result};
use crate::provider::{DateRange, PriceProvider, slice_table};
use capm_analytics::PriceTable;
use chrono::NaiveDate;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Parse a wide price CSV into an aligned table.
///
/// # Errors
///
/// Fails on malformed CSV, an unparseable date or price, a header with no
/// symbol columns, or a repeated date.
pub fn read_price_csv<R: Read>(reader: R) -> Result<PriceTable> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let symbols: Vec<String> = rdr.headers()?.iter().skip(1).map(str::to_string).collect();
    if symbols.is_empty() {
        return Err(DataError::Parse(
            "price CSV needs a date column and at least one symbol column".to_string(),
        ));
    }

    let mut rows: Vec<(NaiveDate, Vec<f64>)> = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let raw_date = record.get(0).unwrap_or_default();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|e| {
            DataError::Parse(format!("row {}: invalid date {raw_date:?}: {e}", line + 1))
        })?;

        let prices = symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| parse_price(record.get(i + 1).unwrap_or_default(), symbol, line))
            .collect::<Result<Vec<f64>>>()?;
        rows.push((date, prices));
    }

    rows.sort_by_key(|(date, _)| *date);
    let dates: Vec<NaiveDate> = rows.iter().map(|(date, _)| *date).collect();
    let columns = symbols
        .into_iter()
        .enumerate()
        .map(|(i, symbol)| (symbol, rows.iter().map(|(_, prices)| prices[i]).collect()))
        .collect();

    Ok(PriceTable::new(dates, columns)?)
}

fn parse_price(raw: &str, symbol: &str, line: usize) -> Result<f64> {
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>().map_err(|e| {
        DataError::Parse(format!("row {}: invalid price {raw:?} for {symbol}: {e}", line + 1))
    })
}

/// Provider backed by a wide CSV file on disk.
///
/// The file is read on every fetch; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    path: PathBuf,
}

impl CsvPriceProvider {
    /// Create a provider for the CSV file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PriceProvider for CsvPriceProvider {
    async fn fetch_prices(&self, symbols: &[String], range: &DateRange) -> Result<PriceTable> {
        tracing::info!(path = %self.path.display(), range = %range, "loading price CSV");
        let file = std::fs::File::open(&self.path)?;
        let table = read_price_csv(file)?;
        slice_table(&table, symbols, range, &self.path.display().to_string())
    }
}
