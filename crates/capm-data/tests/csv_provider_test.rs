//! Integration tests for the CSV-backed price provider.

use capm_data::{CsvPriceProvider, DataError, DateRange, PriceProvider};
use chrono::NaiveDate;
use std::path::PathBuf;

const PRICES: &str = "\
date,ACME,SPY,QQQ
2010-01-04,30.57,113.33,46.42
2010-01-05,30.63,113.63,46.42
2010-01-06,30.14,113.71,46.14
2010-01-07,30.08,114.19,46.17
2010-01-08,30.28,114.57,46.55
";

fn write_fixture(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("capm-data-{}-{name}.csv", std::process::id()));
    std::fs::write(&path, PRICES).unwrap();
    path
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, day).unwrap()
}

#[tokio::test]
async fn test_fetch_selects_symbols_and_range() {
    let path = write_fixture("select");
    let provider = CsvPriceProvider::new(&path);
    let range = DateRange::new(date(5), date(7)).unwrap();
    let symbols = vec!["ACME".to_string(), "SPY".to_string()];

    let table = provider.fetch_prices(&symbols, &range).await.unwrap();
    assert_eq!(table.dates(), &[date(5), date(6), date(7)]);
    assert_eq!(table.symbols().collect::<Vec<_>>(), vec!["ACME", "SPY"]);
    assert_eq!(table.prices("SPY").unwrap().to_vec(), vec![113.63, 113.71, 114.19]);

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_fetch_unknown_symbol() {
    let path = write_fixture("unknown");
    let provider = CsvPriceProvider::new(&path);
    let range = DateRange::new(date(4), date(8)).unwrap();

    let result = provider.fetch_prices(&["MSFT".to_string()], &range).await;
    assert!(matches!(result, Err(DataError::MissingData { ref symbol, .. }) if symbol == "MSFT"));

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_fetch_missing_file() {
    let provider = CsvPriceProvider::new("/nonexistent/capm/prices.csv");
    let range = DateRange::new(date(4), date(8)).unwrap();

    let result = provider.fetch_prices(&["SPY".to_string()], &range).await;
    assert!(matches!(result, Err(DataError::Io(_))));
}
