//! CSV and JSON export of summary records.

use crate::summary::{StockSummary, SummaryTable};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "prettyjson" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn write_csv<'a, I>(records: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a StockSummary>,
{
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
}

impl Exporter for StockSummary {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv([self]),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for SummaryTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv(&self.rows),
            ExportFormat::Json => Ok(serde_json::to_string(&self.rows)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(&self.rows)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn summary(security: &str, beta: f64) -> StockSummary {
        StockSummary::new(
            security.to_string(),
            "SPY".to_string(),
            NaiveDate::from_ymd_opt(2010, 1, 4).unwrap(),
            NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
            beta,
            0.0926,
            0.216,
        )
    }

    #[test]
    fn test_summary_export_csv() {
        let csv = summary("AAPL", 1.00315)
            .export_to_string(ExportFormat::Csv)
            .unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("security,market,period_start,period_end,Beta,Return,Sharpe")
        );
        assert_eq!(
            lines.next(),
            Some("AAPL,SPY,2010-01-04,2020-12-31,1.00315,0.0926,0.216")
        );
    }

    #[test]
    fn test_summary_export_json_keys() {
        let json = summary("AAPL", 1.00315)
            .export_to_string(ExportFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["security"], "AAPL");
        assert_eq!(value["Beta"], 1.00315);
        assert_eq!(value["Return"], 0.0926);
        assert_eq!(value["Sharpe"], 0.216);
    }

    #[test]
    fn test_nan_exports() {
        let s = summary("FLAT", f64::NAN);

        let json = s.export_to_string(ExportFormat::Json).unwrap();
        assert!(json.contains("\"Beta\":null"));

        let csv = s.export_to_string(ExportFormat::Csv).unwrap();
        assert!(csv.contains("FLAT,SPY,2010-01-04,2020-12-31,NaN,"));
    }

    #[test]
    fn test_nan_json_reads_back() {
        let mut s = summary("FLAT", f64::NAN);
        s.expected_return = f64::NAN;
        s.sharpe = f64::NAN;

        let json = s.export_to_string(ExportFormat::Json).unwrap();
        let back: StockSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.security, "FLAT");
        assert_eq!(back.undefined_metrics(), crate::Metric::ALL.to_vec());

        let table = SummaryTable::new(vec![s, summary("AAPL", 1.1)]);
        let json = table.export_to_string(ExportFormat::PrettyJson).unwrap();
        let rows: Vec<StockSummary> = serde_json::from_str(&json).unwrap();
        assert!(rows[0].beta.is_nan());
        assert_eq!(rows[1].beta, 1.1);
        assert_eq!(rows[1].sharpe, 0.216);
    }

    #[test]
    fn test_table_export() {
        let table = SummaryTable::new(vec![summary("AAPL", 1.1), summary("KO", 0.6)]);

        let csv = table.export_to_string(ExportFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 3);

        let json = table.export_to_string(ExportFormat::PrettyJson).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }

    #[rstest]
    #[case("CSV", ExportFormat::Csv)]
    #[case("json", ExportFormat::Json)]
    #[case("pretty-json", ExportFormat::PrettyJson)]
    #[case("pretty_json", ExportFormat::PrettyJson)]
    fn test_format_parsing(#[case] input: &str, #[case] expected: ExportFormat) {
        assert_eq!(input.parse::<ExportFormat>().unwrap(), expected);
    }

    #[test]
    fn test_format_helpers() {
        assert!("xml".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
        assert_eq!(
            ExportFormat::from_path(Path::new("out/summary.CSV")),
            Some(ExportFormat::Csv)
        );
        assert_eq!(ExportFormat::from_path(Path::new("summary.txt")), None);
    }
}
