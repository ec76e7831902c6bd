//! Per-security summary records.
//!
//! A [`StockSummary`] is the record produced for one security: its row label is
//! the security symbol and its columns are the metrics `Beta`, `Return` and
//! `Sharpe`. A [`SummaryTable`] stacks several records for batch runs.

use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Metric names used as record keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Metric {
    /// Systematic risk relative to the market
    Beta,
    /// Annualized CAPM expected return
    Return,
    /// Sharpe ratio of the expected return
    Sharpe,
}

impl Metric {
    /// All metrics in display order.
    pub const ALL: [Self; 3] = [Self::Beta, Self::Return, Self::Sharpe];
}

/// Beta, CAPM expected return and Sharpe ratio for one security.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockSummary {
    /// Security symbol (row label).
    pub security: String,

    /// Market proxy symbol.
    pub market: String,

    /// First date of the price window.
    pub period_start: NaiveDate,

    /// Last date of the price window.
    pub period_end: NaiveDate,

    /// Beta against the market proxy.
    #[serde(rename = "Beta", deserialize_with = "nan_from_null")]
    pub beta: f64,

    /// Annualized CAPM expected return.
    #[serde(rename = "Return", deserialize_with = "nan_from_null")]
    pub expected_return: f64,

    /// Sharpe ratio.
    #[serde(rename = "Sharpe", deserialize_with = "nan_from_null")]
    pub sharpe: f64,
}

/// JSON writes undefined metrics as `null`; read them back as `NaN`.
fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl StockSummary {
    /// Create a new summary record.
    ///
    /// # Examples
    ///
    /// ```
    /// use capm_output::{Metric, StockSummary};
    /// use chrono::NaiveDate;
    ///
    /// let summary = StockSummary::new(
    ///     "AAPL".to_string(),
    ///     "SPY".to_string(),
    ///     NaiveDate::from_ymd_opt(2010, 1, 4).unwrap(),
    ///     NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
    ///     1.00315,
    ///     0.0926,
    ///     0.216,
    /// );
    ///
    /// assert_eq!(summary.metric(Metric::Beta), 1.00315);
    /// ```
    pub const fn new(
        security: String,
        market: String,
        period_start: NaiveDate,
        period_end: NaiveDate,
        beta: f64,
        expected_return: f64,
        sharpe: f64,
    ) -> Self {
        Self {
            security,
            market,
            period_start,
            period_end,
            beta,
            expected_return,
            sharpe,
        }
    }

    /// Value of a metric by name.
    pub const fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Beta => self.beta,
            Metric::Return => self.expected_return,
            Metric::Sharpe => self.sharpe,
        }
    }

    /// Metrics whose value is undefined (`NaN`).
    pub fn undefined_metrics(&self) -> Vec<Metric> {
        Metric::ALL
            .into_iter()
            .filter(|m| self.metric(*m).is_nan())
            .collect()
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\nCAPM Summary: {} vs {}\n",
            self.security, self.market
        ));
        output.push_str(&format!(
            "Period: {} to {}\n",
            self.period_start, self.period_end
        ));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("  Beta:               {:>10.4}\n", self.beta));
        output.push_str(&format!(
            "  Expected Return:    {:>9.2}%\n",
            self.expected_return * 100.0
        ));
        output.push_str(&format!("  Sharpe Ratio:       {:>10.4}\n", self.sharpe));
        output.push_str(&"=".repeat(40));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        SummaryTable::new(vec![self.clone()]).to_markdown()
    }
}

impl fmt::Display for StockSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} vs {} ({} to {})",
            self.security, self.market, self.period_start, self.period_end
        )?;
        writeln!(f, "  Beta: {:.4}", self.beta)?;
        writeln!(f, "  Return: {:.2}%", self.expected_return * 100.0)?;
        writeln!(f, "  Sharpe: {:.4}", self.sharpe)?;
        Ok(())
    }
}

/// Summary records for several securities.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SummaryTable {
    /// One record per security, in insertion order.
    pub rows: Vec<StockSummary>,
}

impl SummaryTable {
    /// Create a table from records.
    pub const fn new(rows: Vec<StockSummary>) -> Self {
        Self { rows }
    }

    /// Append a record.
    pub fn push(&mut self, summary: StockSummary) {
        self.rows.push(summary);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Record for a security, if present.
    pub fn get(&self, security: &str) -> Option<&StockSummary> {
        self.rows.iter().find(|row| row.security == security)
    }

    /// Sort rows by a metric, highest first. `NaN` rows go last.
    pub fn sort_by_metric(&mut self, metric: Metric) {
        self.rows.sort_by(|a, b| {
            let (x, y) = (a.metric(metric), b.metric(metric));
            match (x.is_nan(), y.is_nan()) {
                (true, true) => std::cmp::Ordering::Equal,
                (true, false) => std::cmp::Ordering::Greater,
                (false, true) => std::cmp::Ordering::Less,
                (false, false) => y.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal),
            }
        });
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<12} {:<8} {:>10} {:>10} {:>10}\n",
            "Security", "Market", "Beta", "Return", "Sharpe"
        ));
        output.push_str(&"-".repeat(54));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<12} {:<8} {:>10.4} {:>9.2}% {:>10.4}\n",
                row.security,
                row.market,
                row.beta,
                row.expected_return * 100.0,
                row.sharpe
            ));
        }

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str("| Security | Beta | Return | Sharpe |\n");
        output.push_str("|----------|------|--------|--------|\n");
        for row in &self.rows {
            output.push_str(&format!(
                "| {} | {:.4} | {:.2}% | {:.4} |\n",
                row.security,
                row.beta,
                row.expected_return * 100.0,
                row.sharpe
            ));
        }

        output
    }
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table())
    }
}

impl FromIterator<StockSummary> for SummaryTable {
    fn from_iter<I: IntoIterator<Item = StockSummary>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
