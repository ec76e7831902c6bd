//! End-to-end summary for one security.
//!
//! Fetches prices for the security and its market proxy, derives log returns
//! and reduces them to a [`StockSummary`]. Each call fetches afresh; nothing is
//! retried or cached.

use crate::error::{CapmError, Result};
use capm_analytics::{PriceTable, RiskParameters, compute_log_returns, compute_metrics};
use capm_data::{DateRange, PriceProvider};
use capm_output::StockSummary;

/// Summarize `security` against `market` from prices already in hand.
///
/// # Errors
///
/// Returns [`CapmError::Analytics`] if either symbol is missing from `prices`,
/// or [`CapmError::NoPrices`] if the table has no rows.
pub fn summarize(
    prices: &PriceTable,
    security: &str,
    market: &str,
    params: &RiskParameters,
) -> Result<StockSummary> {
    let (period_start, period_end) = prices.period().ok_or_else(|| CapmError::NoPrices {
        security: security.to_string(),
        market: market.to_string(),
    })?;

    let returns = compute_log_returns(prices);
    let metrics = compute_metrics(&returns, security, market, params)?;

    tracing::debug!(
        security,
        market,
        beta = metrics.beta.beta,
        expected_return = metrics.expected_return,
        sharpe = metrics.sharpe,
        "computed pricing metrics"
    );

    Ok(StockSummary::new(
        security.to_string(),
        market.to_string(),
        period_start,
        period_end,
        metrics.beta.beta,
        metrics.expected_return,
        metrics.sharpe,
    ))
}

/// Fetch prices from `provider` and summarize `security` against `market`.
///
/// A security equal to its market proxy is fetched once and yields a beta of 1.
///
/// # Errors
///
/// Propagates provider failures as [`CapmError::Data`] and structural
/// problems with the fetched table as [`CapmError::Analytics`].
pub async fn stock_summary<P: PriceProvider>(
    provider: &P,
    security: &str,
    market: &str,
    range: &DateRange,
    params: &RiskParameters,
) -> Result<StockSummary> {
    let mut symbols = vec![security.to_string()];
    if market != security {
        symbols.push(market.to_string());
    }

    tracing::info!(security, market, range = %range, "summarizing");
    let prices = provider.fetch_prices(&symbols, range).await?;
    tracing::debug!(observations = prices.len(), "prices fetched");

    summarize(&prices, security, market, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use capm_analytics::{AnalyticsError, RiskPremium};
    use capm_data::DataError;
    use chrono::{Days, NaiveDate};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    }

    fn table(security: &[f64], market: &[f64]) -> PriceTable {
        let series = |prices: &[f64]| {
            prices
                .iter()
                .enumerate()
                .map(|(i, p)| (start() + Days::new(i as u64), *p))
                .collect::<Vec<_>>()
        };
        PriceTable::from_series(vec![
            ("AAPL".to_string(), series(security)),
            ("SPY".to_string(), series(market)),
        ])
        .unwrap()
    }

    #[test]
    fn test_summarize_records_period() {
        let prices = table(&[10.0, 11.0, 10.5, 12.0], &[100.0, 102.0, 101.0, 104.0]);
        let summary = summarize(&prices, "AAPL", "SPY", &RiskParameters::default()).unwrap();

        assert_eq!(summary.security, "AAPL");
        assert_eq!(summary.market, "SPY");
        assert_eq!(summary.period_start, start());
        assert_eq!(summary.period_end, start() + Days::new(3));
        assert!(summary.beta.is_finite());
        assert!(summary.sharpe.is_finite());
    }

    #[test]
    fn test_summarize_unknown_symbol() {
        let prices = table(&[10.0, 11.0, 12.0], &[100.0, 101.0, 102.0]);
        let err = summarize(&prices, "MSFT", "SPY", &RiskParameters::default()).unwrap_err();
        assert!(matches!(
            err,
            CapmError::Analytics(AnalyticsError::UnknownSymbol(ref s)) if s == "MSFT"
        ));
    }

    #[tokio::test]
    async fn test_stock_summary_against_itself() {
        let prices = table(&[10.0, 11.0, 10.5, 12.0, 11.8], &[100.0, 102.0, 101.0, 104.0, 99.0]);
        let range = DateRange::new(start(), start() + Days::new(10)).unwrap();
        let params = RiskParameters::default().with_risk_premium(RiskPremium::Fixed(0.05));

        let summary = stock_summary(&prices, "SPY", "SPY", &range, &params).await.unwrap();
        assert_relative_eq!(summary.beta, 1.0, epsilon = 1e-12);
        assert_relative_eq!(summary.expected_return, 0.075, epsilon = 1e-12);
    }

    #[tokio::test]
    async fn test_stock_summary_missing_market() {
        let prices = table(&[10.0, 11.0, 12.0], &[100.0, 101.0, 102.0]);
        let range = DateRange::new(start(), start() + Days::new(10)).unwrap();

        let err = stock_summary(&prices, "AAPL", "QQQ", &range, &RiskParameters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CapmError::Data(DataError::MissingData { .. })));
    }
}
