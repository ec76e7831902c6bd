//! Sharpe ratio of the CAPM expected return.

use crate::capm::compute_capm;
use crate::error::Result;
use crate::params::{AnnualizationFactor, RiskParameters};
use crate::stats::sample_std;
use crate::table::ReturnTable;

/// Excess return per unit of volatility. A zero volatility yields `NaN`.
pub fn sharpe_ratio(expected_return: f64, risk_free_rate: f64, volatility: f64) -> f64 {
    if volatility == 0.0 {
        return f64::NAN;
    }
    (expected_return - risk_free_rate) / volatility
}

/// Sample standard deviation of a return column scaled by `sqrt(annualization)`.
///
/// # Errors
///
/// Returns [`crate::AnalyticsError::UnknownSymbol`] if `symbol` is missing.
pub fn annualized_volatility(
    returns: &ReturnTable,
    symbol: &str,
    annualization: AnnualizationFactor,
) -> Result<f64> {
    let column = returns.returns(symbol)?;
    Ok(sample_std(column) * annualization.as_f64().sqrt())
}

/// Sharpe ratio of `security` using its CAPM expected return.
///
/// # Errors
///
/// Returns [`crate::AnalyticsError::UnknownSymbol`] if either symbol is missing.
pub fn compute_sharpe(
    returns: &ReturnTable,
    security: &str,
    market: &str,
    params: &RiskParameters,
) -> Result<f64> {
    let expected_return = compute_capm(returns, security, market, params)?;
    let volatility = annualized_volatility(returns, security, params.annualization)?;
    let sharpe = sharpe_ratio(expected_return, params.risk_free_rate, volatility);
    if sharpe.is_nan() {
        tracing::warn!(security, market, volatility, "sharpe ratio is undefined");
    }
    Ok(sharpe)
}
