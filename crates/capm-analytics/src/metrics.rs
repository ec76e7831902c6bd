//! All single-factor metrics for one security in a single pass.

use crate::beta::{BetaEstimate, compute_beta_estimate};
use crate::capm::{capm_expected_return, market_risk_premium};
use crate::error::Result;
use crate::params::RiskParameters;
use crate::sharpe::{annualized_volatility, sharpe_ratio};
use crate::table::ReturnTable;
use serde::{Deserialize, Serialize};

/// Beta, CAPM expected return and Sharpe ratio with their intermediate values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingMetrics {
    /// Beta and the annualized moments it was derived from
    pub beta: BetaEstimate,
    /// Market risk premium used in the CAPM
    pub risk_premium: f64,
    /// CAPM expected return, annualized
    pub expected_return: f64,
    /// Annualized volatility of the security
    pub volatility: f64,
    /// Sharpe ratio of the CAPM expected return
    pub sharpe: f64,
}

/// Compute every metric for `security` against `market`.
///
/// Agrees with [`crate::compute_beta`], [`crate::compute_capm`] and
/// [`crate::compute_sharpe`] while reading each column once.
///
/// # Errors
///
/// Returns [`crate::AnalyticsError::UnknownSymbol`] if either symbol is missing.
pub fn compute_metrics(
    returns: &ReturnTable,
    security: &str,
    market: &str,
    params: &RiskParameters,
) -> Result<PricingMetrics> {
    let beta = compute_beta_estimate(returns, security, market, params.annualization)?;
    let risk_premium = market_risk_premium(returns, market, params)?;
    let expected_return = capm_expected_return(params.risk_free_rate, beta.beta, risk_premium);
    let volatility = annualized_volatility(returns, security, params.annualization)?;
    let sharpe = sharpe_ratio(expected_return, params.risk_free_rate, volatility);

    Ok(PricingMetrics {
        beta,
        risk_premium,
        expected_return,
        volatility,
        sharpe,
    })
}
