//! Market Beta
//!
//! Beta measures systematic risk - the sensitivity of a security's returns to
//! market movements: `β = Cov(R_i, R_m) / Var(R_m)`.
//!
//! Beta > 1: More volatile than the market
//! Beta = 1: Moves with the market
//! Beta < 1: Less volatile than the market
//!
//! Both moments are annualized sample estimates over the log return series, so
//! the undefined first row never enters either one.

use crate::error::Result;
use crate::params::AnnualizationFactor;
use crate::stats::{sample_covariance, sample_variance};
use crate::table::ReturnTable;
use serde::{Deserialize, Serialize};

/// Annualized moments behind a beta estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaEstimate {
    /// Annualized sample covariance of security and market returns
    pub covariance: f64,
    /// Annualized sample variance of market returns
    pub market_variance: f64,
    /// `covariance / market_variance`, `NaN` when the market variance is zero
    pub beta: f64,
}

/// Beta from already-computed moments.
///
/// A zero market variance yields `NaN` rather than an infinity.
pub fn beta_from_moments(covariance: f64, market_variance: f64) -> f64 {
    if market_variance == 0.0 {
        return f64::NAN;
    }
    covariance / market_variance
}

/// Estimate beta along with its annualized covariance and market variance.
///
/// # Errors
///
/// Returns [`crate::AnalyticsError::UnknownSymbol`] if either symbol is missing.
pub fn compute_beta_estimate(
    returns: &ReturnTable,
    security: &str,
    market: &str,
    annualization: AnnualizationFactor,
) -> Result<BetaEstimate> {
    let security_returns = returns.returns(security)?;
    let market_returns = returns.returns(market)?;
    let factor = annualization.as_f64();

    let covariance = sample_covariance(security_returns, market_returns) * factor;
    let market_variance = sample_variance(market_returns) * factor;
    let beta = beta_from_moments(covariance, market_variance);

    tracing::debug!(security, market, covariance, market_variance, beta, "estimated beta");
    if beta.is_nan() {
        tracing::warn!(security, market, market_variance, "beta is undefined");
    }

    Ok(BetaEstimate {
        covariance,
        market_variance,
        beta,
    })
}

/// Beta of `security` against `market`.
///
/// # Errors
///
/// Returns [`crate::AnalyticsError::UnknownSymbol`] if either symbol is missing.
pub fn compute_beta(
    returns: &ReturnTable,
    security: &str,
    market: &str,
    annualization: AnnualizationFactor,
) -> Result<f64> {
    compute_beta_estimate(returns, security, market, annualization).map(|estimate| estimate.beta)
}
