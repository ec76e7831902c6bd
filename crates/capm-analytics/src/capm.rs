//! CAPM expected return: `E[R] = rf + β · premium`.

use crate::beta::compute_beta;
use crate::error::Result;
use crate::params::{RiskParameters, RiskPremium};
use crate::stats::sample_mean;
use crate::table::ReturnTable;

/// Expected return from a risk-free rate, a beta and a risk premium.
pub const fn capm_expected_return(risk_free_rate: f64, beta: f64, risk_premium: f64) -> f64 {
    risk_free_rate + beta * risk_premium
}

/// Market risk premium under the configured mode.
///
/// Market-derived: annualized mean market log return minus the risk-free rate.
/// Fixed: the configured value, used as-is.
///
/// # Errors
///
/// Returns [`crate::AnalyticsError::UnknownSymbol`] if a market-derived premium
/// is requested and `market` is missing.
pub fn market_risk_premium(
    returns: &ReturnTable,
    market: &str,
    params: &RiskParameters,
) -> Result<f64> {
    match params.risk_premium {
        RiskPremium::Fixed(premium) => Ok(premium),
        RiskPremium::MarketDerived => {
            let market_returns = returns.returns(market)?;
            Ok(params.annualization.as_f64() * sample_mean(market_returns) - params.risk_free_rate)
        }
    }
}

/// CAPM expected return of `security`, annualized.
///
/// An undefined beta propagates as `NaN`.
///
/// # Errors
///
/// Returns [`crate::AnalyticsError::UnknownSymbol`] if either symbol is missing.
pub fn compute_capm(
    returns: &ReturnTable,
    security: &str,
    market: &str,
    params: &RiskParameters,
) -> Result<f64> {
    let risk_premium = market_risk_premium(returns, market, params)?;
    let beta = compute_beta(returns, security, market, params.annualization)?;
    Ok(capm_expected_return(params.risk_free_rate, beta, risk_premium))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_expected_return() {
        // Beta 1.00315 with rf = 2.5% and a 6.76% market premium.
        assert_relative_eq!(
            capm_expected_return(0.025, 1.00315, 0.0676),
            0.0926,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_nan_beta_propagates() {
        assert!(capm_expected_return(0.025, f64::NAN, 0.06).is_nan());
    }

    #[test]
    fn test_zero_beta_earns_risk_free() {
        assert_eq!(capm_expected_return(0.03, 0.0, 0.07), 0.03);
    }
}
