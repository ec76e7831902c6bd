//! Risk parameters passed explicitly to every computation.
//!
//! Defaults: 2.5% annualized risk-free rate, market-derived risk premium,
//! 252 trading days per year.

use crate::error::{AnalyticsError, Result};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Environment variable for the annualized risk-free rate.
pub const ENV_RISK_FREE_RATE: &str = "CAPM_RISK_FREE_RATE";
/// Environment variable for the risk premium (`market` or an annualized number).
pub const ENV_RISK_PREMIUM: &str = "CAPM_RISK_PREMIUM";
/// Environment variable for the annualization factor (`252` or `250`).
pub const ENV_TRADING_DAYS: &str = "CAPM_TRADING_DAYS";

/// Trading days used to annualize daily moments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum AnnualizationFactor {
    /// 252 trading days per year
    #[default]
    #[display("252")]
    #[serde(rename = "252")]
    TradingDays252,
    /// 250 trading days per year
    #[display("250")]
    #[serde(rename = "250")]
    TradingDays250,
}

impl AnnualizationFactor {
    /// Number of trading days.
    pub const fn days(self) -> u32 {
        match self {
            Self::TradingDays252 => 252,
            Self::TradingDays250 => 250,
        }
    }

    /// Multiplier applied to daily means and (co)variances.
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::TradingDays252 => 252.0,
            Self::TradingDays250 => 250.0,
        }
    }
}

impl TryFrom<u32> for AnnualizationFactor {
    type Error = AnalyticsError;

    fn try_from(days: u32) -> Result<Self> {
        match days {
            252 => Ok(Self::TradingDays252),
            250 => Ok(Self::TradingDays250),
            other => Err(invalid(ENV_TRADING_DAYS, &other.to_string(), "expected 252 or 250")),
        }
    }
}

impl FromStr for AnnualizationFactor {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        let days: u32 = s
            .trim()
            .parse()
            .map_err(|_| invalid(ENV_TRADING_DAYS, s, "expected 252 or 250"))?;
        Self::try_from(days)
    }
}

/// How the market risk premium is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskPremium {
    /// Annualized mean market log return minus the risk-free rate
    #[default]
    MarketDerived,
    /// Caller-supplied premium, already annualized
    Fixed(f64),
}

impl FromStr for RiskPremium {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "market" | "market-derived" | "market_derived" => Ok(Self::MarketDerived),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite())
                .map(Self::Fixed)
                .ok_or_else(|| invalid(ENV_RISK_PREMIUM, s, "expected `market` or a number")),
        }
    }
}

/// Parameters shared by the CAPM and Sharpe computations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskParameters {
    /// Annualized risk-free rate (default: 0.025)
    pub risk_free_rate: f64,
    /// Risk premium mode (default: market-derived)
    pub risk_premium: RiskPremium,
    /// Annualization factor (default: 252)
    pub annualization: AnnualizationFactor,
}

impl Default for RiskParameters {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.025,
            risk_premium: RiskPremium::MarketDerived,
            annualization: AnnualizationFactor::TradingDays252,
        }
    }
}

impl RiskParameters {
    /// Replace the risk-free rate.
    pub const fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Replace the risk premium mode.
    pub const fn with_risk_premium(mut self, risk_premium: RiskPremium) -> Self {
        self.risk_premium = risk_premium;
        self
    }

    /// Replace the annualization factor.
    pub const fn with_annualization(mut self, annualization: AnnualizationFactor) -> Self {
        self.annualization = annualization;
        self
    }

    /// Read parameters from `CAPM_*` environment variables, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidConfig`] if a variable is set but unparseable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read parameters through an arbitrary key lookup, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidConfig`] if a value is present but unparseable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut params = Self::default();

        if let Some(raw) = lookup(ENV_RISK_FREE_RATE) {
            params.risk_free_rate = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|r| r.is_finite())
                .ok_or_else(|| invalid(ENV_RISK_FREE_RATE, &raw, "expected a number"))?;
        }
        if let Some(raw) = lookup(ENV_RISK_PREMIUM) {
            params.risk_premium = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_TRADING_DAYS) {
            params.annualization = raw.parse()?;
        }

        Ok(params)
    }
}

fn invalid(key: &str, value: &str, reason: &str) -> AnalyticsError {
    AnalyticsError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let params = RiskParameters::default();
        assert_eq!(params.risk_free_rate, 0.025);
        assert_eq!(params.risk_premium, RiskPremium::MarketDerived);
        assert_eq!(params.annualization, AnnualizationFactor::TradingDays252);
        assert_eq!(params.annualization.days(), 252);
    }

    #[rstest]
    #[case("252", AnnualizationFactor::TradingDays252)]
    #[case(" 250 ", AnnualizationFactor::TradingDays250)]
    fn test_parse_annualization(#[case] raw: &str, #[case] expected: AnnualizationFactor) {
        assert_eq!(raw.parse::<AnnualizationFactor>().unwrap(), expected);
    }

    #[rstest]
    #[case("365")]
    #[case("two hundred")]
    #[case("")]
    fn test_parse_annualization_rejects(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<AnnualizationFactor>(),
            Err(AnalyticsError::InvalidConfig { .. })
        ));
    }

    #[rstest]
    #[case("market", RiskPremium::MarketDerived)]
    #[case("Market-Derived", RiskPremium::MarketDerived)]
    #[case("0.06", RiskPremium::Fixed(0.06))]
    fn test_parse_risk_premium(#[case] raw: &str, #[case] expected: RiskPremium) {
        assert_eq!(raw.parse::<RiskPremium>().unwrap(), expected);
    }

    #[test]
    fn test_parse_risk_premium_rejects_garbage() {
        assert!("nan".parse::<RiskPremium>().is_err());
        assert!("six percent".parse::<RiskPremium>().is_err());
    }

    #[test]
    fn test_from_lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            (ENV_RISK_FREE_RATE, "0.04"),
            (ENV_RISK_PREMIUM, "0.055"),
            (ENV_TRADING_DAYS, "250"),
        ]
        .into_iter()
        .collect();

        let params =
            RiskParameters::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(params.risk_free_rate, 0.04);
        assert_eq!(params.risk_premium, RiskPremium::Fixed(0.055));
        assert_eq!(params.annualization, AnnualizationFactor::TradingDays250);
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        let params = RiskParameters::from_lookup(|_| None).unwrap();
        assert_eq!(params, RiskParameters::default());
    }

    #[test]
    fn test_from_lookup_invalid_rate() {
        let result = RiskParameters::from_lookup(|key| {
            (key == ENV_RISK_FREE_RATE).then(|| "two percent".to_string())
        });
        assert!(matches!(
            result,
            Err(AnalyticsError::InvalidConfig { key, .. }) if key == ENV_RISK_FREE_RATE
        ));
    }

    #[test]
    fn test_builder_methods() {
        let params = RiskParameters::default()
            .with_risk_free_rate(0.0)
            .with_risk_premium(RiskPremium::Fixed(0.05))
            .with_annualization(AnnualizationFactor::TradingDays250);
        assert_eq!(params.risk_free_rate, 0.0);
        assert_eq!(params.risk_premium, RiskPremium::Fixed(0.05));
        assert_eq!(params.annualization.to_string(), "250");
    }
}
