#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod beta;
pub mod capm;
pub mod error;
pub mod metrics;
pub mod params;
pub mod returns;
pub mod sharpe;
pub mod stats;
pub mod table;

pub use beta::{BetaEstimate, beta_from_moments, compute_beta, compute_beta_estimate};
pub use capm::{capm_expected_return, compute_capm, market_risk_premium};
pub use error::{AnalyticsError, Result};
pub use metrics::{PricingMetrics, compute_metrics};
pub use params::{AnnualizationFactor, RiskParameters, RiskPremium};
pub use returns::{compute_log_returns, log_returns};
pub use sharpe::{annualized_volatility, compute_sharpe, sharpe_ratio};
pub use table::{PriceTable, ReturnTable};
