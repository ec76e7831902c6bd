#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod summary;

// Re-export main types from sub-crates
pub use capm_analytics as analytics;
pub use capm_data as data;
pub use capm_output as output;

pub use error::{CapmError, Result};
pub use summary::{stock_summary, summarize};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
