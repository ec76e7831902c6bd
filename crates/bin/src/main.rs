//! CAPM CLI binary.
//!
//! Summarizes beta, CAPM expected return and Sharpe ratio for one or more
//! securities against a market proxy.

mod source;

use capm::stock_summary;
use capm_analytics::{AnnualizationFactor, RiskParameters, RiskPremium};
use capm_data::DateRange;
use capm_output::{ExportFormat, Exporter, StockSummary, SummaryTable};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use source::PriceSource;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting JSON log output.
const ENV_LOG_FORMAT: &str = "CAPM_LOG_FORMAT";

/// Securities summarized at once by `batch`.
const BATCH_CONCURRENCY: usize = 4;

#[derive(Debug, Parser)]
#[command(name = "capm")]
#[command(about = "Beta, CAPM expected return and Sharpe ratio", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Summarize one security against the market proxy
    Summary {
        /// Security symbol
        security: String,

        #[command(flatten)]
        options: SummaryOptions,
    },

    /// Summarize several securities, one row each
    Batch {
        /// Security symbols
        #[arg(required = true)]
        securities: Vec<String>,

        #[command(flatten)]
        options: SummaryOptions,
    },
}

#[derive(Args, Debug)]
struct SummaryOptions {
    /// Market proxy symbol
    #[arg(long, default_value = "SPY")]
    market: String,

    /// First date of the price window (YYYY-MM-DD)
    #[arg(long, default_value = "2010-01-04")]
    start: NaiveDate,

    /// Last date of the price window, defaults to today
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Annualized risk-free rate
    #[arg(long, allow_hyphen_values = true)]
    risk_free: Option<f64>,

    /// Market risk premium: `market` or an annualized rate
    #[arg(long, allow_hyphen_values = true)]
    premium: Option<RiskPremium>,

    /// Trading days per year (252 or 250)
    #[arg(long)]
    trading_days: Option<AnnualizationFactor>,

    /// Read prices from a wide CSV file instead of Yahoo Finance
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Markdown,
    Json,
    Csv,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("No security could be summarized")]
    NothingSummarized,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(ENV_LOG_FORMAT).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { security, options } => {
            summarize_one(&security, &options).await?;
        }
        Commands::Batch {
            securities,
            options,
        } => {
            summarize_batch(securities, &options).await?;
        }
    }

    Ok(())
}

/// Environment configuration with command-line overrides applied.
fn risk_parameters(
    options: &SummaryOptions,
) -> Result<RiskParameters, Box<dyn std::error::Error>> {
    Ok(apply_overrides(RiskParameters::from_env()?, options))
}

const fn apply_overrides(mut params: RiskParameters, options: &SummaryOptions) -> RiskParameters {
    if let Some(rate) = options.risk_free {
        params = params.with_risk_free_rate(rate);
    }
    if let Some(premium) = options.premium {
        params = params.with_risk_premium(premium);
    }
    if let Some(annualization) = options.trading_days {
        params = params.with_annualization(annualization);
    }
    params
}

async fn summarize_one(
    security: &str,
    options: &SummaryOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = risk_parameters(options)?;
    let range = DateRange::with_optional_end(options.start, options.end)?;
    let provider = PriceSource::new(options.csv.clone())?;

    let summary = stock_summary(&provider, security, &options.market, &range, &params).await?;
    warn_undefined(&summary);

    let rendered = match options.format {
        OutputFormat::Text => summary.to_ascii_table(),
        OutputFormat::Markdown => summary.to_markdown(),
        OutputFormat::Json => summary.export_to_string(ExportFormat::PrettyJson)?,
        OutputFormat::Csv => summary.export_to_string(ExportFormat::Csv)?,
    };
    emit(&rendered, options)
}

async fn summarize_batch(
    securities: Vec<String>,
    options: &SummaryOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = risk_parameters(options)?;
    let range = DateRange::with_optional_end(options.start, options.end)?;
    let provider = PriceSource::new(options.csv.clone())?;

    let pb = ProgressBar::new(securities.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Summarizing against {}...", options.market));

    let mut results: Vec<(usize, StockSummary)> = stream::iter(securities.into_iter().enumerate())
        .map(|(index, security)| {
            let (provider, params, range, pb) = (&provider, &params, &range, &pb);
            async move {
                let result =
                    stock_summary(provider, &security, &options.market, range, params).await;
                pb.inc(1);
                match result {
                    Ok(summary) => Some((index, summary)),
                    Err(e) => {
                        pb.suspend(|| {
                            tracing::warn!(security = %security, error = %e, "skipping security");
                        });
                        None
                    }
                }
            }
        })
        .buffer_unordered(BATCH_CONCURRENCY)
        .filter_map(|result| async move { result })
        .collect()
        .await;

    pb.finish_with_message(format!("Summarized {} securities", results.len()));

    if results.is_empty() {
        return Err(CliError::NothingSummarized.into());
    }

    results.sort_by_key(|(index, _)| *index);
    let table: SummaryTable = results.into_iter().map(|(_, summary)| summary).collect();
    table.rows.iter().for_each(warn_undefined);

    let rendered = match options.format {
        OutputFormat::Text => table.to_ascii_table(),
        OutputFormat::Markdown => table.to_markdown(),
        OutputFormat::Json => table.export_to_string(ExportFormat::PrettyJson)?,
        OutputFormat::Csv => table.export_to_string(ExportFormat::Csv)?,
    };
    emit(&rendered, options)
}

fn warn_undefined(summary: &StockSummary) {
    let undefined = summary.undefined_metrics();
    if !undefined.is_empty() {
        tracing::warn!(
            security = %summary.security,
            metrics = ?undefined,
            "metrics undefined for this price history"
        );
    }
}

fn emit(rendered: &str, options: &SummaryOptions) -> Result<(), Box<dyn std::error::Error>> {
    match &options.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "wrote summary");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
