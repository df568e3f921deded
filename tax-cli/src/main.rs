use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;

use tax_cli::app::{self, OutputFormat, RunOptions};
use tax_cli::{config, logging};
use tax_core::ReportingMonth;
use tax_data::CategoryPolicy;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Monthly capital-gains tax simulator.
///
/// Computes per-bucket sales, profit, taxable profit and tax due for
/// simulated sales of equities, real-estate funds and crypto.
#[derive(Debug, Parser)]
#[command(name = "gains-tax", version, about, long_about = None)]
struct Cli {
    /// TOML file overriding exemption thresholds and rates.
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Fail on sales whose asset category is not recognised instead of
    /// leaving them out of the tax calculation.
    #[arg(long, global = true, default_value_t = false)]
    strict_categories: bool,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level or filter directive (overrides RUST_LOG).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarize one month of a sales CSV.
    Monthly {
        /// Sales CSV (date,ticker,asset_category,quantity,sale_price,profit).
        #[arg(short, long)]
        sales: PathBuf,

        /// Reporting month, YYYY-MM.
        #[arg(short, long)]
        month: ReportingMonth,
    },

    /// Summarize every month of a year.
    Annual {
        /// Sales CSV (date,ticker,asset_category,quantity,sale_price,profit).
        #[arg(short, long)]
        sales: PathBuf,

        /// Calendar year.
        #[arg(short, long)]
        year: i32,
    },

    /// Simulate selling part of a holding.
    Simulate {
        /// Holdings CSV (ticker,category,quantity,average_purchase_price).
        #[arg(long)]
        holdings: PathBuf,

        #[arg(short, long)]
        ticker: String,

        #[arg(short, long)]
        quantity: Decimal,

        /// Sale price per unit.
        #[arg(short, long)]
        price: Decimal,

        /// Reporting month, YYYY-MM.
        #[arg(short, long)]
        month: ReportingMonth,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let options = RunOptions {
        rules: config::load_rules(cli.rules.as_deref())?,
        category_policy: if cli.strict_categories {
            CategoryPolicy::Strict
        } else {
            CategoryPolicy::Lenient
        },
        format: cli.format,
    };
    debug!(?options, "resolved options");

    let output = match cli.command {
        Command::Monthly { sales, month } => app::run_monthly(&sales, month, &options)?,
        Command::Annual { sales, year } => app::run_annual(&sales, year, &options)?,
        Command::Simulate {
            holdings,
            ticker,
            quantity,
            price,
            month,
        } => {
            let portfolio = app::load_portfolio(&holdings)?;
            app::run_simulation(&portfolio, &ticker, quantity, price, month, &options).await?
        }
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }

    Ok(())
}
